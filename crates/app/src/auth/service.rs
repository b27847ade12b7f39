//! Auth service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::{
    auth::{
        AuthServiceError, IssuedSession, NewSession, SessionKey, SessionMetadata,
        SessionTokenVersion, build_verifier_input, format_session_token,
        generate_session_token_secret, parse_session_token, repository::PgAuthRepository,
    },
    domain::shops::ShopDomain,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
    key: Arc<SessionKey>,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool, key: SessionKey) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
            key: Arc::new(key),
        }
    }

    /// Issue a new session for the given shop.
    ///
    /// # Errors
    ///
    /// Returns an error if HMAC computation or database insertion fails.
    pub async fn issue_session(
        &self,
        shop: &ShopDomain,
        scope: &str,
        expires_at: Option<Timestamp>,
    ) -> Result<IssuedSession, AuthServiceError> {
        let session_uuid = Uuid::now_v7();
        let version = SessionTokenVersion::V1;
        let secret = generate_session_token_secret();
        let token = format_session_token(session_uuid, version, &secret);

        let verifier_input = build_verifier_input(&session_uuid, version, shop, &secret);

        let token_hash = self.key.sign(&verifier_input)?;

        let metadata = self
            .repository
            .create_session(&NewSession {
                uuid: session_uuid,
                shop: shop.clone(),
                version,
                token_hash,
                scope: scope.to_string(),
                expires_at,
            })
            .await?;

        Ok(IssuedSession { token, metadata })
    }

    /// List all sessions for the given shop, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_sessions(
        &self,
        shop: &ShopDomain,
    ) -> Result<Vec<SessionMetadata>, AuthServiceError> {
        self.repository
            .list_sessions_by_shop(shop)
            .await
            .map_err(AuthServiceError::from)
    }

    /// Revoke a session by UUID. Returns `true` if the session was active.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn revoke_session(&self, session_uuid: Uuid) -> Result<bool, AuthServiceError> {
        self.repository
            .revoke_session(session_uuid)
            .await
            .map(|revoked| revoked.is_some())
            .map_err(AuthServiceError::from)
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<ShopDomain, AuthServiceError> {
        let parsed_token =
            parse_session_token(bearer_token).map_err(|_| AuthServiceError::NotFound)?;

        let session = self
            .repository
            .find_active_session(parsed_token.session_uuid, parsed_token.version)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        if session.version != parsed_token.version {
            return Err(AuthServiceError::NotFound);
        }

        let verifier_input = build_verifier_input(
            &parsed_token.session_uuid,
            parsed_token.version,
            &session.shop,
            &parsed_token.secret,
        );

        if !self.key.verify(&verifier_input, &session.token_hash)? {
            return Err(AuthServiceError::NotFound);
        }

        // Best-effort metadata update; auth success should not depend on this write.
        if let Err(error) = self
            .repository
            .touch_session_last_used(parsed_token.session_uuid)
            .await
        {
            debug!(%error, "failed to record session use");
        }

        Ok(session.shop)
    }

    async fn is_installed(&self, shop: &ShopDomain) -> Result<bool, AuthServiceError> {
        self.repository
            .shop_has_active_session(shop)
            .await
            .map_err(AuthServiceError::from)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a bearer token to the shop its session belongs to.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<ShopDomain, AuthServiceError>;

    /// Whether the shop has at least one active session.
    async fn is_installed(&self, shop: &ShopDomain) -> Result<bool, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::{SignedDuration, Timestamp};
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn issued_session_authenticates_to_its_shop() -> TestResult {
        let ctx = TestContext::new().await;

        let issued = ctx.auth.issue_session(&ctx.shop, "admin", None).await?;

        assert!(issued.token.starts_with("sf_v1_"));
        assert_eq!(issued.metadata.shop, ctx.shop);
        assert_eq!(issued.metadata.scope, "admin");

        let shop = ctx.auth.authenticate_bearer(&issued.token).await?;

        assert_eq!(shop, ctx.shop);

        Ok(())
    }

    #[tokio::test]
    async fn authentication_records_last_use() -> TestResult {
        let ctx = TestContext::new().await;

        let issued = ctx.auth.issue_session(&ctx.shop, "", None).await?;

        assert!(issued.metadata.last_used_at.is_none());

        ctx.auth.authenticate_bearer(&issued.token).await?;

        let sessions = ctx.auth.list_sessions(&ctx.shop).await?;

        assert_eq!(sessions.len(), 1);
        assert!(sessions[0].last_used_at.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn tampered_token_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;

        let issued = ctx.auth.issue_session(&ctx.shop, "", None).await?;

        let (id, _secret) = issued.token.split_once('.').ok_or("token has no secret")?;
        let forged = format!("{id}.{}", "0".repeat(64));

        let result = ctx.auth.authenticate_bearer(&forged).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn malformed_token_is_rejected() {
        let ctx = TestContext::new().await;

        let result = ctx.auth.authenticate_bearer("not-a-token").await;

        assert!(matches!(result, Err(AuthServiceError::NotFound)));
    }

    #[tokio::test]
    async fn revoked_session_is_rejected_and_uninstalls_shop() -> TestResult {
        let ctx = TestContext::new().await;

        let issued = ctx.auth.issue_session(&ctx.shop, "", None).await?;

        assert!(ctx.auth.is_installed(&ctx.shop).await?);
        assert!(ctx.auth.revoke_session(issued.metadata.uuid).await?);
        assert!(!ctx.auth.revoke_session(issued.metadata.uuid).await?);

        let result = ctx.auth.authenticate_bearer(&issued.token).await;

        assert!(matches!(result, Err(AuthServiceError::NotFound)));
        assert!(!ctx.auth.is_installed(&ctx.shop).await?);

        Ok(())
    }

    #[tokio::test]
    async fn expired_session_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let expired = Timestamp::now().checked_sub(SignedDuration::from_secs(60))?;

        let issued = ctx
            .auth
            .issue_session(&ctx.shop, "", Some(expired))
            .await?;

        let result = ctx.auth.authenticate_bearer(&issued.token).await;

        assert!(matches!(result, Err(AuthServiceError::NotFound)));
        assert!(!ctx.auth.is_installed(&ctx.shop).await?);
        assert!(!issued.metadata.is_active_at(Timestamp::now()));

        Ok(())
    }

    #[tokio::test]
    async fn shops_without_sessions_are_not_installed() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.auth.issue_session(&ctx.shop, "", None).await?;

        assert!(ctx.auth.is_installed(&ctx.shop).await?);
        assert!(!ctx.auth.is_installed(&ctx.other_shop()).await?);

        Ok(())
    }
}
