//! Auth repository.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    auth::{
        SessionTokenVersion,
        models::{ActiveSession, NewSession, SessionMetadata},
    },
    domain::shops::ShopDomain,
};

const CREATE_SESSION_SQL: &str = include_str!("sql/create_session.sql");
const FIND_ACTIVE_SESSION_SQL: &str = include_str!("sql/find_active_session.sql");
const TOUCH_SESSION_SQL: &str = include_str!("sql/touch_session.sql");
const LIST_SESSIONS_BY_SHOP_SQL: &str = include_str!("sql/list_sessions_by_shop.sql");
const REVOKE_SESSION_SQL: &str = include_str!("sql/revoke_session.sql");
const SHOP_HAS_ACTIVE_SESSION_SQL: &str = include_str!("sql/shop_has_active_session.sql");

#[derive(Debug, Clone)]
pub(crate) struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn create_session(
        &self,
        session: &NewSession,
    ) -> Result<SessionMetadata, sqlx::Error> {
        query_as::<Postgres, SessionMetadata>(CREATE_SESSION_SQL)
            .bind(session.uuid)
            .bind(session.shop.as_str())
            .bind(session.version.as_i16())
            .bind(&session.token_hash)
            .bind(&session.scope)
            .bind(session.expires_at.map(SqlxTimestamp::from))
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn find_active_session(
        &self,
        session_uuid: Uuid,
        version: SessionTokenVersion,
    ) -> Result<Option<ActiveSession>, sqlx::Error> {
        query_as::<Postgres, ActiveSession>(FIND_ACTIVE_SESSION_SQL)
            .bind(session_uuid)
            .bind(version.as_i16())
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn touch_session_last_used(
        &self,
        session_uuid: Uuid,
    ) -> Result<(), sqlx::Error> {
        query(TOUCH_SESSION_SQL)
            .bind(session_uuid)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub(crate) async fn list_sessions_by_shop(
        &self,
        shop: &ShopDomain,
    ) -> Result<Vec<SessionMetadata>, sqlx::Error> {
        query_as::<Postgres, SessionMetadata>(LIST_SESSIONS_BY_SHOP_SQL)
            .bind(shop.as_str())
            .fetch_all(&self.pool)
            .await
    }

    pub(crate) async fn revoke_session(
        &self,
        session_uuid: Uuid,
    ) -> Result<Option<Uuid>, sqlx::Error> {
        query_scalar::<Postgres, Uuid>(REVOKE_SESSION_SQL)
            .bind(session_uuid)
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn shop_has_active_session(
        &self,
        shop: &ShopDomain,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(SHOP_HAS_ACTIVE_SESSION_SQL)
            .bind(shop.as_str())
            .fetch_one(&self.pool)
            .await
    }
}

fn decode_shop(row: &PgRow) -> sqlx::Result<ShopDomain> {
    ShopDomain::parse(row.try_get::<&str, _>("shop")?).map_err(|e| sqlx::Error::ColumnDecode {
        index: "shop".to_string(),
        source: Box::new(e),
    })
}

fn decode_version(row: &PgRow) -> sqlx::Result<SessionTokenVersion> {
    SessionTokenVersion::try_from(row.try_get::<i16, _>("version")?).map_err(|e| {
        sqlx::Error::ColumnDecode {
            index: "version".to_string(),
            source: Box::new(e),
        }
    })
}

impl<'r> FromRow<'r, PgRow> for ActiveSession {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            shop: decode_shop(row)?,
            version: decode_version(row)?,
            token_hash: row.try_get("token_hash")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for SessionMetadata {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            shop: decode_shop(row)?,
            version: decode_version(row)?,
            scope: row.try_get("scope")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            last_used_at: row
                .try_get::<Option<SqlxTimestamp>, _>("last_used_at")?
                .map(SqlxTimestamp::to_jiff),
            expires_at: row
                .try_get::<Option<SqlxTimestamp>, _>("expires_at")?
                .map(SqlxTimestamp::to_jiff),
            revoked_at: row
                .try_get::<Option<SqlxTimestamp>, _>("revoked_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
