//! Storefront shop middleware.
//!
//! Storefront requests are unauthenticated; the shop comes from the `shop`
//! query parameter and must belong to an installed shop.

use std::sync::Arc;

use salvo::prelude::*;
use tracing::{debug, error};

use shopform_app::domain::shops::ShopDomain;

use crate::{extensions::*, state::State};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(raw_shop) = req.query::<String>("shop") else {
        res.render(StatusError::bad_request().brief("Missing shop parameter"));

        return;
    };

    let shop = match ShopDomain::parse(&raw_shop) {
        Ok(shop) => shop,
        Err(source) => {
            debug!("rejected shop parameter: {source}");

            res.render(StatusError::bad_request().brief("Invalid shop parameter"));

            return;
        }
    };

    let state = match depot.obtain::<Arc<State>>() {
        Ok(state) => state,
        Err(_error) => {
            res.render(StatusError::internal_server_error());

            return;
        }
    };

    match state.app.auth.is_installed(&shop).await {
        Ok(true) => {}
        Ok(false) => {
            res.render(StatusError::unauthorized().brief("Shop is not installed"));

            return;
        }
        Err(source) => {
            error!("failed to check shop installation: {source}");

            res.render(StatusError::internal_server_error());

            return;
        }
    }

    depot.insert_shop(shop);

    ctrl.call_next(req, depot, res).await;
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use shopform_app::auth::{AuthServiceError, MockAuthService};

    use crate::{
        submissions::storefront_errors,
        test_helpers::{TEST_SHOP, state_with_auth, test_shop},
    };

    use super::*;

    #[salvo::handler]
    async fn echo_shop(depot: &mut Depot, res: &mut Response) {
        let shop = depot
            .shop_or_401()
            .map_or_else(|_| "missing".to_string(), |shop| shop.to_string());

        res.render(shop);
    }

    fn make_service(auth: MockAuthService) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(state_with_auth(auth)))
                .hoop(handler)
                .push(Router::new().get(echo_shop)),
        )
    }

    #[tokio::test]
    async fn test_missing_shop_returns_400() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_is_installed().never();

        let res = TestClient::get("http://example.com")
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_shop_returns_400() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_is_installed().never();

        let res = TestClient::get("http://example.com/?shop=not%20a%20shop")
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_uninstalled_shop_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_is_installed()
            .once()
            .withf(|shop| *shop == test_shop())
            .return_once(|_| Ok(false));

        let res = TestClient::get(format!("http://example.com/?shop={TEST_SHOP}"))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_lookup_failure_returns_500() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_is_installed()
            .once()
            .return_once(|_| Err(AuthServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/?shop={TEST_SHOP}"))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }

    #[tokio::test]
    async fn test_installed_shop_is_injected() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_is_installed()
            .once()
            .withf(|shop| *shop == test_shop())
            .return_once(|_| Ok(true));

        let mut res = TestClient::get(format!("http://example.com/?shop={TEST_SHOP}"))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, TEST_SHOP);

        Ok(())
    }

    #[tokio::test]
    async fn test_rejections_are_json_for_the_widget() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_is_installed()
            .once()
            .return_once(|_| Ok(false));

        let service = Service::new(
            Router::new()
                .hoop(inject(state_with_auth(auth)))
                .hoop(storefront_errors)
                .hoop(handler)
                .push(Router::new().get(echo_shop)),
        );

        let mut res = TestClient::get(format!("http://example.com/?shop={TEST_SHOP}"))
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        let body: serde_json::Value = res.take_json().await?;

        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Shop is not installed");

        Ok(())
    }
}
