//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};

use shopform_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        shops::ShopDomain,
        submissions::{
            MockSubmissionsService,
            data::{
                ProductReference, Rating, Registration, Review, SubmissionDetails,
            },
            records::{SubmissionRecord, SubmissionUuid},
        },
    },
    images::MockImageStore,
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_SHOP: &str = "teapots.myshopify.com";

pub(crate) fn test_shop() -> ShopDomain {
    ShopDomain::parse(TEST_SHOP).unwrap_or_else(|error| panic!("invalid test shop: {error}"))
}

#[salvo::handler]
pub(crate) async fn inject_shop(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_shop(test_shop());
    ctrl.call_next(req, depot, res).await;
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();
    auth.expect_is_installed().never();

    auth
}

fn strict_submissions_mock() -> MockSubmissionsService {
    let mut submissions = MockSubmissionsService::new();

    submissions.expect_create_submission().never();
    submissions.expect_list_submissions().never();
    submissions.expect_get_submission().never();
    submissions.expect_delete_submission().never();
    submissions.expect_rating_summary().never();

    submissions
}

fn strict_images_mock() -> MockImageStore {
    let mut images = MockImageStore::new();

    images.expect_store_image().never();

    images
}

pub(crate) fn state_with(
    submissions: MockSubmissionsService,
    auth: MockAuthService,
    images: MockImageStore,
) -> Arc<State> {
    State::from_app_context(
        AppContext {
            submissions: Arc::new(submissions),
            auth: Arc::new(auth),
            images: Arc::new(images),
        },
        None,
    )
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    state_with(strict_submissions_mock(), auth, strict_images_mock())
}

/// Serve `route` as if the request already resolved to [`TEST_SHOP`].
pub(crate) fn submissions_service(submissions: MockSubmissionsService, route: Router) -> Service {
    service_with_images(submissions, strict_images_mock(), route)
}

pub(crate) fn service_with_images(
    submissions: MockSubmissionsService,
    images: MockImageStore,
    route: Router,
) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with(submissions, strict_auth_mock(), images)))
            .hoop(inject_shop)
            .push(route),
    )
}

pub(crate) fn make_registration(uuid: SubmissionUuid) -> SubmissionRecord {
    SubmissionRecord {
        uuid,
        shop: test_shop(),
        details: SubmissionDetails::Registration(Registration {
            display_name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        }),
        created_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_review(uuid: SubmissionUuid, rating: i64) -> SubmissionRecord {
    SubmissionRecord {
        uuid,
        shop: test_shop(),
        details: SubmissionDetails::Review(Review {
            display_name: "Grace".to_string(),
            email: None,
            message: "Pours without dripping".to_string(),
            rating: Rating::try_from(rating)
                .unwrap_or_else(|error| panic!("invalid test rating: {error}")),
            product: ProductReference {
                id: "gid://shopify/Product/42".to_string(),
                title: Some("Teapot".to_string()),
            },
            image_url: None,
        }),
        created_at: Timestamp::UNIX_EPOCH,
    }
}
