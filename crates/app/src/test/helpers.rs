//! Test Helpers

use crate::domain::submissions::data::{
    ProductReference, Rating, Registration, Review, SubmissionDetails,
};

pub(crate) fn registration(display_name: &str, email: &str) -> SubmissionDetails {
    SubmissionDetails::Registration(Registration {
        display_name: display_name.to_string(),
        email: email.to_string(),
    })
}

pub(crate) fn review(product_id: &str, rating: i64) -> SubmissionDetails {
    SubmissionDetails::Review(Review {
        display_name: "Ada".to_string(),
        email: Some("ada@example.com".to_string()),
        message: "Pours beautifully".to_string(),
        rating: Rating::try_from(rating).expect("test rating should be in range"),
        product: ProductReference {
            id: product_id.to_string(),
            title: Some("Teapot".to_string()),
        },
        image_url: None,
    })
}
