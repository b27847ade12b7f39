//! Submission validation.
//!
//! Raw storefront input arrives as a bag of optional strings. Validation runs
//! in three steps: blank fields are dropped, the submission is classified as a
//! registration or a review by the presence of review-only fields, and the
//! rule set for that kind is applied.

use std::fmt::{Display, Formatter, Result as FmtResult};

use smallvec::SmallVec;
use thiserror::Error;

use crate::domain::submissions::data::{
    ProductReference, Rating, Registration, Review, SubmissionDetails, SubmissionKind,
};

/// Longest accepted display name, product id or product title.
pub const MAX_SHORT_FIELD_LEN: usize = 255;

/// Longest accepted email address.
pub const MAX_EMAIL_LEN: usize = 320;

/// Longest accepted review message.
pub const MAX_MESSAGE_LEN: usize = 5_000;

/// Input fields, named as the storefront sends them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionField {
    Username,
    Email,
    Message,
    Rating,
    ProductId,
    ProductTitle,
}

impl SubmissionField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Email => "email",
            Self::Message => "message",
            Self::Rating => "rating",
            Self::ProductId => "productId",
            Self::ProductTitle => "productTitle",
        }
    }
}

impl Display for SubmissionField {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Fields missing from a submission, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MissingFields(SmallVec<[SubmissionField; 4]>);

impl MissingFields {
    fn check<T>(&mut self, field: SubmissionField, value: Option<&T>) {
        if value.is_none() {
            self.0.push(field);
        }
    }

    #[must_use]
    pub fn fields(&self) -> &[SubmissionField] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for MissingFields {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (index, field) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }

            f.write_str(field.as_str())?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionValidationError {
    #[error("Missing required fields: {0}")]
    MissingFields(MissingFields),

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Rating must be a whole number between 1 and 5")]
    InvalidRating,

    #[error("Field {field} must be at most {max} characters")]
    TooLong {
        field: SubmissionField,
        max: usize,
    },
}

/// Raw submission input before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionForm {
    pub username: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
    pub rating: Option<String>,
    pub product_id: Option<String>,
    pub product_title: Option<String>,
    pub has_image: bool,
}

impl SubmissionForm {
    /// Drop surrounding whitespace and treat blank fields as absent.
    #[must_use]
    pub fn normalised(self) -> Self {
        Self {
            username: non_blank(self.username),
            email: non_blank(self.email),
            message: non_blank(self.message),
            rating: non_blank(self.rating),
            product_id: non_blank(self.product_id),
            product_title: non_blank(self.product_title),
            has_image: self.has_image,
        }
    }

    /// Decide which rule set applies. Any review-only field makes this a
    /// review; otherwise it is a registration.
    #[must_use]
    pub fn kind(&self) -> SubmissionKind {
        let is_review = self.message.is_some()
            || self.rating.is_some()
            || self.product_id.is_some()
            || self.product_title.is_some()
            || self.has_image;

        if is_review {
            SubmissionKind::Review
        } else {
            SubmissionKind::Registration
        }
    }

    /// Normalise, classify and validate the form.
    ///
    /// # Errors
    ///
    /// Returns the first failing rule: missing fields (all reported at once),
    /// then field lengths, then email shape, then rating range.
    pub fn validate(self) -> Result<SubmissionDetails, SubmissionValidationError> {
        let form = self.normalised();

        match form.kind() {
            SubmissionKind::Registration => form.into_registration(),
            SubmissionKind::Review => form.into_review(),
        }
    }

    fn into_registration(self) -> Result<SubmissionDetails, SubmissionValidationError> {
        let mut missing = MissingFields::default();

        missing.check(SubmissionField::Username, self.username.as_ref());
        missing.check(SubmissionField::Email, self.email.as_ref());

        let (Some(display_name), Some(email)) = (self.username, self.email) else {
            return Err(SubmissionValidationError::MissingFields(missing));
        };

        check_len(SubmissionField::Username, &display_name, MAX_SHORT_FIELD_LEN)?;

        Ok(SubmissionDetails::Registration(Registration {
            display_name,
            email: normalise_email(&email)?,
        }))
    }

    fn into_review(self) -> Result<SubmissionDetails, SubmissionValidationError> {
        let mut missing = MissingFields::default();

        missing.check(SubmissionField::Username, self.username.as_ref());
        missing.check(SubmissionField::Message, self.message.as_ref());
        missing.check(SubmissionField::Rating, self.rating.as_ref());
        missing.check(SubmissionField::ProductId, self.product_id.as_ref());

        let (Some(display_name), Some(message), Some(rating), Some(product_id)) =
            (self.username, self.message, self.rating, self.product_id)
        else {
            return Err(SubmissionValidationError::MissingFields(missing));
        };

        check_len(SubmissionField::Username, &display_name, MAX_SHORT_FIELD_LEN)?;
        check_len(SubmissionField::Message, &message, MAX_MESSAGE_LEN)?;
        check_len(SubmissionField::ProductId, &product_id, MAX_SHORT_FIELD_LEN)?;

        if let Some(title) = &self.product_title {
            check_len(SubmissionField::ProductTitle, title, MAX_SHORT_FIELD_LEN)?;
        }

        let email = self
            .email
            .as_deref()
            .map(normalise_email)
            .transpose()?;

        let rating = rating
            .parse::<Rating>()
            .map_err(|_ignored| SubmissionValidationError::InvalidRating)?;

        Ok(SubmissionDetails::Review(Review {
            display_name,
            email,
            message,
            rating,
            product: ProductReference {
                id: product_id,
                title: self.product_title,
            },
            image_url: None,
        }))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn check_len(
    field: SubmissionField,
    value: &str,
    max: usize,
) -> Result<(), SubmissionValidationError> {
    if value.chars().count() > max {
        return Err(SubmissionValidationError::TooLong { field, max });
    }

    Ok(())
}

fn normalise_email(email: &str) -> Result<String, SubmissionValidationError> {
    check_len(SubmissionField::Email, email, MAX_EMAIL_LEN)?;

    let email = email.to_lowercase();

    let Some((local, domain)) = email.split_once('@') else {
        return Err(SubmissionValidationError::InvalidEmail);
    };

    let domain_ok = domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains('@');

    if local.is_empty() || !domain_ok || email.chars().any(char::is_whitespace) {
        return Err(SubmissionValidationError::InvalidEmail);
    }

    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration_form() -> SubmissionForm {
        SubmissionForm {
            username: Some("Ada Lovelace".to_string()),
            email: Some("Ada@Example.com".to_string()),
            ..SubmissionForm::default()
        }
    }

    fn review_form() -> SubmissionForm {
        SubmissionForm {
            username: Some("Ada".to_string()),
            email: Some("ada@example.com".to_string()),
            message: Some("Lovely teapot".to_string()),
            rating: Some("4".to_string()),
            product_id: Some("gid://shopify/Product/42".to_string()),
            product_title: Some("Teapot".to_string()),
            has_image: false,
        }
    }

    fn missing(result: Result<SubmissionDetails, SubmissionValidationError>) -> Vec<&'static str> {
        match result {
            Err(SubmissionValidationError::MissingFields(fields)) => {
                fields.fields().iter().map(|field| field.as_str()).collect()
            }
            other => panic!("expected missing fields, got {other:?}"),
        }
    }

    #[test]
    fn name_and_email_only_is_a_registration() {
        let details = registration_form().validate();

        assert_eq!(
            details,
            Ok(SubmissionDetails::Registration(Registration {
                display_name: "Ada Lovelace".to_string(),
                email: "ada@example.com".to_string(),
            }))
        );
    }

    #[test]
    fn registration_requires_name_and_email() {
        let form = SubmissionForm {
            username: Some("   ".to_string()),
            ..SubmissionForm::default()
        };

        assert_eq!(missing(form.validate()), vec!["username", "email"]);
    }

    #[test]
    fn registration_rejects_malformed_email() {
        for email in ["ada", "ada@", "@example.com", "ada@example", "a da@example.com"] {
            let form = SubmissionForm {
                email: Some(email.to_string()),
                ..registration_form()
            };

            assert_eq!(
                form.validate(),
                Err(SubmissionValidationError::InvalidEmail),
                "{email} should be rejected"
            );
        }
    }

    #[test]
    fn any_review_field_selects_the_review_rules() {
        let forms = [
            SubmissionForm {
                message: Some("hello".to_string()),
                ..registration_form()
            },
            SubmissionForm {
                rating: Some("5".to_string()),
                ..registration_form()
            },
            SubmissionForm {
                product_title: Some("Teapot".to_string()),
                ..registration_form()
            },
            SubmissionForm {
                has_image: true,
                ..registration_form()
            },
        ];

        for form in forms {
            assert_eq!(form.clone().normalised().kind(), SubmissionKind::Review);
            assert!(
                form.validate().is_err(),
                "partial review should fail review validation"
            );
        }
    }

    #[test]
    fn blank_review_fields_do_not_select_the_review_rules() {
        let form = SubmissionForm {
            message: Some("  ".to_string()),
            rating: Some(String::new()),
            ..registration_form()
        };

        assert!(matches!(
            form.validate(),
            Ok(SubmissionDetails::Registration(_))
        ));
    }

    #[test]
    fn review_reports_all_missing_fields_in_order() {
        let form = SubmissionForm {
            product_title: Some("Teapot".to_string()),
            ..SubmissionForm::default()
        };

        assert_eq!(
            missing(form.validate()),
            vec!["username", "message", "rating", "productId"]
        );
    }

    #[test]
    fn review_missing_fields_message_lists_names() {
        let form = SubmissionForm {
            username: Some("Ada".to_string()),
            message: Some("Nice".to_string()),
            ..SubmissionForm::default()
        };

        let error = form.validate().err().map(|error| error.to_string());

        assert_eq!(
            error.as_deref(),
            Some("Missing required fields: rating, productId")
        );
    }

    #[test]
    fn review_email_is_optional() {
        let form = SubmissionForm {
            email: None,
            ..review_form()
        };

        let Ok(SubmissionDetails::Review(review)) = form.validate() else {
            panic!("expected a review");
        };

        assert_eq!(review.email, None);
        assert_eq!(review.rating.get(), 4);
        assert_eq!(review.product.title.as_deref(), Some("Teapot"));
    }

    #[test]
    fn review_rejects_out_of_range_ratings() {
        for rating in ["0", "6", "3.5", "great"] {
            let form = SubmissionForm {
                rating: Some(rating.to_string()),
                ..review_form()
            };

            assert_eq!(
                form.validate(),
                Err(SubmissionValidationError::InvalidRating),
                "{rating} should be rejected"
            );
        }
    }

    #[test]
    fn review_trims_values() {
        let form = SubmissionForm {
            username: Some("  Ada  ".to_string()),
            message: Some("\n Lovely \n".to_string()),
            rating: Some(" 5 ".to_string()),
            ..review_form()
        };

        let Ok(SubmissionDetails::Review(review)) = form.validate() else {
            panic!("expected a review");
        };

        assert_eq!(review.display_name, "Ada");
        assert_eq!(review.message, "Lovely");
        assert_eq!(review.rating.get(), 5);
    }

    #[test]
    fn review_rejects_overlong_message() {
        let form = SubmissionForm {
            message: Some("x".repeat(MAX_MESSAGE_LEN + 1)),
            ..review_form()
        };

        assert_eq!(
            form.validate(),
            Err(SubmissionValidationError::TooLong {
                field: SubmissionField::Message,
                max: MAX_MESSAGE_LEN,
            })
        );
    }
}
