//! Submission Data

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use thiserror::Error;

use crate::domain::submissions::records::SubmissionUuid;

/// Lowest accepted star rating.
pub const MIN_RATING: u8 = 1;

/// Highest accepted star rating.
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("rating must be a whole number between {MIN_RATING} and {MAX_RATING}")]
pub struct RatingOutOfRange;

/// Star rating, always within `MIN_RATING..=MAX_RATING`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rating(u8);

impl Rating {
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = RatingOutOfRange;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .filter(|rating| (MIN_RATING..=MAX_RATING).contains(rating))
            .map(Self)
            .ok_or(RatingOutOfRange)
    }
}

impl FromStr for Rating {
    type Err = RatingOutOfRange;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value
            .trim()
            .parse::<i64>()
            .map_err(|_ignored| RatingOutOfRange)
            .and_then(Self::try_from)
    }
}

impl From<Rating> for i16 {
    fn from(rating: Rating) -> Self {
        Self::from(rating.0)
    }
}

/// Which of the two submission shapes a record has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmissionKind {
    /// Name and email only.
    Registration,

    /// Product review with message and rating.
    Review,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown submission kind \"{0}\"")]
pub struct UnknownSubmissionKind(pub String);

impl SubmissionKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Registration => "registration",
            Self::Review => "review",
        }
    }
}

impl FromStr for SubmissionKind {
    type Err = UnknownSubmissionKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "registration" => Ok(Self::Registration),
            "review" => Ok(Self::Review),
            other => Err(UnknownSubmissionKind(other.to_string())),
        }
    }
}

impl Display for SubmissionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Product a review is written about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductReference {
    pub id: String,
    pub title: Option<String>,
}

/// Registration payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub display_name: String,
    pub email: String,
}

/// Review payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub display_name: String,
    pub email: Option<String>,
    pub message: String,
    pub rating: Rating,
    pub product: ProductReference,
    pub image_url: Option<String>,
}

/// The validated body of a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionDetails {
    Registration(Registration),
    Review(Review),
}

impl SubmissionDetails {
    #[must_use]
    pub const fn kind(&self) -> SubmissionKind {
        match self {
            Self::Registration(_) => SubmissionKind::Registration,
            Self::Review(_) => SubmissionKind::Review,
        }
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::Registration(registration) => &registration.display_name,
            Self::Review(review) => &review.display_name,
        }
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        match self {
            Self::Registration(registration) => Some(&registration.email),
            Self::Review(review) => review.email.as_deref(),
        }
    }

    /// Attach a stored image to a review.
    ///
    /// Forms that carry an image always classify as reviews, so the submit
    /// flow never reaches the registration arm. It returns `false` for
    /// registrations built by hand and leaves them untouched.
    pub fn attach_image(&mut self, image_url: String) -> bool {
        match self {
            Self::Registration(_) => false,
            Self::Review(review) => {
                review.image_url = Some(image_url);

                true
            }
        }
    }
}

/// New Submission Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubmission {
    pub uuid: SubmissionUuid,
    pub details: SubmissionDetails,
}
