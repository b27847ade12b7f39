//! Shops
//!
//! A shop is the merchant that owns every submission and session. The host
//! platform identifies it by its domain (e.g. `example.myshopify.com`).

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use thiserror::Error;

/// Longest accepted shop domain.
pub const MAX_SHOP_DOMAIN_LEN: usize = 255;

/// Shop domain parse errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShopDomainError {
    #[error("shop domain is empty")]
    Empty,

    #[error("shop domain is longer than {MAX_SHOP_DOMAIN_LEN} characters")]
    TooLong,

    #[error("shop domain contains invalid characters")]
    InvalidCharacters,

    #[error("shop domain is not a host name")]
    NotAHostName,
}

/// Normalised shop domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShopDomain(String);

impl ShopDomain {
    /// Parse and normalise a raw shop parameter.
    ///
    /// # Errors
    ///
    /// Returns an error when the value is empty, too long, or not a host name.
    pub fn parse(raw: &str) -> Result<Self, ShopDomainError> {
        let domain = raw.trim().to_ascii_lowercase();

        if domain.is_empty() {
            return Err(ShopDomainError::Empty);
        }

        if domain.len() > MAX_SHOP_DOMAIN_LEN {
            return Err(ShopDomainError::TooLong);
        }

        if !domain
            .bytes()
            .all(|byte| byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'.')
        {
            return Err(ShopDomainError::InvalidCharacters);
        }

        let bookended = domain.starts_with(|c: char| c.is_ascii_alphanumeric())
            && domain.ends_with(|c: char| c.is_ascii_alphanumeric());

        if !bookended || !domain.contains('.') || domain.contains("..") {
            return Err(ShopDomainError::NotAHostName);
        }

        Ok(Self(domain))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ShopDomain {
    type Err = ShopDomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl Display for ShopDomain {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ShopDomain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
