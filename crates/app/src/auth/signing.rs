//! Server-side HMAC key for session verifiers.

use std::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;
use zeroize::Zeroize;

use crate::auth::token::{decode_hex, encode_hex};

type HmacSha256 = Hmac<Sha256>;

/// Shortest accepted signing key, in bytes.
pub const MIN_SESSION_KEY_BYTES: usize = 32;

#[derive(Debug, Error)]
pub enum SessionKeyError {
    #[error("session signing key must be at least {MIN_SESSION_KEY_BYTES} bytes")]
    TooShort,

    #[error("session signing key was rejected by HMAC")]
    InvalidLength(#[from] hmac::digest::InvalidLength),
}

/// Secret used to derive and check session token verifiers.
#[derive(Clone)]
pub struct SessionKey {
    bytes: Vec<u8>,
}

impl SessionKey {
    /// Wrap raw key material.
    ///
    /// # Errors
    ///
    /// Returns [`SessionKeyError::TooShort`] when fewer than
    /// [`MIN_SESSION_KEY_BYTES`] bytes are given.
    pub fn new(key: impl Into<Vec<u8>>) -> Result<Self, SessionKeyError> {
        let mut bytes = key.into();

        if bytes.len() < MIN_SESSION_KEY_BYTES {
            bytes.zeroize();

            return Err(SessionKeyError::TooShort);
        }

        Ok(Self { bytes })
    }

    fn mac(&self, input: &[u8]) -> Result<HmacSha256, SessionKeyError> {
        let mut mac = HmacSha256::new_from_slice(&self.bytes)?;

        mac.update(input);

        Ok(mac)
    }

    /// Hex-encoded HMAC-SHA256 of `input`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key cannot initialise HMAC.
    pub fn sign(&self, input: &[u8]) -> Result<String, SessionKeyError> {
        let mac = self.mac(input)?;

        Ok(encode_hex(&mac.finalize().into_bytes()))
    }

    /// Constant-time comparison of `input` against a stored hex verifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the key cannot initialise HMAC.
    pub fn verify(&self, input: &[u8], verifier: &str) -> Result<bool, SessionKeyError> {
        let Some(expected) = decode_hex(verifier) else {
            return Ok(false);
        };

        Ok(self.mac(input)?.verify_slice(&expected).is_ok())
    }
}

impl fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionKey(**redacted**)")
    }
}

impl Drop for SessionKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}
