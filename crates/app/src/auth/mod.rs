//! Authentication

mod errors;
mod models;
mod repository;
mod service;
mod signing;
mod token;

pub use errors::*;
pub use models::*;
pub use service::*;
pub use signing::{MIN_SESSION_KEY_BYTES, SessionKey, SessionKeyError};
pub use token::{
    ParsedSessionToken, SESSION_TOKEN_PREFIX, SESSION_TOKEN_SECRET_BYTES, SessionTokenError,
    SessionTokenSecret, SessionTokenVersion, build_verifier_input, format_session_token,
    generate_session_token_secret, parse_session_token,
};
