//! Submissions

pub mod data;
pub mod errors;
pub mod ratings;
pub mod records;
mod repository;
pub mod service;
pub mod validation;

pub use errors::SubmissionsServiceError;
pub use service::*;
