//! Submission Handlers

pub(crate) mod admin;
pub(crate) mod average;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod submit;
