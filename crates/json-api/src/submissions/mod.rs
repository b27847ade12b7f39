//! Submissions

mod errors;
mod form;
mod handlers;
mod html;
mod models;

pub(crate) use errors::storefront_errors;
pub(crate) use handlers::*;
