//! Shopform Domain Concerns

pub mod shops;
pub mod submissions;
