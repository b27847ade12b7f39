//! Review image storage

mod errors;
mod local;
mod store;

pub use errors::ImageStoreError;
pub use local::LocalImageStore;
pub use store::*;
