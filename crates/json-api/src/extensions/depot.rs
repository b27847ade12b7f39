//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use shopform_app::domain::shops::ShopDomain;

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Record the shop the current request acts for.
    fn insert_shop(&mut self, shop: ShopDomain);

    fn shop_or_401(&self) -> Result<ShopDomain, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_shop(&mut self, shop: ShopDomain) {
        self.inject(shop);
    }

    fn shop_or_401(&self) -> Result<ShopDomain, StatusError> {
        self.obtain::<ShopDomain>()
            .cloned()
            .map_err(|_ignored| StatusError::unauthorized().brief("Missing shop"))
    }
}
