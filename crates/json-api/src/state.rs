//! State

use std::sync::Arc;

use shopform_app::context::AppContext;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,

    /// Overrides the request host when building public image URLs.
    pub(crate) public_base_url: Option<String>,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, public_base_url: Option<String>) -> Self {
        Self {
            app,
            public_base_url: public_base_url
                .map(|url| url.trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty()),
        }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: AppContext, public_base_url: Option<String>) -> Arc<Self> {
        Arc::new(Self::new(app, public_base_url))
    }
}
