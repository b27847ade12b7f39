//! Admin Page Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    state::State,
    submissions::{errors::into_status_error, html::render_submissions_page},
};

/// Render the shop's submissions as an embedded admin page.
#[salvo::handler]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Text<String>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let shop = depot.shop_or_401()?;

    let records = state
        .app
        .submissions
        .list_submissions(&shop, None)
        .await
        .map_err(into_status_error)?;

    let page = render_submissions_page(&shop, &records).or_500("failed to render admin page")?;

    Ok(Text::Html(page))
}
