//! HTTP handlers, grouped by page.

pub mod clients;
pub mod dashboard;
pub mod orders;
pub mod products;

use crate::state::AppState;
use crate::WebResult;
use axum::http::StatusCode;
use axum::response::Html;

/// Simple health check endpoint (for basic liveness).
///
/// Returns 200 OK to indicate the service is running. Does not check the
/// database.
#[allow(clippy::unused_async)]
pub async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

/// Renders `template` with `ctx` through the state's tera instance.
pub(crate) fn render(state: &AppState, template: &str, ctx: &tera::Context) -> WebResult<Html<String>> {
    Ok(Html(state.templates.render(template, ctx)?))
}
