//! The reporting dashboard page.

use crate::flash::Flash;
use crate::handlers::render;
use crate::state::AppState;
use crate::WebResult;
use axum::extract::State;
use axum::response::Html;

/// GET `/dashboard/` — the five aggregate metrics.
pub async fn dashboard(State(state): State<AppState>) -> WebResult<Html<String>> {
    let metrics = state.reporting.dashboard().await?;

    let mut ctx = tera::Context::new();
    ctx.insert("metrics", &metrics);
    ctx.insert("flash", &Flash::default());
    render(&state, "dashboard.html", &ctx)
}
