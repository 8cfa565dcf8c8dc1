//! Client pages: the new-client form and its submission.

use crate::flash::Flash;
use crate::handlers::render;
use crate::state::AppState;
use crate::WebResult;
use axum::extract::{Query, State};
use axum::response::{Html, Redirect};
use axum::Form;
use serde::Deserialize;

/// Form fields for creating a client.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientForm {
    /// Client name (duplicates allowed)
    pub nom: String,
    /// Contact email, unique across clients
    pub email: String,
}

/// GET `/clients/ajouter/` — the new-client form.
pub async fn new_client_form(
    State(state): State<AppState>,
    Query(flash): Query<Flash>,
) -> WebResult<Html<String>> {
    let mut ctx = tera::Context::new();
    ctx.insert("flash", &flash);
    render(&state, "client_form.html", &ctx)
}

/// POST `/clients/ajouter/` — create the client.
///
/// Success lands on the order form so the new client can order right away,
/// matching the original flow.
pub async fn create_client(State(state): State<AppState>, Form(form): Form<ClientForm>) -> Redirect {
    match state.catalog.add_client(&form.nom, &form.email).await {
        Ok(_) => Flash::notice("Client ajouté avec succès.").redirect_to("/commande/"),
        Err(err) => Flash::error(err.to_string()).redirect_to("/clients/ajouter/"),
    }
}
