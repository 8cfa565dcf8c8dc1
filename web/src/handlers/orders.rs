//! Order pages: the order form and its submission.

use crate::flash::Flash;
use crate::handlers::render;
use crate::state::AppState;
use crate::WebResult;
use axum::extract::{Query, State};
use axum::response::{Html, Redirect};
use axum::Form;
use boutique_core::{ClientId, ProductId};
use serde::Deserialize;

/// Form fields for placing an order. All three arrive as raw strings; the
/// selects carry ids, the quantity is typed by the user.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderForm {
    /// Client placing the order
    pub client_id: String,
    /// Product being ordered
    pub produit_id: String,
    /// Quantity, validated by the order service
    pub quantite: String,
}

/// GET `/commande/` — the order form with client and product selects.
pub async fn order_form(
    State(state): State<AppState>,
    Query(flash): Query<Flash>,
) -> WebResult<Html<String>> {
    let clients = state.env.store.clients().await?;
    let produits = state.env.store.products().await?;

    let mut ctx = tera::Context::new();
    ctx.insert("clients", &clients);
    ctx.insert("produits", &produits);
    ctx.insert("flash", &flash);
    render(&state, "commande_create.html", &ctx)
}

/// POST `/commande/` — place the order.
///
/// Every failure — unparseable ids, unknown client or product, invalid
/// quantity, insufficient stock, storage — returns the user to the form
/// with the message. Success lands on the product list.
pub async fn create_order(State(state): State<AppState>, Form(form): Form<OrderForm>) -> Redirect {
    let ids = form
        .client_id
        .trim()
        .parse::<i64>()
        .and_then(|c| form.produit_id.trim().parse::<i64>().map(|p| (c, p)));
    let (client_id, product_id) = match ids {
        Ok(ids) => ids,
        Err(_) => {
            return Flash::error("Client ou produit invalide.").redirect_to("/commande/");
        },
    };

    match state
        .orders
        .create_order(
            ClientId::new(client_id),
            ProductId::new(product_id),
            &form.quantite,
        )
        .await
    {
        Ok(_) => Flash::notice("Commande créée avec succès.").redirect_to("/"),
        Err(err) => Flash::error(err.to_string()).redirect_to("/commande/"),
    }
}
