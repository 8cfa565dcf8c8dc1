//! Route table.
//!
//! The paths keep the original French naming; forms POST to the same path
//! their GET renders.

use crate::handlers::{self, clients, dashboard, orders, products};
use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

/// Builds the application router.
///
/// # Routes
///
/// - GET  `/` — product list
/// - GET/POST `/commande/` — order form / place order
/// - GET  `/dashboard/` — metrics
/// - GET/POST `/produits/ajouter/` — new product
/// - GET/POST `/clients/ajouter/` — new client
/// - GET/POST `/produits/:id/modifier_stock/` — stock update
/// - GET/POST `/produits/:id/modifier/` — product edit
/// - POST `/produits/:id/supprimer/` — product deletion
/// - GET  `/health` — liveness
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(products::list_products))
        .route(
            "/commande/",
            get(orders::order_form).post(orders::create_order),
        )
        .route("/dashboard/", get(dashboard::dashboard))
        .route(
            "/produits/ajouter/",
            get(products::new_product_form).post(products::create_product),
        )
        .route(
            "/clients/ajouter/",
            get(clients::new_client_form).post(clients::create_client),
        )
        .route(
            "/produits/:id/modifier_stock/",
            get(products::update_stock_form).post(products::update_stock),
        )
        .route(
            "/produits/:id/modifier/",
            get(products::edit_product_form).post(products::update_product),
        )
        .route("/produits/:id/supprimer/", post(products::delete_product))
        .route("/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
