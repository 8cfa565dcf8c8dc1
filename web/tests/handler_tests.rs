//! End-to-end handler tests over the in-memory store.
//!
//! Each test drives the real router through `axum-test`: forms are
//! submitted as a browser would, and the redirect-with-notification
//! contract is asserted on status codes and `Location` headers.

#![allow(clippy::unwrap_used)] // Test code can use unwrap

use axum::http::StatusCode;
use axum_test::TestServer;
use boutique_core::store::RetailStore;
use boutique_core::Environment;
use boutique_testing::mocks::InMemoryStore;
use boutique_testing::test_clock;
use boutique_web::{router, AppState};
use std::sync::Arc;

struct App {
    server: TestServer,
    store: Arc<InMemoryStore>,
}

fn app() -> App {
    let store = Arc::new(InMemoryStore::new());
    let env = Environment::new(store.clone(), Arc::new(test_clock()));
    let state = AppState::new(env).unwrap();
    let server = TestServer::new(router(state)).unwrap();
    App { server, store }
}

fn location(response: &axum_test::TestResponse) -> String {
    response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

async fn seed(app: &App) {
    app.server
        .post("/clients/ajouter/")
        .form(&[("nom", "Alice Martin"), ("email", "alice@example.com")])
        .await
        .assert_status(StatusCode::SEE_OTHER);
    app.server
        .post("/produits/ajouter/")
        .form(&[
            ("nom", "Chaise"),
            ("categorie", "Mobilier"),
            ("prix", "10"),
            ("quantite_en_stock", "20"),
        ])
        .await
        .assert_status(StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn health_is_up() {
    let app = app();
    let response = app.server.get("/health").await;
    response.assert_status_ok();
    response.assert_text("ok");
}

#[tokio::test]
async fn product_list_renders_seeded_products() {
    let app = app();
    seed(&app).await;

    let response = app.server.get("/").await;
    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains("Chaise"));
    assert!(body.contains("Mobilier"));
}

#[tokio::test]
async fn successful_product_creation_redirects_with_notice() {
    let app = app();

    let response = app
        .server
        .post("/produits/ajouter/")
        .form(&[
            ("nom", "Table"),
            ("categorie", "Mobilier"),
            ("prix", "40"),
            ("quantite_en_stock", "3"),
        ])
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    let target = location(&response);
    assert!(target.starts_with("/?"));
    assert!(target.contains("notice="));
}

#[tokio::test]
async fn duplicate_product_bounces_back_to_the_form() {
    let app = app();
    seed(&app).await;

    let response = app
        .server
        .post("/produits/ajouter/")
        .form(&[
            ("nom", "Chaise"),
            ("categorie", "Mobilier"),
            ("prix", "12"),
            ("quantite_en_stock", "1"),
        ])
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    let target = location(&response);
    assert!(target.starts_with("/produits/ajouter/?"));
    assert!(target.contains("error="));
    assert_eq!(app.store.products().await.unwrap().len(), 1);
}

#[tokio::test]
async fn order_submission_decrements_stock() {
    let app = app();
    seed(&app).await;

    let response = app
        .server
        .post("/commande/")
        .form(&[("client_id", "1"), ("produit_id", "1"), ("quantite", "3")])
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert!(location(&response).contains("notice="));

    let products = app.store.products().await.unwrap();
    assert_eq!(products[0].stock_quantity, 17);
    assert_eq!(app.store.orders().await.unwrap().len(), 1);
}

#[tokio::test]
async fn out_of_stock_order_bounces_back_with_the_message() {
    let app = app();
    seed(&app).await;

    let response = app
        .server
        .post("/commande/")
        .form(&[("client_id", "1"), ("produit_id", "1"), ("quantite", "999")])
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    let target = location(&response);
    assert!(target.starts_with("/commande/?"));
    assert!(target.contains("error=Stock+insuffisant"));

    // Nothing was written.
    assert_eq!(app.store.products().await.unwrap()[0].stock_quantity, 20);
    assert!(app.store.orders().await.unwrap().is_empty());
}

#[tokio::test]
async fn malformed_quantity_bounces_back_to_the_order_form() {
    let app = app();
    seed(&app).await;

    let response = app
        .server
        .post("/commande/")
        .form(&[("client_id", "1"), ("produit_id", "1"), ("quantite", "trois")])
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/commande/?error="));
}

#[tokio::test]
async fn flash_message_is_rendered_on_the_target_page() {
    let app = app();
    seed(&app).await;

    let page = app.server.get("/?notice=Commande+cr%C3%A9%C3%A9e+avec+succ%C3%A8s.").await;
    page.assert_status_ok();
    assert!(page.text().contains("Commande créée avec succès."));
}

#[tokio::test]
async fn stock_form_on_unknown_product_is_404() {
    let app = app();
    let response = app.server.get("/produits/999/modifier_stock/").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stock_update_accepts_negative_values() {
    let app = app();
    seed(&app).await;

    let response = app
        .server
        .post("/produits/1/modifier_stock/")
        .form(&[("quantite_en_stock", "-4")])
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(app.store.products().await.unwrap()[0].stock_quantity, -4);
}

#[tokio::test]
async fn product_deletion_removes_it_from_the_list() {
    let app = app();
    seed(&app).await;

    app.server
        .post("/produits/1/supprimer/")
        .await
        .assert_status(StatusCode::SEE_OTHER);

    assert!(app.store.products().await.unwrap().is_empty());
}

#[tokio::test]
async fn dashboard_renders_after_orders() {
    let app = app();
    seed(&app).await;
    app.server
        .post("/commande/")
        .form(&[("client_id", "1"), ("produit_id", "1"), ("quantite", "2")])
        .await
        .assert_status(StatusCode::SEE_OTHER);

    let page = app.server.get("/dashboard/").await;
    page.assert_status_ok();
    let body = page.text();
    assert!(body.contains("Chiffre d'affaires par mois"));
    assert!(body.contains("Chaise"));
}

#[tokio::test]
async fn dashboard_renders_on_an_empty_store() {
    let app = app();
    let page = app.server.get("/dashboard/").await;
    page.assert_status_ok();
    assert!(page.text().contains("Indéfini"));
}
