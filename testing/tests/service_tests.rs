//! Service-level tests against the in-memory store.
//!
//! These cover the business contracts: order placement (quantity
//! validation, stock decrement, atomicity under concurrency), catalog
//! duplicate handling, cascade deletes, and the dashboard metrics.

#![allow(clippy::unwrap_used)] // Test code can use unwrap

use boutique_core::{
    CatalogService, ClientId, Clock, Environment, Error, OrderService, ProductId, ReportingService,
};
use boutique_testing::mocks::InMemoryStore;
use boutique_testing::test_clock;
use proptest::prelude::*;
use std::sync::Arc;

struct Fixture {
    store: Arc<InMemoryStore>,
    orders: OrderService,
    catalog: CatalogService,
    reporting: ReportingService,
}

fn fixture() -> Fixture {
    let store = Arc::new(InMemoryStore::new());
    let env = Environment::new(store.clone(), Arc::new(test_clock()));
    Fixture {
        store,
        orders: OrderService::new(env.clone()),
        catalog: CatalogService::new(env.clone()),
        reporting: ReportingService::new(env),
    }
}

async fn seed_client(f: &Fixture, name: &str, email: &str) -> ClientId {
    f.catalog.add_client(name, email).await.unwrap().id
}

async fn seed_product(f: &Fixture, name: &str, price: &str, stock: &str) -> ProductId {
    f.catalog
        .add_product(name, "Mobilier", price, stock)
        .await
        .unwrap()
        .id
}

async fn stock_of(f: &Fixture, id: ProductId) -> i64 {
    use boutique_core::store::RetailStore;
    f.store.product(id).await.unwrap().unwrap().stock_quantity
}

// ---------------------------------------------------------------------------
// Order placement
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_order_decrements_stock_and_records_one_line() {
    use boutique_core::store::RetailStore;

    let f = fixture();
    let client = seed_client(&f, "Alice Martin", "alice@example.com").await;
    let product = seed_product(&f, "Chaise", "10", "20").await;

    let order = f.orders.create_order(client, product, "3").await.unwrap();

    assert_eq!(stock_of(&f, product).await, 17);
    assert_eq!(order.client_id, client);
    assert_eq!(order.order_date, test_clock().now().date_naive());

    let orders = f.store.orders().await.unwrap();
    let lines = f.store.order_lines().await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].order_id, order.id);
    assert_eq!(lines[0].product_id, product);
    assert_eq!(lines[0].quantity, 3);
}

#[tokio::test]
async fn create_order_rejects_non_integer_quantity() {
    let f = fixture();
    let client = seed_client(&f, "Alice Martin", "alice@example.com").await;
    let product = seed_product(&f, "Chaise", "10", "20").await;

    let result = f.orders.create_order(client, product, "beaucoup").await;

    assert!(matches!(result, Err(Error::InvalidInput(_))));
    assert_eq!(stock_of(&f, product).await, 20);
}

#[tokio::test]
async fn create_order_requires_existing_client_and_product() {
    let f = fixture();
    let client = seed_client(&f, "Alice Martin", "alice@example.com").await;
    let product = seed_product(&f, "Chaise", "10", "20").await;

    let missing_client = f
        .orders
        .create_order(ClientId::new(999), product, "1")
        .await;
    assert_eq!(missing_client, Err(Error::not_found("Client", 999)));

    let missing_product = f
        .orders
        .create_order(client, ProductId::new(999), "1")
        .await;
    assert_eq!(missing_product, Err(Error::not_found("Produit", 999)));
    assert_eq!(stock_of(&f, product).await, 20);
}

#[tokio::test]
async fn concurrent_orders_never_oversell() {
    use boutique_core::store::RetailStore;

    let f = fixture();
    let client = seed_client(&f, "Alice Martin", "alice@example.com").await;
    let product = seed_product(&f, "Chaise", "10", "5").await;

    // Two orders of 3 against a stock of 5: at most one can succeed.
    let (a, b) = tokio::join!(
        f.orders.create_order(client, product, "3"),
        f.orders.create_order(client, product, "3"),
    );

    let successes = [&a, &b].iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);
    assert_eq!(stock_of(&f, product).await, 2);
    assert_eq!(f.store.orders().await.unwrap().len(), 1);
}

proptest! {
    #[test]
    fn nonpositive_quantities_always_rejected(quantity in -1000i64..=0) {
        tokio_test::block_on(async {
            let f = fixture();
            let client = seed_client(&f, "Alice Martin", "alice@example.com").await;
            let product = seed_product(&f, "Chaise", "10", "20").await;

            let result = f
                .orders
                .create_order(client, product, &quantity.to_string())
                .await;

            assert_eq!(result, Err(Error::InvalidQuantity));
            assert_eq!(stock_of(&f, product).await, 20);
        });
    }

    #[test]
    fn quantities_beyond_stock_always_rejected(quantity in 6i64..=1000) {
        tokio_test::block_on(async {
            let f = fixture();
            let client = seed_client(&f, "Alice Martin", "alice@example.com").await;
            let product = seed_product(&f, "Chaise", "10", "5").await;

            let result = f
                .orders
                .create_order(client, product, &quantity.to_string())
                .await;

            assert_eq!(result, Err(Error::OutOfStock));
            assert_eq!(stock_of(&f, product).await, 5);
        });
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_product_rejects_same_name_and_category() {
    use boutique_core::store::RetailStore;

    let f = fixture();
    seed_product(&f, "Chaise", "10", "5").await;

    let duplicate = f.catalog.add_product("Chaise", "Mobilier", "12", "8").await;
    assert_eq!(duplicate, Err(Error::DuplicateProduct));
    assert_eq!(f.store.products().await.unwrap().len(), 1);

    // Same name in another category is a different product.
    let other_category = f.catalog.add_product("Chaise", "Jardin", "12", "8").await;
    assert!(other_category.is_ok());
}

#[tokio::test]
async fn add_product_rejects_malformed_numbers() {
    use boutique_core::store::RetailStore;

    let f = fixture();
    let result = f.catalog.add_product("Chaise", "Mobilier", "dix", "5").await;
    assert!(matches!(result, Err(Error::InvalidInput(_))));
    assert!(f.store.products().await.unwrap().is_empty());
}

#[tokio::test]
async fn add_client_enforces_unique_email() {
    let f = fixture();
    seed_client(&f, "Alice Martin", "alice@example.com").await;

    let duplicate = f.catalog.add_client("Autre Alice", "alice@example.com").await;
    assert_eq!(duplicate, Err(Error::DuplicateEmail));

    // Duplicate names are fine.
    let same_name = f.catalog.add_client("Alice Martin", "alice2@example.com").await;
    assert!(same_name.is_ok());
}

#[tokio::test]
async fn update_stock_overwrites_without_floor() {
    let f = fixture();
    let product = seed_product(&f, "Chaise", "10", "5").await;

    let updated = f.catalog.update_stock(product, "-4").await.unwrap();
    assert_eq!(updated.stock_quantity, -4);
    assert_eq!(stock_of(&f, product).await, -4);

    let bad = f.catalog.update_stock(product, "quarante").await;
    assert!(matches!(bad, Err(Error::InvalidInput(_))));

    let missing = f.catalog.update_stock(ProductId::new(999), "1").await;
    assert_eq!(missing, Err(Error::not_found("Produit", 999)));
}

#[tokio::test]
async fn update_product_edits_fields_and_checks_collisions() {
    let f = fixture();
    let chaise = seed_product(&f, "Chaise", "10", "5").await;
    seed_product(&f, "Table", "40", "2").await;

    // Renaming onto another product's (name, category) is rejected.
    let collision = f
        .catalog
        .update_product(chaise, "Table", "Mobilier", "10", "5")
        .await;
    assert_eq!(collision, Err(Error::DuplicateProduct));

    // Keeping its own name while changing price is fine.
    let updated = f
        .catalog
        .update_product(chaise, "Chaise", "Mobilier", "12.5", "7")
        .await
        .unwrap();
    assert!((updated.price - 12.5).abs() < f64::EPSILON);
    assert_eq!(updated.stock_quantity, 7);
}

// ---------------------------------------------------------------------------
// Cascade deletes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn deleting_a_product_removes_its_lines_but_not_the_order() {
    use boutique_core::store::RetailStore;

    let f = fixture();
    let client = seed_client(&f, "Alice Martin", "alice@example.com").await;
    let product = seed_product(&f, "Chaise", "10", "20").await;
    f.orders.create_order(client, product, "2").await.unwrap();

    f.catalog.delete_product(product).await.unwrap();

    assert!(f.store.products().await.unwrap().is_empty());
    assert!(f.store.order_lines().await.unwrap().is_empty());
    assert_eq!(f.store.orders().await.unwrap().len(), 1);
}

#[tokio::test]
async fn deleting_a_client_removes_its_orders_and_their_lines() {
    use boutique_core::store::RetailStore;

    let f = fixture();
    let client = seed_client(&f, "Alice Martin", "alice@example.com").await;
    let keeper = seed_client(&f, "Bob Durand", "bob@example.com").await;
    let product = seed_product(&f, "Chaise", "10", "20").await;
    f.orders.create_order(client, product, "2").await.unwrap();
    f.orders.create_order(keeper, product, "1").await.unwrap();

    f.store.delete_client(client).await.unwrap();

    let orders = f.store.orders().await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].client_id, keeper);
    assert_eq!(f.store.order_lines().await.unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[tokio::test]
async fn dashboard_on_empty_store_is_all_zero() {
    let f = fixture();
    let metrics = f.reporting.dashboard().await.unwrap();
    assert_eq!(metrics, boutique_core::DashboardMetrics::default());
}

#[tokio::test]
async fn dashboard_aggregates_a_full_scenario() {
    let f = fixture();
    let client = seed_client(&f, "Alice Martin", "alice@example.com").await;
    let product = seed_product(&f, "Chaise", "10", "20").await;

    // Two orders in the same (fixed-clock) month: 2 then 3 units at 10.00.
    f.orders.create_order(client, product, "2").await.unwrap();
    f.orders.create_order(client, product, "3").await.unwrap();

    let metrics = f.reporting.dashboard().await.unwrap();
    let month = test_clock().now().date_naive().format("%Y-%m").to_string();

    assert!((metrics.revenue_by_month[&month] - 50.0).abs() < 1e-9);
    assert_eq!(metrics.units_by_product, vec![("Chaise".to_string(), 5)]);
    assert!((metrics.total_stock_value - 150.0).abs() < 1e-9);
    assert!((metrics.average_basket.unwrap() - 25.0).abs() < 1e-9);
    assert_eq!(metrics.client_order_frequency[&client.value()], 2);
}
