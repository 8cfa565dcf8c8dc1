//! # Boutique Testing
//!
//! Testing utilities for the Boutique services:
//!
//! - [`mocks::InMemoryStore`]: a [`RetailStore`] backed by mutex-guarded
//!   vectors, with per-entity atomic id counters. Also used by the server
//!   binary as the no-database fallback.
//! - [`mocks::FixedClock`]: deterministic time.
//!
//! ## Example
//!
//! ```
//! use boutique_core::{Environment, OrderService};
//! use boutique_testing::mocks::InMemoryStore;
//! use boutique_testing::test_clock;
//! use std::sync::Arc;
//!
//! let env = Environment::new(Arc::new(InMemoryStore::new()), Arc::new(test_clock()));
//! let orders = OrderService::new(env);
//! ```

use chrono::{DateTime, TimeZone, Utc};

/// Mock implementations of the environment traits.
pub mod mocks {
    use super::{DateTime, Utc};
    use async_trait::async_trait;
    use boutique_core::environment::Clock;
    use boutique_core::error::Error;
    use boutique_core::model::{
        Client, ClientId, NewClient, NewProduct, Order, OrderId, OrderLine, Product, ProductId,
    };
    use boutique_core::store::RetailStore;
    use chrono::NaiveDate;
    use std::sync::{Mutex, MutexGuard};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    #[derive(Debug, Default)]
    struct Tables {
        products: Vec<Product>,
        clients: Vec<Client>,
        orders: Vec<Order>,
        lines: Vec<OrderLine>,
        next_product_id: i64,
        next_client_id: i64,
        next_order_id: i64,
        next_line_id: i64,
    }

    /// In-memory [`RetailStore`].
    ///
    /// One mutex guards all four tables, so `place_order` is naturally
    /// atomic: the stock check and the writes happen under a single lock,
    /// and concurrent orders serialize. Ids are assigned from per-entity
    /// counters starting at 1.
    #[derive(Debug, Default)]
    pub struct InMemoryStore {
        inner: Mutex<Tables>,
    }

    impl InMemoryStore {
        /// Create a new, empty store
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        fn lock(&self) -> MutexGuard<'_, Tables> {
            // A panic while holding the lock only happens in failed tests;
            // the data is still usable for the remaining assertions.
            match self.inner.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            }
        }
    }

    #[async_trait]
    impl RetailStore for InMemoryStore {
        async fn products(&self) -> Result<Vec<Product>, Error> {
            Ok(self.lock().products.clone())
        }

        async fn product(&self, id: ProductId) -> Result<Option<Product>, Error> {
            Ok(self.lock().products.iter().find(|p| p.id == id).cloned())
        }

        async fn product_by_name(
            &self,
            name: &str,
            category: &str,
        ) -> Result<Option<Product>, Error> {
            Ok(self
                .lock()
                .products
                .iter()
                .find(|p| p.name == name && p.category == category)
                .cloned())
        }

        async fn insert_product(&self, new: NewProduct) -> Result<Product, Error> {
            let mut tables = self.lock();
            tables.next_product_id += 1;
            let product = Product {
                id: ProductId::new(tables.next_product_id),
                name: new.name,
                category: new.category,
                price: new.price,
                stock_quantity: new.stock_quantity,
            };
            tables.products.push(product.clone());
            Ok(product)
        }

        async fn update_product(&self, product: &Product) -> Result<(), Error> {
            let mut tables = self.lock();
            match tables.products.iter_mut().find(|p| p.id == product.id) {
                Some(existing) => {
                    *existing = product.clone();
                    Ok(())
                },
                None => Err(Error::not_found("Produit", product.id.value())),
            }
        }

        async fn delete_product(&self, id: ProductId) -> Result<(), Error> {
            let mut tables = self.lock();
            let before = tables.products.len();
            tables.products.retain(|p| p.id != id);
            if tables.products.len() == before {
                return Err(Error::not_found("Produit", id.value()));
            }
            // Cascade: the product's order lines go with it.
            tables.lines.retain(|l| l.product_id != id);
            Ok(())
        }

        async fn clients(&self) -> Result<Vec<Client>, Error> {
            Ok(self.lock().clients.clone())
        }

        async fn client(&self, id: ClientId) -> Result<Option<Client>, Error> {
            Ok(self.lock().clients.iter().find(|c| c.id == id).cloned())
        }

        async fn insert_client(&self, new: NewClient) -> Result<Client, Error> {
            let mut tables = self.lock();
            if tables.clients.iter().any(|c| c.email == new.email) {
                return Err(Error::DuplicateEmail);
            }
            tables.next_client_id += 1;
            let client = Client {
                id: ClientId::new(tables.next_client_id),
                name: new.name,
                email: new.email,
            };
            tables.clients.push(client.clone());
            Ok(client)
        }

        async fn delete_client(&self, id: ClientId) -> Result<(), Error> {
            let mut tables = self.lock();
            let before = tables.clients.len();
            tables.clients.retain(|c| c.id != id);
            if tables.clients.len() == before {
                return Err(Error::not_found("Client", id.value()));
            }
            // Cascade: the client's orders, then the orders' lines.
            let removed: Vec<OrderId> = tables
                .orders
                .iter()
                .filter(|o| o.client_id == id)
                .map(|o| o.id)
                .collect();
            tables.orders.retain(|o| o.client_id != id);
            tables.lines.retain(|l| !removed.contains(&l.order_id));
            Ok(())
        }

        async fn orders(&self) -> Result<Vec<Order>, Error> {
            Ok(self.lock().orders.clone())
        }

        async fn order_lines(&self) -> Result<Vec<OrderLine>, Error> {
            Ok(self.lock().lines.clone())
        }

        async fn place_order(
            &self,
            client_id: ClientId,
            product_id: ProductId,
            quantity: i64,
            order_date: NaiveDate,
        ) -> Result<Order, Error> {
            let mut tables = self.lock();

            if !tables.clients.iter().any(|c| c.id == client_id) {
                return Err(Error::not_found("Client", client_id.value()));
            }
            let Some(product) = tables.products.iter_mut().find(|p| p.id == product_id) else {
                return Err(Error::not_found("Produit", product_id.value()));
            };

            // Conditional decrement, all under the one lock: this is the
            // authoritative out-of-stock check.
            if product.stock_quantity < quantity {
                return Err(Error::OutOfStock);
            }
            product.stock_quantity -= quantity;

            tables.next_order_id += 1;
            let order = Order {
                id: OrderId::new(tables.next_order_id),
                client_id,
                order_date,
            };
            tables.orders.push(order);

            tables.next_line_id += 1;
            let line = OrderLine {
                id: tables.next_line_id,
                order_id: order.id,
                product_id,
                quantity,
            };
            tables.lines.push(line);

            Ok(order)
        }
    }
}

/// A fixed clock at a known instant, for tests that date orders.
#[must_use]
pub fn test_clock() -> mocks::FixedClock {
    mocks::FixedClock::new(
        Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0)
            .single()
            .unwrap_or_else(Utc::now),
    )
}

pub use mocks::{FixedClock, InMemoryStore};
