//! The storage seam.
//!
//! [`RetailStore`] is the trait behind which every backend lives. The
//! services only ever talk to `Arc<dyn RetailStore>`; production wires in
//! the PostgreSQL implementation, tests and demos the in-memory one.
//!
//! Relational integrity is the store's job: deleting a client deletes its
//! orders, deleting an order or a product deletes its lines. Identifier
//! assignment is also the store's job (sequences in PostgreSQL, atomic
//! counters in memory) — callers never pick ids.

use crate::error::Error;
use crate::model::{Client, ClientId, NewClient, NewProduct, Order, OrderId, OrderLine, Product, ProductId};
use async_trait::async_trait;
use chrono::NaiveDate;

/// CRUD over the four tables, plus the one transactional write.
///
/// All methods return [`Error::Storage`] when the backend itself fails;
/// the per-method docs list the business errors they can produce.
#[async_trait]
pub trait RetailStore: Send + Sync {
    /// All products, in insertion order.
    async fn products(&self) -> Result<Vec<Product>, Error>;

    /// A single product by id.
    async fn product(&self, id: ProductId) -> Result<Option<Product>, Error>;

    /// A product by its (name, category) pair, the catalog's natural key.
    async fn product_by_name(&self, name: &str, category: &str) -> Result<Option<Product>, Error>;

    /// Inserts a product and returns it with its assigned id.
    async fn insert_product(&self, new: NewProduct) -> Result<Product, Error>;

    /// Overwrites every field of an existing product.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if the product no longer exists.
    async fn update_product(&self, product: &Product) -> Result<(), Error>;

    /// Deletes a product; its order lines go with it.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if the product does not exist.
    async fn delete_product(&self, id: ProductId) -> Result<(), Error>;

    /// All clients, in insertion order.
    async fn clients(&self) -> Result<Vec<Client>, Error>;

    /// A single client by id.
    async fn client(&self, id: ClientId) -> Result<Option<Client>, Error>;

    /// Inserts a client and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateEmail`] if the email is already taken.
    async fn insert_client(&self, new: NewClient) -> Result<Client, Error>;

    /// Deletes a client; its orders (and their lines) go with it.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if the client does not exist.
    async fn delete_client(&self, id: ClientId) -> Result<(), Error>;

    /// All orders, in insertion order.
    async fn orders(&self) -> Result<Vec<Order>, Error>;

    /// All order lines, in insertion order.
    async fn order_lines(&self) -> Result<Vec<OrderLine>, Error>;

    /// Creates an order with its single line and decrements the product's
    /// stock, as one atomic unit.
    ///
    /// The stock check *is* the decrement: a conditional update that only
    /// succeeds while `stock_quantity >= quantity`, so two concurrent orders
    /// can never drive stock negative. Nothing is written unless everything
    /// is.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if the client or product does not exist
    /// - [`Error::OutOfStock`] if the conditional decrement matches no row
    async fn place_order(
        &self,
        client_id: ClientId,
        product_id: ProductId,
        quantity: i64,
        order_date: NaiveDate,
    ) -> Result<Order, Error>;
}
