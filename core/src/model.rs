//! Core domain types for the boutique.
//!
//! Four tables back the whole system: products, clients, orders, and order
//! lines. Each order carries exactly one line in the current design, even
//! though the schema allows many.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a product
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    /// Creates a new `ProductId`
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the inner integer value
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a client
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(i64);

impl ClientId {
    /// Creates a new `ClientId`
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the inner integer value
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for an order
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(i64);

impl OrderId {
    /// Creates a new `OrderId`
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the inner integer value
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A product in the catalog.
///
/// Unique on (name, category). Stock is a plain signed integer: order
/// placement never drives it negative, but a manual stock update may set any
/// value, including a negative one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Store-assigned identifier
    pub id: ProductId,
    /// Product name
    pub name: String,
    /// Product category
    pub category: String,
    /// Unit price
    pub price: f64,
    /// Quantity available for sale
    pub stock_quantity: i64,
}

impl Product {
    /// Monetary value of the remaining stock (price × quantity).
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // stock counts stay far below 2^52
    pub fn stock_value(&self) -> f64 {
        self.price * self.stock_quantity as f64
    }
}

/// Payload for inserting a product; the store assigns the id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    /// Product name
    pub name: String,
    /// Product category
    pub category: String,
    /// Unit price
    pub price: f64,
    /// Initial stock
    pub stock_quantity: i64,
}

/// A client of the boutique. Email is unique across clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Store-assigned identifier
    pub id: ClientId,
    /// Client name (duplicates allowed)
    pub name: String,
    /// Contact email, unique
    pub email: String,
}

/// Payload for inserting a client; the store assigns the id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClient {
    /// Client name
    pub name: String,
    /// Contact email
    pub email: String,
}

/// An order placed by a client. Deleting the client deletes its orders.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Store-assigned identifier
    pub id: OrderId,
    /// Client who placed the order
    pub client_id: ClientId,
    /// Day the order was placed
    pub order_date: NaiveDate,
}

/// A single product + quantity entry attached to an order.
///
/// Deleting the order or the product deletes the line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Store-assigned identifier
    pub id: i64,
    /// Order this line belongs to
    pub order_id: OrderId,
    /// Product being sold
    pub product_id: ProductId,
    /// Units sold, always > 0
    pub quantity: i64,
}
