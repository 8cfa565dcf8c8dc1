//! # Boutique Core
//!
//! Domain model and services for the Boutique retail management system.
//!
//! This crate contains everything that does not touch HTTP or SQL:
//!
//! - **Model**: `Product`, `Client`, `Order`, `OrderLine` and their id newtypes
//! - **Store**: the [`store::RetailStore`] trait, the seam behind which any
//!   storage backend lives (PostgreSQL in production, an in-memory store in
//!   tests and demos)
//! - **Environment**: injected dependencies ([`environment::Clock`], store)
//! - **Services**: order placement, catalog maintenance, dashboard reporting
//!
//! ## Architecture Principles
//!
//! - Business rules live in the services and are validated before anything
//!   is written
//! - All external dependencies are abstracted behind traits and injected
//!   via [`environment::Environment`]
//! - Every operation returns `Result<_, Error>`; the web layer decides how
//!   failures are shown to the user

pub mod catalog;
pub mod environment;
pub mod error;
pub mod model;
pub mod orders;
pub mod reporting;
pub mod store;

pub use catalog::CatalogService;
pub use environment::{Clock, Environment, SystemClock};
pub use error::Error;
pub use model::{Client, ClientId, NewClient, NewProduct, Order, OrderId, OrderLine, Product, ProductId};
pub use orders::OrderService;
pub use reporting::{DashboardMetrics, ReportingService};
pub use store::RetailStore;
