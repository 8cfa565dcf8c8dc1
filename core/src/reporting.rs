//! Dashboard reporting.
//!
//! [`compute_dashboard`] is a pure function over the loaded collections:
//! it joins order lines to products and orders, then aggregates five
//! metrics. Keeping it pure means the whole engine is testable at memory
//! speed; [`ReportingService`] only loads and delegates.

use crate::environment::Environment;
use crate::error::Error;
use crate::model::{Order, OrderId, OrderLine, Product, ProductId};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// The five aggregate metrics shown on the dashboard.
///
/// Containers are ordered (`BTreeMap`, sorted `Vec`) so that computing the
/// metrics twice over the same data yields identical output.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DashboardMetrics {
    /// Revenue (Σ price × quantity) per calendar month, keyed `YYYY-MM`.
    pub revenue_by_month: BTreeMap<String, f64>,
    /// Units sold per product name, ordered by descending total.
    /// Ties keep first-seen order.
    pub units_by_product: Vec<(String, i64)>,
    /// Σ price × `stock_quantity` over the whole catalog, orders or not.
    pub total_stock_value: f64,
    /// Mean of per-order totals; `None` when no order has a line.
    pub average_basket: Option<f64>,
    /// Number of orders per client id.
    pub client_order_frequency: BTreeMap<i64, u64>,
}

/// Joins the three collections and computes the dashboard metrics.
///
/// If any collection is empty the result is all-empty/zero — a deliberate
/// short-circuit, not an error. Lines whose product or order cannot be
/// resolved are skipped; the store's cascade deletes make that a
/// can't-happen in practice.
#[must_use]
#[allow(clippy::cast_precision_loss)] // quantities and counts stay far below 2^52
pub fn compute_dashboard(
    products: &[Product],
    orders: &[Order],
    lines: &[OrderLine],
) -> DashboardMetrics {
    if products.is_empty() || orders.is_empty() || lines.is_empty() {
        return DashboardMetrics::default();
    }

    let products_by_id: HashMap<ProductId, &Product> =
        products.iter().map(|p| (p.id, p)).collect();
    let orders_by_id: HashMap<OrderId, &Order> = orders.iter().map(|o| (o.id, o)).collect();

    let mut revenue_by_month: BTreeMap<String, f64> = BTreeMap::new();
    let mut units_by_product: Vec<(String, i64)> = Vec::new();
    let mut order_totals: BTreeMap<OrderId, f64> = BTreeMap::new();

    for line in lines {
        let Some(product) = products_by_id.get(&line.product_id) else {
            continue;
        };
        let Some(order) = orders_by_id.get(&line.order_id) else {
            continue;
        };

        let amount = product.price * line.quantity as f64;

        let month = order.order_date.format("%Y-%m").to_string();
        *revenue_by_month.entry(month).or_insert(0.0) += amount;

        match units_by_product
            .iter_mut()
            .find(|(name, _)| *name == product.name)
        {
            Some((_, total)) => *total += line.quantity,
            None => units_by_product.push((product.name.clone(), line.quantity)),
        }

        *order_totals.entry(line.order_id).or_insert(0.0) += amount;
    }

    // Stable sort: products with equal totals keep first-seen order.
    units_by_product.sort_by(|a, b| b.1.cmp(&a.1));

    let total_stock_value = products.iter().map(Product::stock_value).sum();

    let average_basket = if order_totals.is_empty() {
        None
    } else {
        Some(order_totals.values().sum::<f64>() / order_totals.len() as f64)
    };

    let mut client_order_frequency: BTreeMap<i64, u64> = BTreeMap::new();
    for order in orders {
        *client_order_frequency
            .entry(order.client_id.value())
            .or_insert(0) += 1;
    }

    DashboardMetrics {
        revenue_by_month,
        units_by_product,
        total_stock_value,
        average_basket,
        client_order_frequency,
    }
}

/// Service loading the three collections and computing the dashboard.
#[derive(Clone)]
pub struct ReportingService {
    env: Environment,
}

impl ReportingService {
    /// Creates a new reporting service
    #[must_use]
    pub const fn new(env: Environment) -> Self {
        Self { env }
    }

    /// Loads products, orders and lines, then computes the metrics.
    ///
    /// # Errors
    ///
    /// [`Error::Storage`] if any collection fails to load.
    pub async fn dashboard(&self) -> Result<DashboardMetrics, Error> {
        let store = &self.env.store;
        let products = store.products().await?;
        let orders = store.orders().await?;
        let lines = store.order_lines().await?;
        Ok(compute_dashboard(&products, &orders, &lines))
    }
}
