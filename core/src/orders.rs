//! Order placement.
//!
//! The one operation with real business rules: validate the quantity,
//! resolve the client and the product, then hand the store one atomic
//! write (order + line + stock decrement).

use crate::environment::Environment;
use crate::error::Error;
use crate::model::{ClientId, Order, ProductId};

/// Service creating orders against the catalog.
#[derive(Clone)]
pub struct OrderService {
    env: Environment,
}

impl OrderService {
    /// Creates a new order service
    #[must_use]
    pub const fn new(env: Environment) -> Self {
        Self { env }
    }

    /// Places an order of `quantity` units of one product for one client.
    ///
    /// `quantity` arrives as the raw form field and is parsed here, so the
    /// whole contract lives in one place.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] if `quantity` is not an integer
    /// - [`Error::InvalidQuantity`] if it is zero or negative
    /// - [`Error::NotFound`] if the client or product does not exist
    /// - [`Error::OutOfStock`] if the product's stock cannot cover it
    pub async fn create_order(
        &self,
        client_id: ClientId,
        product_id: ProductId,
        quantity: &str,
    ) -> Result<Order, Error> {
        let quantity = parse_quantity(quantity)?;

        if quantity <= 0 {
            tracing::warn!(%client_id, %product_id, quantity, "order rejected: non-positive quantity");
            return Err(Error::InvalidQuantity);
        }

        let store = &self.env.store;
        let client = store
            .client(client_id)
            .await?
            .ok_or_else(|| Error::not_found("Client", client_id.value()))?;
        let product = store
            .product(product_id)
            .await?
            .ok_or_else(|| Error::not_found("Produit", product_id.value()))?;

        // Early rejection for the common case; the store re-checks
        // atomically when it applies the decrement.
        if quantity > product.stock_quantity {
            tracing::warn!(%product_id, quantity, stock = product.stock_quantity, "order rejected: out of stock");
            return Err(Error::OutOfStock);
        }

        let order_date = self.env.clock.now().date_naive();
        let order = store
            .place_order(client.id, product.id, quantity, order_date)
            .await?;

        tracing::info!(
            order_id = %order.id,
            client_id = %client.id,
            product_id = %product.id,
            quantity,
            "order created"
        );

        Ok(order)
    }
}

fn parse_quantity(raw: &str) -> Result<i64, Error> {
    raw.trim()
        .parse()
        .map_err(|_| Error::InvalidInput("La quantité doit être un nombre entier.".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_must_be_an_integer() {
        assert!(parse_quantity("3").is_ok());
        assert!(parse_quantity(" 12 ").is_ok());
        assert!(matches!(parse_quantity("abc"), Err(Error::InvalidInput(_))));
        assert!(matches!(parse_quantity("2.5"), Err(Error::InvalidInput(_))));
        assert!(matches!(parse_quantity(""), Err(Error::InvalidInput(_))));
    }
}
