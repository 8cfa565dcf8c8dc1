//! Catalog maintenance: products and clients.
//!
//! Duplicate products are rejected by a check before insertion, matching
//! the original behavior; the store's unique index is the backstop under
//! concurrency. Stock updates overwrite unconditionally — negative values
//! are accepted on purpose (documented behavior).

use crate::environment::Environment;
use crate::error::Error;
use crate::model::{Client, NewClient, NewProduct, Product, ProductId};

/// Service maintaining the product catalog and the client list.
#[derive(Clone)]
pub struct CatalogService {
    env: Environment,
}

impl CatalogService {
    /// Creates a new catalog service
    #[must_use]
    pub const fn new(env: Environment) -> Self {
        Self { env }
    }

    /// Adds a product. `price` and `stock_quantity` arrive as raw form
    /// fields and are parsed here.
    ///
    /// # Errors
    ///
    /// - [`Error::DuplicateProduct`] if (name, category) already exists
    /// - [`Error::InvalidInput`] if price or stock fail to parse
    pub async fn add_product(
        &self,
        name: &str,
        category: &str,
        price: &str,
        stock_quantity: &str,
    ) -> Result<Product, Error> {
        let store = &self.env.store;

        if store.product_by_name(name, category).await?.is_some() {
            tracing::warn!(name, category, "product rejected: duplicate");
            return Err(Error::DuplicateProduct);
        }

        let (price, stock_quantity) = parse_price_and_stock(price, stock_quantity)?;

        let product = store
            .insert_product(NewProduct {
                name: name.to_string(),
                category: category.to_string(),
                price,
                stock_quantity,
            })
            .await?;

        tracing::info!(product_id = %product.id, name, category, "product added");
        Ok(product)
    }

    /// Adds a client. Names may repeat; the store enforces email uniqueness.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateEmail`] if the email is already taken.
    pub async fn add_client(&self, name: &str, email: &str) -> Result<Client, Error> {
        let client = self
            .env
            .store
            .insert_client(NewClient {
                name: name.to_string(),
                email: email.to_string(),
            })
            .await?;

        tracing::info!(client_id = %client.id, "client added");
        Ok(client)
    }

    /// Overwrites a product's stock with `new_quantity`, parsed from the
    /// raw form field. No floor: negative values are stored verbatim.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if the product does not exist
    /// - [`Error::InvalidInput`] if `new_quantity` is not an integer
    pub async fn update_stock(
        &self,
        product_id: ProductId,
        new_quantity: &str,
    ) -> Result<Product, Error> {
        let store = &self.env.store;
        let mut product = store
            .product(product_id)
            .await?
            .ok_or_else(|| Error::not_found("Produit", product_id.value()))?;

        product.stock_quantity = new_quantity
            .trim()
            .parse()
            .map_err(|_| Error::InvalidInput("Quantité invalide.".to_string()))?;

        store.update_product(&product).await?;
        tracing::info!(product_id = %product.id, stock = product.stock_quantity, "stock updated");
        Ok(product)
    }

    /// Edits every field of an existing product.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if the product does not exist
    /// - [`Error::InvalidInput`] if price or stock fail to parse
    /// - [`Error::DuplicateProduct`] if the new (name, category) belongs to
    ///   a different product
    pub async fn update_product(
        &self,
        product_id: ProductId,
        name: &str,
        category: &str,
        price: &str,
        stock_quantity: &str,
    ) -> Result<Product, Error> {
        let store = &self.env.store;
        store
            .product(product_id)
            .await?
            .ok_or_else(|| Error::not_found("Produit", product_id.value()))?;

        if let Some(other) = store.product_by_name(name, category).await? {
            if other.id != product_id {
                return Err(Error::DuplicateProduct);
            }
        }

        let (price, stock_quantity) = parse_price_and_stock(price, stock_quantity)?;

        let product = Product {
            id: product_id,
            name: name.to_string(),
            category: category.to_string(),
            price,
            stock_quantity,
        };
        store.update_product(&product).await?;

        tracing::info!(product_id = %product.id, "product updated");
        Ok(product)
    }

    /// Deletes a product; the store cascades to its order lines.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if the product does not exist.
    pub async fn delete_product(&self, product_id: ProductId) -> Result<(), Error> {
        self.env.store.delete_product(product_id).await?;
        tracing::info!(%product_id, "product deleted");
        Ok(())
    }
}

fn parse_price_and_stock(price: &str, stock: &str) -> Result<(f64, i64), Error> {
    let invalid = || Error::InvalidInput("Prix ou quantité invalide.".to_string());
    let price: f64 = price.trim().parse().map_err(|_| invalid())?;
    let stock: i64 = stock.trim().parse().map_err(|_| invalid())?;
    Ok((price, stock))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_and_stock_both_validated() {
        assert_eq!(parse_price_and_stock("19.99", "5"), Ok((19.99, 5)));
        assert!(parse_price_and_stock("dix", "5").is_err());
        assert!(parse_price_and_stock("10", "cinq").is_err());
        // stock must be an integer, not merely numeric
        assert!(parse_price_and_stock("10", "5.5").is_err());
    }
}
