//! `PostgreSQL` storage backend for Boutique.
//!
//! [`PostgresStore`] implements the `RetailStore` trait over a sqlx
//! connection pool. The schema lives in `migrations/` and keeps the
//! original French table names (`produits`, `clients`, `commandes`,
//! `lignes_commande`) with store-assigned `BIGSERIAL` ids and
//! `ON DELETE CASCADE` foreign keys.
//!
//! Order placement runs in a transaction whose stock check *is* the
//! decrement — a conditional `UPDATE … WHERE quantite_en_stock >= $q` —
//! so concurrent orders on the same product can never drive stock
//! negative.
//!
//! # Example
//!
//! ```ignore
//! use boutique_postgres::PostgresStore;
//!
//! async fn example() -> Result<(), boutique_core::Error> {
//!     let store = PostgresStore::connect("postgres://localhost/boutique").await?;
//!     store.migrate().await?;
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use boutique_core::error::Error;
use boutique_core::model::{
    Client, ClientId, NewClient, NewProduct, Order, OrderId, OrderLine, Product, ProductId,
};
use boutique_core::store::RetailStore;
use chrono::NaiveDate;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// `RetailStore` backed by a `PostgreSQL` connection pool.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Connects a small pool to `database_url`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the connection cannot be established.
    pub async fn connect(database_url: &str) -> Result<Self, Error> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .map_err(Error::storage)?;
        Ok(Self { pool })
    }

    /// Wraps an existing pool (used by tests).
    #[must_use]
    pub const fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies the embedded migrations.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if a migration fails.
    pub async fn migrate(&self) -> Result<(), Error> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(Error::storage)
    }
}

type ProductRow = (i64, String, String, f64, i64);

fn product_from_row((id, name, category, price, stock_quantity): ProductRow) -> Product {
    Product {
        id: ProductId::new(id),
        name,
        category,
        price,
        stock_quantity,
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}

#[async_trait]
impl RetailStore for PostgresStore {
    async fn products(&self) -> Result<Vec<Product>, Error> {
        let rows: Vec<ProductRow> = sqlx::query_as(
            "SELECT id, nom, categorie, prix, quantite_en_stock FROM produits ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Error::storage)?;
        Ok(rows.into_iter().map(product_from_row).collect())
    }

    async fn product(&self, id: ProductId) -> Result<Option<Product>, Error> {
        let row: Option<ProductRow> = sqlx::query_as(
            "SELECT id, nom, categorie, prix, quantite_en_stock FROM produits WHERE id = $1",
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::storage)?;
        Ok(row.map(product_from_row))
    }

    async fn product_by_name(&self, name: &str, category: &str) -> Result<Option<Product>, Error> {
        let row: Option<ProductRow> = sqlx::query_as(
            "SELECT id, nom, categorie, prix, quantite_en_stock FROM produits \
             WHERE nom = $1 AND categorie = $2",
        )
        .bind(name)
        .bind(category)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::storage)?;
        Ok(row.map(product_from_row))
    }

    async fn insert_product(&self, new: NewProduct) -> Result<Product, Error> {
        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO produits (nom, categorie, prix, quantite_en_stock) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&new.name)
        .bind(&new.category)
        .bind(new.price)
        .bind(new.stock_quantity)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // The service pre-checks, but the unique index is the backstop
            // under concurrent inserts.
            if is_unique_violation(&e) {
                Error::DuplicateProduct
            } else {
                Error::storage(e)
            }
        })?;

        tracing::debug!(product_id = id, name = %new.name, "product inserted");
        Ok(Product {
            id: ProductId::new(id),
            name: new.name,
            category: new.category,
            price: new.price,
            stock_quantity: new.stock_quantity,
        })
    }

    async fn update_product(&self, product: &Product) -> Result<(), Error> {
        let result = sqlx::query(
            "UPDATE produits SET nom = $2, categorie = $3, prix = $4, quantite_en_stock = $5 \
             WHERE id = $1",
        )
        .bind(product.id.value())
        .bind(&product.name)
        .bind(&product.category)
        .bind(product.price)
        .bind(product.stock_quantity)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                Error::DuplicateProduct
            } else {
                Error::storage(e)
            }
        })?;

        if result.rows_affected() == 0 {
            return Err(Error::not_found("Produit", product.id.value()));
        }
        Ok(())
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), Error> {
        let result = sqlx::query("DELETE FROM produits WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(Error::storage)?;

        if result.rows_affected() == 0 {
            return Err(Error::not_found("Produit", id.value()));
        }
        tracing::debug!(product_id = %id, "product deleted");
        Ok(())
    }

    async fn clients(&self) -> Result<Vec<Client>, Error> {
        let rows: Vec<(i64, String, String)> =
            sqlx::query_as("SELECT id, nom, email FROM clients ORDER BY id")
                .fetch_all(&self.pool)
                .await
                .map_err(Error::storage)?;
        Ok(rows
            .into_iter()
            .map(|(id, name, email)| Client {
                id: ClientId::new(id),
                name,
                email,
            })
            .collect())
    }

    async fn client(&self, id: ClientId) -> Result<Option<Client>, Error> {
        let row: Option<(i64, String, String)> =
            sqlx::query_as("SELECT id, nom, email FROM clients WHERE id = $1")
                .bind(id.value())
                .fetch_optional(&self.pool)
                .await
                .map_err(Error::storage)?;
        Ok(row.map(|(id, name, email)| Client {
            id: ClientId::new(id),
            name,
            email,
        }))
    }

    async fn insert_client(&self, new: NewClient) -> Result<Client, Error> {
        let (id,): (i64,) =
            sqlx::query_as("INSERT INTO clients (nom, email) VALUES ($1, $2) RETURNING id")
                .bind(&new.name)
                .bind(&new.email)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    if is_unique_violation(&e) {
                        Error::DuplicateEmail
                    } else {
                        Error::storage(e)
                    }
                })?;

        tracing::debug!(client_id = id, "client inserted");
        Ok(Client {
            id: ClientId::new(id),
            name: new.name,
            email: new.email,
        })
    }

    async fn delete_client(&self, id: ClientId) -> Result<(), Error> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(Error::storage)?;

        if result.rows_affected() == 0 {
            return Err(Error::not_found("Client", id.value()));
        }
        Ok(())
    }

    async fn orders(&self) -> Result<Vec<Order>, Error> {
        let rows: Vec<(i64, i64, NaiveDate)> =
            sqlx::query_as("SELECT id, client_id, date_commande FROM commandes ORDER BY id")
                .fetch_all(&self.pool)
                .await
                .map_err(Error::storage)?;
        Ok(rows
            .into_iter()
            .map(|(id, client_id, order_date)| Order {
                id: OrderId::new(id),
                client_id: ClientId::new(client_id),
                order_date,
            })
            .collect())
    }

    async fn order_lines(&self) -> Result<Vec<OrderLine>, Error> {
        let rows: Vec<(i64, i64, i64, i64)> = sqlx::query_as(
            "SELECT id, commande_id, produit_id, quantite FROM lignes_commande ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Error::storage)?;
        Ok(rows
            .into_iter()
            .map(|(id, order_id, product_id, quantity)| OrderLine {
                id,
                order_id: OrderId::new(order_id),
                product_id: ProductId::new(product_id),
                quantity,
            })
            .collect())
    }

    async fn place_order(
        &self,
        client_id: ClientId,
        product_id: ProductId,
        quantity: i64,
        order_date: NaiveDate,
    ) -> Result<Order, Error> {
        let mut tx = self.pool.begin().await.map_err(Error::storage)?;

        // The conditional decrement is the authoritative stock check: it
        // matches no row when stock is insufficient, and the row lock it
        // takes serializes concurrent orders on the same product.
        let updated = sqlx::query(
            "UPDATE produits SET quantite_en_stock = quantite_en_stock - $2 \
             WHERE id = $1 AND quantite_en_stock >= $2",
        )
        .bind(product_id.value())
        .bind(quantity)
        .execute(&mut *tx)
        .await
        .map_err(Error::storage)?;

        if updated.rows_affected() == 0 {
            let exists: Option<(i64,)> = sqlx::query_as("SELECT id FROM produits WHERE id = $1")
                .bind(product_id.value())
                .fetch_optional(&mut *tx)
                .await
                .map_err(Error::storage)?;
            // Dropping the transaction rolls it back.
            return Err(match exists {
                None => Error::not_found("Produit", product_id.value()),
                Some(_) => Error::OutOfStock,
            });
        }

        let (order_id,): (i64,) = sqlx::query_as(
            "INSERT INTO commandes (client_id, date_commande) VALUES ($1, $2) RETURNING id",
        )
        .bind(client_id.value())
        .bind(order_date)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                Error::not_found("Client", client_id.value())
            } else {
                Error::storage(e)
            }
        })?;

        sqlx::query(
            "INSERT INTO lignes_commande (commande_id, produit_id, quantite) VALUES ($1, $2, $3)",
        )
        .bind(order_id)
        .bind(product_id.value())
        .bind(quantity)
        .execute(&mut *tx)
        .await
        .map_err(Error::storage)?;

        tx.commit().await.map_err(Error::storage)?;

        tracing::info!(order_id, client_id = %client_id, product_id = %product_id, quantity, "order persisted");
        Ok(Order {
            id: OrderId::new(order_id),
            client_id,
            order_date,
        })
    }
}
