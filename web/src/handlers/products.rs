//! Product pages: listing, creation, edition, stock update, deletion.

use crate::flash::Flash;
use crate::handlers::render;
use crate::state::AppState;
use crate::{AppError, WebResult};
use axum::extract::{Path, Query, State};
use axum::response::{Html, Redirect};
use axum::Form;
use boutique_core::{Error, Product, ProductId};
use serde::Deserialize;

/// Form fields for creating or editing a product. Numeric fields arrive as
/// raw strings; the catalog service owns their validation.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductForm {
    /// Product name
    pub nom: String,
    /// Product category
    pub categorie: String,
    /// Unit price
    pub prix: String,
    /// Stock quantity
    pub quantite_en_stock: String,
}

/// Form field for the stock-update page.
#[derive(Debug, Clone, Deserialize)]
pub struct StockForm {
    /// New stock quantity, overwrites unconditionally
    pub quantite_en_stock: String,
}

/// GET `/` — the product list.
pub async fn list_products(
    State(state): State<AppState>,
    Query(flash): Query<Flash>,
) -> WebResult<Html<String>> {
    let produits = state.env.store.products().await?;

    let mut ctx = tera::Context::new();
    ctx.insert("produits", &produits);
    ctx.insert("flash", &flash);
    render(&state, "produits_list.html", &ctx)
}

/// GET `/produits/ajouter/` — the new-product form.
pub async fn new_product_form(
    State(state): State<AppState>,
    Query(flash): Query<Flash>,
) -> WebResult<Html<String>> {
    let mut ctx = tera::Context::new();
    ctx.insert("produit", &None::<Product>);
    ctx.insert("flash", &flash);
    render(&state, "produit_form.html", &ctx)
}

/// POST `/produits/ajouter/` — create a product.
///
/// Every failure (duplicate, malformed numbers, storage) sends the user
/// back to the form with the message; success lands on the product list.
pub async fn create_product(
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> Redirect {
    match state
        .catalog
        .add_product(&form.nom, &form.categorie, &form.prix, &form.quantite_en_stock)
        .await
    {
        Ok(_) => Flash::notice("Produit ajouté avec succès.").redirect_to("/"),
        Err(err) => Flash::error(err.to_string()).redirect_to("/produits/ajouter/"),
    }
}

/// GET `/produits/{id}/modifier/` — the edit form, prefilled.
pub async fn edit_product_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(flash): Query<Flash>,
) -> WebResult<Html<String>> {
    let produit = state
        .env
        .store
        .product(ProductId::new(id))
        .await?
        .ok_or_else(|| AppError::from(Error::not_found("Produit", id)))?;

    let mut ctx = tera::Context::new();
    ctx.insert("produit", &Some(produit));
    ctx.insert("flash", &flash);
    render(&state, "produit_form.html", &ctx)
}

/// POST `/produits/{id}/modifier/` — apply the edit.
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<ProductForm>,
) -> Result<Redirect, AppError> {
    let product_id = ProductId::new(id);
    match state
        .catalog
        .update_product(product_id, &form.nom, &form.categorie, &form.prix, &form.quantite_en_stock)
        .await
    {
        Ok(_) => Ok(Flash::notice("Produit modifié avec succès.").redirect_to("/")),
        Err(err @ Error::NotFound { .. }) => Err(AppError::from(err)),
        Err(err) => {
            Ok(Flash::error(err.to_string())
                .redirect_to(&format!("/produits/{product_id}/modifier/")))
        },
    }
}

/// GET `/produits/{id}/modifier_stock/` — the stock form, prefilled.
pub async fn update_stock_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(flash): Query<Flash>,
) -> WebResult<Html<String>> {
    let produit = state
        .env
        .store
        .product(ProductId::new(id))
        .await?
        .ok_or_else(|| AppError::from(Error::not_found("Produit", id)))?;

    let mut ctx = tera::Context::new();
    ctx.insert("produit", &produit);
    ctx.insert("flash", &flash);
    render(&state, "stock_update.html", &ctx)
}

/// POST `/produits/{id}/modifier_stock/` — overwrite the stock.
pub async fn update_stock(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<StockForm>,
) -> Result<Redirect, AppError> {
    let product_id = ProductId::new(id);
    match state
        .catalog
        .update_stock(product_id, &form.quantite_en_stock)
        .await
    {
        Ok(_) => Ok(Flash::notice("Stock mis à jour.").redirect_to("/")),
        Err(err @ Error::NotFound { .. }) => Err(AppError::from(err)),
        Err(err) => {
            Ok(Flash::error(err.to_string())
                .redirect_to(&format!("/produits/{product_id}/modifier_stock/")))
        },
    }
}

/// POST `/produits/{id}/supprimer/` — delete the product.
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    match state.catalog.delete_product(ProductId::new(id)).await {
        Ok(()) => Ok(Flash::notice("Produit supprimé avec succès.").redirect_to("/")),
        Err(err @ Error::NotFound { .. }) => Err(AppError::from(err)),
        Err(err) => Ok(Flash::error(err.to_string()).redirect_to("/")),
    }
}
