//! Error taxonomy shared by every service.
//!
//! One enum covers the whole business vocabulary; the `Display` strings are
//! the user-facing messages shown by the web layer, so they stay in French
//! like the rest of the user-visible surface.

use thiserror::Error;

/// Everything a boutique operation can fail with.
///
/// Business failures (`InvalidInput` through `DuplicateEmail`) are expected
/// and recovered at the request boundary: the user is sent back to the
/// originating form with the message below. `Storage` is the only variant
/// that indicates something actually broke.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A form field failed to parse as its expected numeric type.
    #[error("{0}")]
    InvalidInput(String),

    /// Order quantity was zero or negative.
    #[error("La quantité doit être positive.")]
    InvalidQuantity,

    /// Order quantity exceeds the product's remaining stock.
    #[error("Stock insuffisant pour ce produit.")]
    OutOfStock,

    /// A referenced record does not exist.
    #[error("{entity} {id} introuvable.")]
    NotFound {
        /// Kind of record ("Client", "Produit", ...)
        entity: &'static str,
        /// Identifier that failed to resolve
        id: i64,
    },

    /// A product with the same (name, category) already exists.
    #[error("Ce produit existe déjà (même nom et même catégorie).")]
    DuplicateProduct,

    /// A client with the same email already exists.
    #[error("Un client avec cet email existe déjà.")]
    DuplicateEmail,

    /// The storage backend failed.
    #[error("Erreur inattendue : {0}")]
    Storage(String),
}

impl Error {
    /// Shorthand for [`Error::NotFound`].
    #[must_use]
    pub const fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }

    /// Wraps a backend failure into [`Error::Storage`].
    pub fn storage(err: impl std::fmt::Display) -> Self {
        Self::Storage(err.to_string())
    }

    /// True for failures the user can fix by correcting the form.
    #[must_use]
    pub const fn is_business(&self) -> bool {
        !matches!(self, Self::Storage(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_user_facing() {
        assert_eq!(
            Error::OutOfStock.to_string(),
            "Stock insuffisant pour ce produit."
        );
        assert_eq!(
            Error::not_found("Produit", 9).to_string(),
            "Produit 9 introuvable."
        );
        assert_eq!(
            Error::InvalidInput("Quantité invalide.".to_string()).to_string(),
            "Quantité invalide."
        );
    }

    #[test]
    fn storage_is_not_a_business_error() {
        assert!(Error::OutOfStock.is_business());
        assert!(Error::DuplicateEmail.is_business());
        assert!(!Error::storage("connection reset").is_business());
    }
}
