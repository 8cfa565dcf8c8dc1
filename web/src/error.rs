//! Error types for web handlers.
//!
//! Business failures never reach this module — handlers turn them into
//! flash redirects. [`AppError`] covers what remains: unknown ids on GET
//! pages (404) and storage or rendering failures (500).

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use boutique_core::Error;
use std::fmt;

/// Application error type for web handlers.
///
/// Implements Axum's `IntoResponse` so handlers can use `?` on anything
/// convertible into it.
#[derive(Debug)]
pub struct AppError {
    /// HTTP status code
    status: StatusCode,
    /// User-facing message
    message: String,
}

impl AppError {
    /// Create a new application error.
    #[must_use]
    pub const fn new(status: StatusCode, message: String) -> Self {
        Self { status, message }
    }

    /// Create a 404 Not Found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message.into())
    }

    /// Create a 500 Internal Server Error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message.into())
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.status, self.message)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, message = %self.message, "request failed");
        }

        let body = format!(
            "<!DOCTYPE html>\n<html lang=\"fr\"><head><meta charset=\"utf-8\">\
             <title>Erreur</title></head>\
             <body><h1>{}</h1><p>{}</p><p><a href=\"/\">Retour aux produits</a></p></body></html>",
            self.status, self.message
        );
        (self.status, Html(body)).into_response()
    }
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        match err {
            Error::NotFound { .. } => Self::not_found(err.to_string()),
            Error::Storage(_) => {
                tracing::error!(error = %err, "storage failure");
                Self::internal("Erreur inattendue, veuillez réessayer.")
            },
            // Business errors are handled by the POST handlers; reaching
            // here means a GET page tripped one, which reads as a bad
            // request.
            other => Self::new(StatusCode::BAD_REQUEST, other.to_string()),
        }
    }
}

impl From<tera::Error> for AppError {
    fn from(err: tera::Error) -> Self {
        tracing::error!(error = %err, "template rendering failed");
        Self::internal("Erreur inattendue, veuillez réessayer.")
    }
}
