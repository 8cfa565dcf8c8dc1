//! Axum web application for the Boutique retail management system.
//!
//! The HTTP surface is a classic server-rendered form application:
//!
//! 1. **GET** shows a page or a form (rendered with tera)
//! 2. **POST** submits the form, the handler calls the matching service
//! 3. On success: redirect with a success notification
//! 4. On a business error: redirect back to the form with the error message
//!
//! Notifications travel across redirects as query parameters (see
//! [`flash::Flash`]); only genuinely broken requests (unknown ids on GET,
//! storage failures while rendering) become error responses via
//! [`error::AppError`].

pub mod error;
pub mod flash;
pub mod handlers;
pub mod router;
pub mod state;
pub mod templates;

pub use error::AppError;
pub use flash::Flash;
pub use router::router;
pub use state::AppState;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
