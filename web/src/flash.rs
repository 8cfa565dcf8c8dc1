//! Flash notifications.
//!
//! Success and error messages survive the POST → redirect → GET cycle as
//! query parameters: the POST handler encodes the message into the
//! redirect target, the GET handler extracts it with `Query<Flash>` and
//! hands it to the page template.

use axum::response::Redirect;
use serde::{Deserialize, Serialize};

/// A notification carried across one redirect.
///
/// At most one of the two fields is set. Both absent is the quiet default
/// for pages reached by plain navigation.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct Flash {
    /// Success message, shown highlighted
    pub notice: Option<String>,
    /// Error message, shown as a warning
    pub error: Option<String>,
}

impl Flash {
    /// A success notification.
    #[must_use]
    pub fn notice(message: impl Into<String>) -> Self {
        Self {
            notice: Some(message.into()),
            error: None,
        }
    }

    /// An error notification.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            notice: None,
            error: Some(message.into()),
        }
    }

    /// A redirect to `path` carrying this notification.
    #[must_use]
    pub fn redirect_to(&self, path: &str) -> Redirect {
        match serde_urlencoded::to_string(self) {
            Ok(query) if !query.is_empty() => Redirect::to(&format!("{path}?{query}")),
            _ => Redirect::to(path),
        }
    }
}
