//! Injected dependencies.
//!
//! Services receive their store and clock through [`Environment`] rather
//! than constructing them, so tests can swap in the in-memory store and a
//! fixed clock.

use crate::store::RetailStore;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Clock trait - abstracts time operations for testability
pub trait Clock: Send + Sync {
    /// Get the current time
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Dependency bundle handed to every service.
#[derive(Clone)]
pub struct Environment {
    /// The storage backend
    pub store: Arc<dyn RetailStore>,
    /// Clock used to date new orders
    pub clock: Arc<dyn Clock>,
}

impl Environment {
    /// Creates a new environment
    #[must_use]
    pub fn new(store: Arc<dyn RetailStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }
}
