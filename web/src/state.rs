//! Application state shared across all HTTP handlers.

use crate::templates;
use boutique_core::{CatalogService, Environment, OrderService, ReportingService};
use std::sync::Arc;
use tera::Tera;

/// Everything a handler needs: the three services, the environment (for
/// read-only listings), and the compiled templates.
#[derive(Clone)]
pub struct AppState {
    /// Injected dependencies (store + clock)
    pub env: Environment,
    /// Order placement
    pub orders: OrderService,
    /// Product and client maintenance
    pub catalog: CatalogService,
    /// Dashboard metrics
    pub reporting: ReportingService,
    /// Compiled page templates
    pub templates: Arc<Tera>,
}

impl AppState {
    /// Builds the state from an environment, compiling the templates.
    ///
    /// # Errors
    ///
    /// Returns a `tera::Error` if a template fails to compile; that is a
    /// packaging defect, so the caller should abort startup.
    pub fn new(env: Environment) -> Result<Self, tera::Error> {
        Ok(Self {
            orders: OrderService::new(env.clone()),
            catalog: CatalogService::new(env.clone()),
            reporting: ReportingService::new(env.clone()),
            templates: Arc::new(templates::build()?),
            env,
        })
    }
}
