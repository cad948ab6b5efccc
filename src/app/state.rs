//! Application state management.

use std::sync::Arc;

use crate::domain::{EventPublisher, TransactionStore};
use crate::validation::TransactionValidator;

use super::service::AnalyserService;

/// Shared application state. The service owns the port adapters; handlers
/// reach everything through it.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AnalyserService>,
}

impl AppState {
    /// Create a new application state with the default rule sets
    #[must_use]
    pub fn new(publisher: Arc<dyn EventPublisher>, store: Arc<dyn TransactionStore>) -> Self {
        Self {
            service: Arc::new(AnalyserService::new(publisher, store)),
        }
    }

    /// Create a new application state with a pre-configured validator
    /// (builder for deployments that register extra rule sets)
    #[must_use]
    pub fn with_validator(
        validator: TransactionValidator,
        publisher: Arc<dyn EventPublisher>,
        store: Arc<dyn TransactionStore>,
    ) -> Self {
        Self {
            service: Arc::new(AnalyserService::with_validator(validator, publisher, store)),
        }
    }
}
