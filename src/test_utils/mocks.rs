//! Mock implementations for testing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::{
    AppError, EnrichedTransaction, EventPublisher, PublishError, StoreError, TransactionStore,
};

/// Configuration for mock behavior
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    pub should_fail: bool,
    pub error_message: Option<String>,
}

impl MockConfig {
    #[must_use]
    pub fn success() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            should_fail: true,
            error_message: Some(message.into()),
        }
    }
}

/// Mock publisher that records everything handed to it
pub struct MockPublisher {
    published: Arc<Mutex<Vec<EnrichedTransaction>>>,
    config: MockConfig,
    is_healthy: AtomicBool,
}

impl MockPublisher {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MockConfig::success())
    }

    #[must_use]
    pub fn with_config(config: MockConfig) -> Self {
        let healthy = !config.should_fail;
        Self {
            published: Arc::new(Mutex::new(Vec::new())),
            config,
            is_healthy: AtomicBool::new(healthy),
        }
    }

    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_config(MockConfig::failure(message))
    }

    pub fn set_healthy(&self, healthy: bool) {
        self.is_healthy.store(healthy, Ordering::Relaxed);
    }

    /// All enriched transactions published so far (for assertions)
    #[must_use]
    pub fn published(&self) -> Vec<EnrichedTransaction> {
        self.published.lock().unwrap().clone()
    }

    fn check_should_fail(&self) -> Result<(), AppError> {
        if self.config.should_fail {
            let msg = self
                .config
                .error_message
                .clone()
                .unwrap_or_else(|| "Mock error".to_string());
            return Err(AppError::Publish(PublishError::Connection(msg)));
        }
        Ok(())
    }
}

impl Default for MockPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for MockPublisher {
    async fn health_check(&self) -> Result<(), AppError> {
        if !self.is_healthy.load(Ordering::Relaxed) {
            return Err(AppError::Publish(PublishError::Connection(
                "Unhealthy".to_string(),
            )));
        }
        self.check_should_fail()
    }

    async fn publish_enriched(&self, transaction: &EnrichedTransaction) -> Result<(), AppError> {
        self.check_should_fail()?;
        self.published.lock().unwrap().push(transaction.clone());
        Ok(())
    }
}

/// Mock document store backed by a vector of documents
pub struct MockTransactionStore {
    documents: Arc<Mutex<Vec<serde_json::Value>>>,
    config: MockConfig,
    is_healthy: AtomicBool,
}

impl MockTransactionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MockConfig::success())
    }

    #[must_use]
    pub fn with_config(config: MockConfig) -> Self {
        let healthy = !config.should_fail;
        Self {
            documents: Arc::new(Mutex::new(Vec::new())),
            config,
            is_healthy: AtomicBool::new(healthy),
        }
    }

    #[must_use]
    pub fn with_documents(documents: Vec<serde_json::Value>) -> Self {
        let store = Self::new();
        *store.documents.lock().unwrap() = documents;
        store
    }

    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_config(MockConfig::failure(message))
    }

    pub fn set_healthy(&self, healthy: bool) {
        self.is_healthy.store(healthy, Ordering::Relaxed);
    }

    pub fn insert(&self, document: serde_json::Value) {
        self.documents.lock().unwrap().push(document);
    }

    fn check_should_fail(&self) -> Result<(), AppError> {
        if self.config.should_fail {
            let msg = self
                .config
                .error_message
                .clone()
                .unwrap_or_else(|| "Mock error".to_string());
            return Err(AppError::Store(StoreError::Query(msg)));
        }
        Ok(())
    }
}

impl Default for MockTransactionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TransactionStore for MockTransactionStore {
    async fn health_check(&self) -> Result<(), AppError> {
        if !self.is_healthy.load(Ordering::Relaxed) {
            return Err(AppError::Store(StoreError::Connection(
                "Unhealthy".to_string(),
            )));
        }
        self.check_should_fail()
    }

    async fn fetch_transactions(&self, limit: i64) -> Result<Vec<serde_json::Value>, AppError> {
        self.check_should_fail()?;
        let documents = self.documents.lock().unwrap();
        let limit = usize::try_from(limit.max(0)).unwrap_or(0);
        Ok(documents.iter().take(limit).cloned().collect())
    }
}
