//! In-memory document store implementation.
//!
//! The real document database sits behind the [`TransactionStore`] port;
//! this adapter keeps a seedable in-memory collection for local runs and
//! tests. Documents are stored as raw JSON so malformed records reach the
//! validation dispatcher instead of failing at the boundary.

use std::sync::Mutex;

use async_trait::async_trait;
use tracing::info;

use crate::domain::{AppError, TransactionStore};

/// Seedable in-memory transaction collection
#[derive(Debug, Default)]
pub struct InMemoryTransactionStore {
    documents: Mutex<Vec<serde_json::Value>>,
}

impl InMemoryTransactionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with documents
    #[must_use]
    pub fn with_documents(documents: Vec<serde_json::Value>) -> Self {
        info!(count = documents.len(), "Seeding in-memory store");
        Self {
            documents: Mutex::new(documents),
        }
    }

    /// Append a document to the collection
    pub fn insert(&self, document: serde_json::Value) {
        self.documents.lock().unwrap().push(document);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.lock().unwrap().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl TransactionStore for InMemoryTransactionStore {
    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn fetch_transactions(&self, limit: i64) -> Result<Vec<serde_json::Value>, AppError> {
        let documents = self.documents.lock().unwrap();
        let limit = usize::try_from(limit.max(0)).unwrap_or(0);
        Ok(documents.iter().take(limit).cloned().collect())
    }
}
