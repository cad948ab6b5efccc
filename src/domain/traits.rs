//! Domain traits defining contracts for external systems.

use async_trait::async_trait;

use super::error::AppError;
use super::types::EnrichedTransaction;

/// Publisher trait for emitting enriched transactions downstream.
///
/// Implementations own all broker connectivity, retries, and failure
/// isolation. The validation path treats publishing as fire-and-forget:
/// a failed publish is logged by the caller and never turned into a
/// validation failure.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Check broker/proxy connectivity
    async fn health_check(&self) -> Result<(), AppError>;

    /// Publish one enriched transaction, keyed by its transaction id
    async fn publish_enriched(&self, transaction: &EnrichedTransaction) -> Result<(), AppError>;
}

/// Document store trait for pulling raw transaction records.
///
/// Documents are returned as raw JSON values: the store does not decode
/// them into [`super::types::Transaction`], since malformed documents must
/// flow into the validation dispatcher rather than fail at the boundary.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Check store connectivity
    async fn health_check(&self) -> Result<(), AppError>;

    /// Fetch up to `limit` stored transaction documents
    async fn fetch_transactions(&self, limit: i64) -> Result<Vec<serde_json::Value>, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Transaction;
    use chrono::Utc;

    // Minimal implementations exercising the trait object surface
    struct NoopPublisher;

    #[async_trait]
    impl EventPublisher for NoopPublisher {
        async fn health_check(&self) -> Result<(), AppError> {
            Ok(())
        }

        async fn publish_enriched(
            &self,
            _transaction: &EnrichedTransaction,
        ) -> Result<(), AppError> {
            Ok(())
        }
    }

    struct EmptyStore;

    #[async_trait]
    impl TransactionStore for EmptyStore {
        async fn health_check(&self) -> Result<(), AppError> {
            Ok(())
        }

        async fn fetch_transactions(
            &self,
            _limit: i64,
        ) -> Result<Vec<serde_json::Value>, AppError> {
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn test_trait_objects_are_usable() {
        let publisher: Box<dyn EventPublisher> = Box::new(NoopPublisher);
        let store: Box<dyn TransactionStore> = Box::new(EmptyStore);

        let enriched = EnrichedTransaction::new(Transaction::default(), Utc::now());
        assert!(publisher.publish_enriched(&enriched).await.is_ok());
        assert!(store.fetch_transactions(10).await.unwrap().is_empty());
    }
}
