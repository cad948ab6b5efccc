//! Application service layer orchestrating validation and publishing.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::domain::{
    AppError, BatchSummary, EventPublisher, HealthResponse, HealthStatus, TransactionStore,
    ValidationResult,
};
use crate::validation::TransactionValidator;

/// Orchestrates decode -> validate -> enrich -> publish for single
/// records, uploaded batches, and stored documents.
pub struct AnalyserService {
    validator: TransactionValidator,
    publisher: Arc<dyn EventPublisher>,
    store: Arc<dyn TransactionStore>,
}

impl AnalyserService {
    #[must_use]
    pub fn new(publisher: Arc<dyn EventPublisher>, store: Arc<dyn TransactionStore>) -> Self {
        Self {
            validator: TransactionValidator::new(),
            publisher,
            store,
        }
    }

    /// Create a service with a custom validator (extra rule sets registered).
    #[must_use]
    pub fn with_validator(
        validator: TransactionValidator,
        publisher: Arc<dyn EventPublisher>,
        store: Arc<dyn TransactionStore>,
    ) -> Self {
        Self {
            validator,
            publisher,
            store,
        }
    }

    /// Validate a single document without publishing. Pure with respect to
    /// collaborators; always returns a complete result.
    #[must_use]
    pub fn validate_document(&self, document: &serde_json::Value) -> ValidationResult {
        self.validator.validate_json(document)
    }

    /// Validate one document and, on success, hand the enriched record to
    /// the publisher.
    ///
    /// Publishing is fire-and-forget by policy: a failed publish is logged
    /// and the validation result is returned unchanged. Validation
    /// correctness never depends on publish success.
    #[instrument(skip(self, document))]
    pub async fn process_document(&self, document: &serde_json::Value) -> ValidationResult {
        let result = self.validator.validate_json(document);

        if let Some(enriched) = &result.enriched_transaction {
            if let Err(e) = self.publisher.publish_enriched(enriched).await {
                warn!(
                    transaction_id = %enriched.message_key(),
                    error = %e,
                    "Publish failed, enriched record dropped"
                );
            }
        } else {
            info!(
                error_count = result.errors.len(),
                "Transaction rejected by validation"
            );
        }

        result
    }

    /// Process a decoded batch, one dispatcher call per record.
    ///
    /// `published` counts records handed to the publisher, which by the
    /// fire-and-forget policy includes records whose publish then failed.
    #[instrument(skip(self, documents), fields(count = documents.len()))]
    pub async fn process_batch(&self, documents: &[serde_json::Value]) -> BatchSummary {
        let mut summary = BatchSummary {
            received: documents.len(),
            ..BatchSummary::default()
        };

        for document in documents {
            let result = self.process_document(document).await;
            if result.is_valid {
                summary.published += 1;
            } else {
                summary.rejected += 1;
            }
        }

        info!(
            received = summary.received,
            published = summary.published,
            rejected = summary.rejected,
            "Batch processing complete"
        );

        summary
    }

    /// Pull up to `limit` documents from the store and process them.
    #[instrument(skip(self))]
    pub async fn process_stored(&self, limit: i64) -> Result<BatchSummary, AppError> {
        let documents = self.store.fetch_transactions(limit).await?;
        Ok(self.process_batch(&documents).await)
    }

    /// Perform health check on all dependencies
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> HealthResponse {
        let store_health = match self.store.health_check().await {
            Ok(()) => HealthStatus::Healthy,
            Err(_) => HealthStatus::Unhealthy,
        };
        let publisher_health = match self.publisher.health_check().await {
            Ok(()) => HealthStatus::Healthy,
            Err(_) => HealthStatus::Unhealthy,
        };
        HealthResponse::new(store_health, publisher_health)
    }
}
