//! Domain types for transaction validation and enrichment.
//!
//! The wire format uses camelCase field names (`transactionId`,
//! `validationStatus`, `processedAt`); these are fixed contracts with the
//! upstream generators and the downstream publisher.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A raw transaction record as produced by an ingestion source.
///
/// Every field is optional: upstream records may be incomplete, and a
/// missing field is a validation failure, not a decode failure. The
/// `details` payload is kept as raw JSON and interpreted by the rule set
/// selected by `type`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Transaction {
    /// Opaque unique identifier (UUID-v4-like in practice)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "123e4567-e89b-12d3-a456-426614174000")]
    pub transaction_id: Option<String>,
    /// Transaction amount
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = 100.50)]
    pub amount: Option<f64>,
    /// ISO 4217 alphabetic currency code
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "USD")]
    pub currency: Option<String>,
    /// ISO-8601 timestamp of the transaction
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "2025-01-08T10:00:00Z")]
    pub timestamp: Option<String>,
    /// Originating IPv4/IPv6 literal
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "192.168.1.1")]
    pub ip_address: Option<String>,
    /// Discriminator selecting the type rule set
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    #[schema(example = "bank_card")]
    pub transaction_type: Option<String>,
    /// Type-specific payload, validated by the matching rule set
    #[serde(skip_serializing_if = "serde_json::Value::is_null")]
    pub details: serde_json::Value,
}

/// Status attached to a transaction that passed validation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    /// All checks passed
    #[default]
    Valid,
}

impl ValidationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Valid => "valid",
        }
    }
}

impl std::str::FromStr for ValidationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "valid" => Ok(Self::Valid),
            _ => Err(format!("Invalid validation status: {}", s)),
        }
    }
}

impl std::fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A validated transaction plus enrichment metadata.
///
/// `validationStatus` and `processedAt` are fixed wire contracts with the
/// publishing adapter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedTransaction {
    /// The original transaction, unchanged
    #[serde(flatten)]
    pub transaction: Transaction,
    /// Always `"valid"` on the success path
    pub validation_status: ValidationStatus,
    /// Instant at which validation was performed
    pub processed_at: DateTime<Utc>,
}

impl EnrichedTransaction {
    /// Build an enriched record from a passing transaction. The input is
    /// taken by value; callers keep their copy untouched by cloning first.
    #[must_use]
    pub fn new(transaction: Transaction, processed_at: DateTime<Utc>) -> Self {
        Self {
            transaction,
            validation_status: ValidationStatus::Valid,
            processed_at,
        }
    }

    /// Message key for the publisher. The id presence check has already
    /// passed on the success path, so the fallback is never hit in practice.
    #[must_use]
    pub fn message_key(&self) -> &str {
        self.transaction.transaction_id.as_deref().unwrap_or("")
    }
}

/// Aggregated outcome of validating one transaction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// True iff no errors were accumulated
    pub is_valid: bool,
    /// Human-readable rule violations, in check order (common checks
    /// first, then type-specific checks)
    pub errors: Vec<String>,
    /// Remediation hints; containment-aligned with `errors` (at least one
    /// recommendation per failing category, not positionally matched)
    pub recommendations: Vec<String>,
    /// Present only when `is_valid` is true
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enriched_transaction: Option<EnrichedTransaction>,
}

impl ValidationResult {
    /// A passing result carrying the enriched record
    #[must_use]
    pub fn valid(enriched: EnrichedTransaction) -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            recommendations: Vec::new(),
            enriched_transaction: Some(enriched),
        }
    }

    /// A failing result carrying the accumulated violations
    #[must_use]
    pub fn rejected(errors: Vec<String>, recommendations: Vec<String>) -> Self {
        Self {
            is_valid: false,
            errors,
            recommendations,
            enriched_transaction: None,
        }
    }

    /// Defensive result for inputs that are not transaction-shaped at all
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::rejected(
            vec![message.into()],
            vec!["Submit the transaction as a JSON object.".to_string()],
        )
    }
}

/// Summary of a batch ingestion run
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    /// Records decoded from the source
    pub received: usize,
    /// Records that passed validation and were handed to the publisher
    pub published: usize,
    /// Records that failed validation
    pub rejected: usize,
}

/// Response for file upload requests
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Human-readable outcome description
    #[schema(example = "JSON data processed and enriched records published")]
    pub message: String,
    /// Per-batch counters
    pub summary: BatchSummary,
}

/// Query parameters for processing stored transactions
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct FetchParams {
    /// Maximum number of documents to pull from the store (1-1000, default: 100)
    #[validate(range(min = 1, max = 1000, message = "Limit must be between 1 and 1000"))]
    #[serde(default = "default_fetch_limit")]
    #[schema(example = 100)]
    pub limit: i64,
}

fn default_fetch_limit() -> i64 {
    100
}

impl Default for FetchParams {
    fn default() -> Self {
        Self {
            limit: default_fetch_limit(),
        }
    }
}

/// Health status enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// All systems operational
    Healthy,
    /// Some systems degraded but functional
    Degraded,
    /// Critical systems unavailable
    Unhealthy,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Overall system status
    pub status: HealthStatus,
    /// Document store health status
    pub store: HealthStatus,
    /// Event publisher health status
    pub publisher: HealthStatus,
    /// Current server timestamp
    pub timestamp: DateTime<Utc>,
    /// Application version
    #[schema(example = "0.1.0")]
    pub version: String,
}

impl HealthResponse {
    #[must_use]
    pub fn new(store: HealthStatus, publisher: HealthStatus) -> Self {
        let status = match (&store, &publisher) {
            (HealthStatus::Healthy, HealthStatus::Healthy) => HealthStatus::Healthy,
            (HealthStatus::Unhealthy, _) | (_, HealthStatus::Unhealthy) => HealthStatus::Unhealthy,
            _ => HealthStatus::Degraded,
        };
        Self {
            status,
            store,
            publisher,
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Error response structure
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error details
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Error type identifier
    #[schema(example = "ingest_error")]
    pub r#type: String,
    /// Human-readable error message
    #[schema(example = "Unsupported file format: xml")]
    pub message: String,
}
