//! Domain layer containing core business types, traits, and error definitions.

pub mod error;
pub mod traits;
pub mod types;

pub use error::{AppError, ConfigError, IngestError, PublishError, StoreError};
pub use traits::{EventPublisher, TransactionStore};
pub use types::{
    BatchSummary, EnrichedTransaction, ErrorDetail, ErrorResponse, FetchParams, HealthResponse,
    HealthStatus, Transaction, UploadResponse, ValidationResult, ValidationStatus,
};
