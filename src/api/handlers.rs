//! HTTP request handlers with OpenAPI documentation.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{error, info};
use utoipa::OpenApi;
use validator::Validate;

use crate::app::AppState;
use crate::domain::{
    AppError, BatchSummary, ErrorDetail, ErrorResponse, FetchParams, HealthResponse, HealthStatus,
    IngestError, PublishError, StoreError, UploadResponse, ValidationResult,
};
use crate::infra::ingest::{self, FileFormat};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Transaction Analyser API",
        version = "0.1.0",
        description = "Validates and enriches payment transactions from file uploads and stored documents",
        license(
            name = "MIT"
        )
    ),
    paths(
        upload_file_handler,
        validate_transaction_handler,
        process_stored_handler,
        health_check_handler,
        liveness_handler,
        readiness_handler,
    ),
    components(
        schemas(
            crate::domain::Transaction,
            crate::domain::EnrichedTransaction,
            crate::domain::ValidationStatus,
            ValidationResult,
            BatchSummary,
            UploadResponse,
            FetchParams,
            HealthResponse,
            HealthStatus,
            ErrorResponse,
            ErrorDetail,
        )
    ),
    tags(
        (name = "ingestion", description = "File upload and stored-document processing endpoints"),
        (name = "validation", description = "Single-record validation endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

/// Upload a transaction file for processing
///
/// Accepts a multipart upload with a `file` part containing either a JSON
/// array of transaction records or CSV rows with a header line. Every
/// decoded record is validated; passing records are enriched and published
/// to the enriched-transactions topic. Rejected records are counted in the
/// summary, never silently dropped.
#[utoipa::path(
    post,
    path = "/upload-file",
    tag = "ingestion",
    request_body(content_type = "multipart/form-data", description = "JSON or CSV transaction file in a `file` part"),
    responses(
        (status = 200, description = "File processed; summary of published and rejected records", body = UploadResponse),
        (status = 400, description = "Missing file, unsupported format, or unreadable contents", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn upload_file_handler(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut upload: Option<(FileFormat, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| IngestError::Parse(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let format = FileFormat::detect(&filename)?;
        let bytes = field
            .bytes()
            .await
            .map_err(|e| IngestError::Parse(e.to_string()))?;
        upload = Some((format, bytes.to_vec()));
        break;
    }

    let (format, bytes) = upload.ok_or(IngestError::MissingFile)?;
    let documents = ingest::decode(format, &bytes)?;

    info!(
        format = ?format,
        count = documents.len(),
        "Upload decoded, starting validation"
    );

    let summary = state.service.process_batch(&documents).await;
    let message = match format {
        FileFormat::Json => "JSON data processed and enriched records published",
        FileFormat::Csv => "CSV data processed and enriched records published",
    };

    Ok(Json(UploadResponse {
        message: message.to_string(),
        summary,
    }))
}

/// Validate a single transaction record
///
/// Runs the full validation dispatcher against one JSON record and returns
/// the aggregated result. Nothing is published; this endpoint is a dry run
/// for upstream producers.
#[utoipa::path(
    post,
    path = "/validate",
    tag = "validation",
    request_body = crate::domain::Transaction,
    responses(
        (status = 200, description = "Validation result (valid or rejected, never an error)", body = ValidationResult)
    )
)]
pub async fn validate_transaction_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<serde_json::Value>,
) -> Json<ValidationResult> {
    Json(state.service.validate_document(&payload))
}

/// Process stored transactions
///
/// Pulls up to `limit` documents from the document store, validates each,
/// and publishes the enriched records.
#[utoipa::path(
    get,
    path = "/transactions",
    tag = "ingestion",
    params(
        ("limit" = Option<i64>, Query, description = "Maximum number of stored documents to process (1-1000, default: 100)")
    ),
    responses(
        (status = 200, description = "Summary of processed documents", body = BatchSummary),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 503, description = "Document store unavailable", body = ErrorResponse)
    )
)]
pub async fn process_stored_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FetchParams>,
) -> Result<Json<BatchSummary>, AppError> {
    params
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let summary = state.service.process_stored(params.limit).await?;
    Ok(Json(summary))
}

/// Detailed health check
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Health status", body = HealthResponse)
    )
)]
pub async fn health_check_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let health = state.service.health_check().await;
    Json(health)
}

/// Kubernetes liveness probe
#[utoipa::path(
    get,
    path = "/health/live",
    tag = "health",
    responses(
        (status = 200, description = "Application is alive")
    )
)]
pub async fn liveness_handler() -> StatusCode {
    StatusCode::OK
}

/// Kubernetes readiness probe
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "health",
    responses(
        (status = 200, description = "Application is ready to serve traffic"),
        (status = 503, description = "Application is not ready")
    )
)]
pub async fn readiness_handler(State(state): State<Arc<AppState>>) -> StatusCode {
    let health = state.service.health_check().await;
    match health.status {
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_type, message) = match &self {
            AppError::Ingest(ingest_err) => match ingest_err {
                IngestError::MissingFile => {
                    (StatusCode::BAD_REQUEST, "ingest_error", self.to_string())
                }
                IngestError::UnsupportedFormat(_) => (
                    StatusCode::UNSUPPORTED_MEDIA_TYPE,
                    "ingest_error",
                    self.to_string(),
                ),
                IngestError::Parse(_) => {
                    (StatusCode::BAD_REQUEST, "ingest_error", self.to_string())
                }
            },
            AppError::Validation(_) => {
                (StatusCode::BAD_REQUEST, "validation_error", self.to_string())
            }
            AppError::Store(store_err) => match store_err {
                StoreError::Connection(_) => (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "store_error",
                    self.to_string(),
                ),
                StoreError::Query(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "store_error",
                    self.to_string(),
                ),
            },
            AppError::Publish(publish_err) => match publish_err {
                PublishError::Connection(_) | PublishError::Timeout(_) => (
                    StatusCode::BAD_GATEWAY,
                    "publish_error",
                    self.to_string(),
                ),
                _ => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "publish_error",
                    self.to_string(),
                ),
            },
            AppError::Config(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "configuration_error",
                self.to_string(),
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                self.to_string(),
            ),
        };

        if status.is_server_error() {
            error!(error_type = %error_type, message = %message, "Server error");
        }

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                r#type: error_type.to_string(),
                message,
            },
        });

        (status, body).into_response()
    }
}
