//! Error types for the analyser service.
//!
//! Note that rejected transactions are not errors: the validation engine
//! reports rule violations inside [`crate::domain::ValidationResult`].
//! The variants here cover collaborator faults only (publisher, store,
//! ingestion, configuration).

use thiserror::Error;

/// Top-level application error
#[derive(Debug, Error)]
pub enum AppError {
    /// Event publisher errors
    #[error("Publish error: {0}")]
    Publish(#[from] PublishError),

    /// Document store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// File ingestion errors
    #[error("Ingest error: {0}")]
    Ingest(#[from] IngestError),

    /// Request parameter validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors from the event publisher adapter
#[derive(Debug, Error)]
pub enum PublishError {
    /// Broker or proxy unreachable
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Proxy returned a non-success status
    #[error("Publish rejected with status {status_code}: {message}")]
    Rejected { status_code: u16, message: String },

    /// Payload could not be serialized
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// Request timed out
    #[error("Timeout: {0}")]
    Timeout(String),
}

/// Errors from the document store adapter
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store unreachable
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Query execution failed
    #[error("Query failed: {0}")]
    Query(String),
}

/// Errors from file ingestion (upload decoding)
#[derive(Debug, Error)]
pub enum IngestError {
    /// No file part was found in the multipart body
    #[error("No file provided")]
    MissingFile,

    /// File extension/content type is not JSON or CSV
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// File contents could not be decoded
    #[error("Failed to parse file: {0}")]
    Parse(String),
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required variable not set
    #[error("Missing environment variable: {0}")]
    Missing(String),

    /// Variable set but unusable
    #[error("Invalid configuration value for {name}: {message}")]
    Invalid { name: String, message: String },
}
