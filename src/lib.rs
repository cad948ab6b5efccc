//! Transaction validation and enrichment service.
//!
//! The core is a stateless validation engine: given a raw transaction
//! record of one of several payment-rail types, it decides whether the
//! record is well-formed and economically sane, produces an aggregated
//! list of errors and remediation recommendations, and on success attaches
//! enrichment metadata for downstream publishing.
//!
//! # Architecture
//!
//! - [`domain`] - Core types, port traits, and error definitions
//! - [`validation`] - Field validators, type rule sets, and the dispatcher
//! - [`app`] - Service orchestration and shared state
//! - [`api`] - HTTP handlers and routing (file upload, stored-document
//!   processing, health)
//! - [`infra`] - Adapters: upload decoding, REST-proxy publisher,
//!   in-memory document store

pub mod api;
pub mod app;
pub mod domain;
pub mod infra;
pub mod validation;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
