//! Test utilities: mock adapters for the domain ports.

pub mod mocks;

pub use mocks::{MockConfig, MockPublisher, MockTransactionStore};
