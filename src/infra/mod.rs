//! Infrastructure layer implementations.

pub mod ingest;
pub mod publish;
pub mod store;

pub use ingest::FileFormat;
pub use publish::{DEFAULT_ENRICHED_TOPIC, RestProxyPublisher};
pub use store::InMemoryTransactionStore;
