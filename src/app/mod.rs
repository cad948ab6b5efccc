//! The application layer, containing services and shared state.

pub mod service;
pub mod state;

pub use service::AnalyserService;
pub use state::AppState;
