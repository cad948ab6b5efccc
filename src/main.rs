//! Application entry point.

use std::env;
use std::sync::Arc;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use transaction_analyser::api::create_router;
use transaction_analyser::app::AppState;
use transaction_analyser::infra::{InMemoryTransactionStore, RestProxyPublisher, ingest};

/// Application configuration
struct Config {
    host: String,
    port: u16,
    /// Kafka REST proxy base URL (optional - uses mock publish mode if not set)
    kafka_rest_proxy_url: Option<String>,
    /// Topic override for enriched transactions (optional)
    enriched_topic: Option<String>,
    /// Optional JSON file used to seed the in-memory document store
    seed_file: Option<String>,
}

impl Config {
    fn from_env() -> Result<Self> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        let kafka_rest_proxy_url = env::var("KAFKA_REST_PROXY_URL")
            .ok()
            .filter(|u| !u.is_empty());
        let enriched_topic = env::var("ENRICHED_TOPIC").ok().filter(|t| !t.is_empty());
        let seed_file = env::var("SEED_FILE").ok().filter(|p| !p.is_empty());

        Ok(Self {
            host,
            port,
            kafka_rest_proxy_url,
            enriched_topic,
            seed_file,
        })
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C"),
        _ = terminate => info!("Received SIGTERM"),
    }
}

fn seed_store(path: &str) -> Result<InMemoryTransactionStore> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path))?;
    let documents =
        ingest::decode_json(&bytes).with_context(|| format!("Failed to decode {}", path))?;
    Ok(InMemoryTransactionStore::with_documents(documents))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    init_tracing();

    info!("Transaction Analyser v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;

    let publisher = RestProxyPublisher::new(
        config.kafka_rest_proxy_url.clone(),
        config.enriched_topic.clone(),
    );
    if config.kafka_rest_proxy_url.is_some() {
        info!(topic = %publisher.topic(), "Publisher created (Kafka REST proxy)");
    } else {
        warn!("Publisher created (MOCK MODE - no KAFKA_REST_PROXY_URL)");
    }

    let store = match config.seed_file.as_deref() {
        Some(path) => {
            let store = seed_store(path)?;
            info!(path = %path, count = store.len(), "Document store seeded from file");
            store
        }
        None => {
            info!("Document store starting empty (no SEED_FILE)");
            InMemoryTransactionStore::new()
        }
    };

    let app_state = Arc::new(AppState::new(Arc::new(publisher), Arc::new(store)));
    let router = create_router(app_state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Server starting on http://{}", addr);
    info!("Swagger UI available at http://{}/swagger-ui", addr);
    info!("OpenAPI spec at http://{}/api-docs/openapi.json", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
