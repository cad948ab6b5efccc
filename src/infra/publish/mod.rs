//! Kafka REST proxy publisher implementation.
//!
//! Emits enriched transactions to a Kafka topic through a Confluent-style
//! REST proxy. Without a configured proxy URL the publisher runs in mock
//! mode: records are logged and dropped, which keeps local development and
//! tests broker-free.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, error, info, instrument};

use crate::domain::{AppError, EnrichedTransaction, EventPublisher, PublishError};

/// Default topic for enriched transactions (fixed contract with consumers)
pub const DEFAULT_ENRICHED_TOPIC: &str = "data-enriched-transactions";

/// Content type expected by Kafka REST proxy v2 for JSON-embedded records
const KAFKA_JSON_V2: &str = "application/vnd.kafka.json.v2+json";

/// Publisher that emits enriched transactions via a Kafka REST proxy
#[derive(Debug, Clone)]
pub struct RestProxyPublisher {
    http_client: Client,
    base_url: Option<String>,
    topic: String,
}

impl Default for RestProxyPublisher {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl RestProxyPublisher {
    /// Create a new REST proxy publisher
    ///
    /// # Arguments
    /// * `base_url` - Optional proxy base URL. If None, uses mock mode.
    /// * `topic` - Optional topic override. Defaults to the enriched topic.
    #[must_use]
    pub fn new(base_url: Option<String>, topic: Option<String>) -> Self {
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http_client,
            base_url,
            topic: topic.unwrap_or_else(|| DEFAULT_ENRICHED_TOPIC.to_string()),
        }
    }

    /// Check if running in mock mode (no proxy URL configured)
    #[must_use]
    pub fn is_mock_mode(&self) -> bool {
        self.base_url.is_none()
    }

    /// Topic this publisher emits to
    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    fn topic_url(&self, base_url: &str) -> String {
        format!("{}/topics/{}", base_url.trim_end_matches('/'), self.topic)
    }
}

#[async_trait]
impl EventPublisher for RestProxyPublisher {
    async fn health_check(&self) -> Result<(), AppError> {
        let Some(base_url) = self.base_url.as_deref() else {
            // Mock mode is always healthy
            return Ok(());
        };

        let response = self
            .http_client
            .get(self.topic_url(base_url))
            .send()
            .await
            .map_err(|e| PublishError::Connection(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(PublishError::Rejected {
                status_code: response.status().as_u16(),
                message: "topic metadata unavailable".to_string(),
            }
            .into())
        }
    }

    #[instrument(skip(self, transaction), fields(key = %transaction.message_key(), topic = %self.topic))]
    async fn publish_enriched(&self, transaction: &EnrichedTransaction) -> Result<(), AppError> {
        let Some(base_url) = self.base_url.as_deref() else {
            info!("Mock publish (no KAFKA_REST_PROXY_URL configured)");
            return Ok(());
        };

        let body = json!({
            "records": [{
                "key": transaction.message_key(),
                "value": transaction,
            }]
        });

        let url = self.topic_url(base_url);
        debug!(url = %url, "Publishing enriched transaction");

        let response = self
            .http_client
            .post(&url)
            .header("Content-Type", KAFKA_JSON_V2)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "REST proxy request failed");
                PublishError::Connection(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response.text().await.unwrap_or_default();
            error!(status = %status, body = %message, "REST proxy rejected publish");
            return Err(PublishError::Rejected {
                status_code: status.as_u16(),
                message,
            }
            .into());
        }

        debug!("Enriched transaction published");
        Ok(())
    }
}
