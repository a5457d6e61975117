//! Selects the document event publisher and declares its topic.

use std::sync::Arc;

use tracing::info;

use document_service::domain::ports::DocumentEventPublisher;
use document_service::outbound::events::LoggingDocumentEventPublisher;
#[cfg(feature = "kafka")]
use document_service::outbound::events::{KafkaDocumentEventPublisher, KafkaPublisherConfig};

/// Failures preparing the event publisher at startup.
#[derive(Debug, thiserror::Error)]
pub enum PublisherError {
    #[error("Kafka bootstrap servers configured but the `kafka` feature is disabled")]
    KafkaUnavailable,
    #[error("failed to create Kafka publisher: {0}")]
    Connect(String),
    #[error("failed to declare event topic: {0}")]
    DeclareTopic(String),
}

/// Build the publisher for `topic` and make sure the topic exists.
///
/// With bootstrap servers, events go to Kafka; otherwise they are logged.
///
/// # Errors
/// Returns [`PublisherError`] when the broker client cannot be created or
/// the topic cannot be declared.
pub async fn build_publisher(
    bootstrap_servers: Option<&str>,
    topic: &str,
) -> Result<Arc<dyn DocumentEventPublisher>, PublisherError> {
    match bootstrap_servers {
        Some(servers) => build_kafka_publisher(servers, topic).await,
        None => {
            let publisher = LoggingDocumentEventPublisher::new(topic);
            publisher.declare_topic();
            info!(topic, "no Kafka brokers configured; logging document events");
            Ok(Arc::new(publisher))
        }
    }
}

#[cfg(feature = "kafka")]
async fn build_kafka_publisher(
    servers: &str,
    topic: &str,
) -> Result<Arc<dyn DocumentEventPublisher>, PublisherError> {
    let publisher = KafkaDocumentEventPublisher::new(KafkaPublisherConfig::new(servers, topic))
        .map_err(|err| PublisherError::Connect(err.to_string()))?;
    publisher
        .declare_topic()
        .await
        .map_err(|err| PublisherError::DeclareTopic(err.to_string()))?;
    Ok(Arc::new(publisher))
}

#[cfg(not(feature = "kafka"))]
async fn build_kafka_publisher(
    _servers: &str,
    _topic: &str,
) -> Result<Arc<dyn DocumentEventPublisher>, PublisherError> {
    Err(PublisherError::KafkaUnavailable)
}
