//! Kafka publisher for document change events.

use std::time::Duration;

use async_trait::async_trait;
use rdkafka::admin::{AdminClient, AdminOptions, NewTopic, TopicReplication};
use rdkafka::client::DefaultClientContext;
use rdkafka::config::ClientConfig;
use rdkafka::error::RDKafkaErrorCode;
use rdkafka::producer::{FutureProducer, FutureRecord};
use tracing::{debug, info, warn};

use crate::domain::ports::{DocumentEventPublisher, DocumentEventPublisherError};
use crate::domain::DocumentEvent;

use super::encode;

const SEND_TIMEOUT: Duration = Duration::from_secs(5);
const ADMIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for [`KafkaDocumentEventPublisher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KafkaPublisherConfig {
    pub bootstrap_servers: String,
    pub topic: String,
    pub client_id: String,
}

impl KafkaPublisherConfig {
    pub fn new(bootstrap_servers: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            bootstrap_servers: bootstrap_servers.into(),
            topic: topic.into(),
            client_id: "document-service".to_owned(),
        }
    }

    fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new();
        config
            .set("bootstrap.servers", &self.bootstrap_servers)
            .set("client.id", &self.client_id);
        config
    }
}

/// Failure to make sure the event topic exists.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TopicDeclarationError {
    #[error("failed to create Kafka admin client: {message}")]
    Client { message: String },
    #[error("failed to create topic {topic}: {message}")]
    Create { topic: String, message: String },
}

/// Delivers events to one topic, keyed by document identifier.
pub struct KafkaDocumentEventPublisher {
    producer: FutureProducer,
    config: KafkaPublisherConfig,
}

impl KafkaDocumentEventPublisher {
    /// Build an idempotent producer for `config.topic`.
    pub fn new(config: KafkaPublisherConfig) -> Result<Self, DocumentEventPublisherError> {
        let producer: FutureProducer = config
            .client_config()
            .set("message.timeout.ms", "5000")
            .set("acks", "all")
            .set("enable.idempotence", "true")
            .create()
            .map_err(|err| {
                DocumentEventPublisherError::delivery(format!("failed to create producer: {err}"))
            })?;

        info!(
            bootstrap_servers = %config.bootstrap_servers,
            topic = %config.topic,
            "connected Kafka event publisher"
        );

        Ok(Self { producer, config })
    }

    pub fn topic(&self) -> &str {
        self.config.topic.as_str()
    }

    /// Create the topic with broker-default partitions and replication.
    ///
    /// An existing topic counts as success.
    pub async fn declare_topic(&self) -> Result<(), TopicDeclarationError> {
        let admin: AdminClient<DefaultClientContext> =
            self.config.client_config().create().map_err(|err| {
                TopicDeclarationError::Client {
                    message: err.to_string(),
                }
            })?;
        let topic = NewTopic::new(&self.config.topic, -1, TopicReplication::Fixed(-1));
        let options = AdminOptions::new().operation_timeout(Some(ADMIN_TIMEOUT));

        let results = admin
            .create_topics([&topic], &options)
            .await
            .map_err(|err| TopicDeclarationError::Create {
                topic: self.config.topic.clone(),
                message: err.to_string(),
            })?;

        for result in results {
            match result {
                Ok(name) => info!(topic = %name, "created event topic"),
                Err((name, RDKafkaErrorCode::TopicAlreadyExists)) => {
                    debug!(topic = %name, "event topic already exists");
                }
                Err((name, code)) => {
                    warn!(topic = %name, error = %code, "event topic creation rejected");
                    return Err(TopicDeclarationError::Create {
                        topic: name,
                        message: code.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentEventPublisher for KafkaDocumentEventPublisher {
    async fn publish(&self, event: &DocumentEvent) -> Result<(), DocumentEventPublisherError> {
        let (key, payload) = encode(event)?;
        let record = FutureRecord::to(&self.config.topic)
            .payload(&payload)
            .key(&key);

        self.producer
            .send(record, SEND_TIMEOUT)
            .await
            .map_err(|(err, _)| DocumentEventPublisherError::delivery(err.to_string()))?;

        debug!(
            topic = %self.config.topic,
            key = %key,
            event_type = %event.kind(),
            "published document event"
        );
        Ok(())
    }
}
