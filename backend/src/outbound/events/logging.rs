//! Publisher that writes document events to the structured log.

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{DocumentEventPublisher, DocumentEventPublisherError};
use crate::domain::DocumentEvent;

use super::encode;

/// Logs each event at `info` instead of delivering it to a broker.
#[derive(Debug, Clone)]
pub struct LoggingDocumentEventPublisher {
    topic: String,
}

impl LoggingDocumentEventPublisher {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
        }
    }

    pub fn topic(&self) -> &str {
        self.topic.as_str()
    }

    /// Nothing to create; records the topic events would be sent to.
    pub fn declare_topic(&self) {
        info!(topic = %self.topic, "event topic declared for logging publisher");
    }
}

#[async_trait]
impl DocumentEventPublisher for LoggingDocumentEventPublisher {
    async fn publish(&self, event: &DocumentEvent) -> Result<(), DocumentEventPublisherError> {
        let (key, payload) = encode(event)?;
        info!(
            topic = %self.topic,
            key = %key,
            payload = %String::from_utf8_lossy(&payload),
            "document event"
        );
        Ok(())
    }
}
