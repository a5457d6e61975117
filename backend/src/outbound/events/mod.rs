//! Event publisher adapters implementing [`DocumentEventPublisher`].
//!
//! - **logging**: writes each event to the structured log; used when no
//!   broker is configured.
//! - **kafka**: delivers events to a Kafka topic (feature `kafka`).
//!
//! Every adapter also knows how to declare its topic so startup can make
//! sure it exists before the first request.
//!
//! [`DocumentEventPublisher`]: crate::domain::ports::DocumentEventPublisher

#[cfg(feature = "kafka")]
mod kafka;
mod logging;

#[cfg(feature = "kafka")]
pub use kafka::{KafkaDocumentEventPublisher, KafkaPublisherConfig, TopicDeclarationError};
pub use logging::LoggingDocumentEventPublisher;

use crate::domain::ports::DocumentEventPublisherError;
use crate::domain::DocumentEvent;

/// Encode an event into its message key and JSON payload.
///
/// The key is the decimal document identifier so that a partitioned topic
/// keeps every event for one document in order.
pub(crate) fn encode(event: &DocumentEvent) -> Result<(String, Vec<u8>), DocumentEventPublisherError> {
    let payload = serde_json::to_vec(event)
        .map_err(|err| DocumentEventPublisherError::encoding(err.to_string()))?;
    Ok((event.document_id().to_string(), payload))
}
