//! Port for publishing document change events to a message topic.

use async_trait::async_trait;

use crate::domain::DocumentEvent;

use super::define_port_error;

define_port_error! {
    /// Errors raised by event publisher adapters.
    pub enum DocumentEventPublisherError {
        /// The event could not be encoded for the wire.
        Encoding { message: String } =>
            "document event encoding failed: {message}",
        /// The broker rejected or timed out the delivery.
        Delivery { message: String } =>
            "document event delivery failed: {message}",
    }
}

/// Publishes one message per document change.
///
/// Implementations key messages by document identifier so that events for
/// one document keep their relative order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentEventPublisher: Send + Sync {
    /// Deliver `event`, returning once the broker acknowledges it.
    async fn publish(&self, event: &DocumentEvent) -> Result<(), DocumentEventPublisherError>;
}
