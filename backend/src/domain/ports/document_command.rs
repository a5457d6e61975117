//! Driving port for document mutations.
//!
//! Inbound adapters pass client payloads through unchanged; validation,
//! existence checks and event publication happen behind the port.

use async_trait::async_trait;

use crate::domain::{Document, DocumentFields, DocumentId, Error};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentCommand: Send + Sync {
    /// Validate and store a new document.
    async fn create_document(&self, fields: DocumentFields) -> Result<Document, Error>;

    /// Validate and fully replace an existing document.
    async fn update_document(
        &self,
        id: DocumentId,
        fields: DocumentFields,
    ) -> Result<Document, Error>;

    /// Remove a document.
    async fn delete_document(&self, id: DocumentId) -> Result<(), Error>;
}
