//! Driving port for document reads.

use async_trait::async_trait;

use crate::domain::{Document, DocumentId, Error};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentQuery: Send + Sync {
    /// All documents ordered by identifier.
    async fn list_documents(&self) -> Result<Vec<Document>, Error>;

    /// One document, or [`ErrorCode::NotFound`](crate::domain::ErrorCode::NotFound).
    async fn get_document(&self, id: DocumentId) -> Result<Document, Error>;
}
