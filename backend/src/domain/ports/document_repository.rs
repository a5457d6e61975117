//! Port for document persistence.
//!
//! Adapters store a document together with its author and reference
//! identifier sets and hand back fully assembled [`Document`] values.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::domain::{Document, DocumentDraft, DocumentId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by document repository adapters.
    pub enum DocumentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "document repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "document repository query failed: {message}",
    }
}

/// Port for document storage and retrieval.
///
/// Writes that touch the document row and its identifier sets must be
/// atomic: a failed update leaves the previous content intact.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Store a new document and return it with its assigned identifier.
    async fn insert(&self, draft: &DocumentDraft) -> Result<Document, DocumentRepositoryError>;

    /// Replace the content of an existing document.
    ///
    /// Returns `false` when no document with that identifier exists.
    async fn update(&self, document: &Document) -> Result<bool, DocumentRepositoryError>;

    /// Fetch one document.
    async fn find_by_id(&self, id: DocumentId)
    -> Result<Option<Document>, DocumentRepositoryError>;

    /// Fetch every document ordered by identifier.
    async fn list(&self) -> Result<Vec<Document>, DocumentRepositoryError>;

    /// Delete a document and the references other documents hold to it.
    ///
    /// Returns `false` when no document with that identifier exists.
    async fn delete(&self, id: DocumentId) -> Result<bool, DocumentRepositoryError>;

    /// The subset of `ids` that names stored documents.
    async fn existing_ids(
        &self,
        ids: &BTreeSet<DocumentId>,
    ) -> Result<BTreeSet<DocumentId>, DocumentRepositoryError>;
}
