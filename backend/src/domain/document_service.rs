//! Document domain service.
//!
//! Implements the document driving ports. Payload validation runs first,
//! then identifier resolution against the stores, then the write. Change
//! events are published only after the write succeeds; a failed publish is
//! logged and does not fail the caller.

use std::collections::BTreeSet;
use std::fmt::Display;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, error};

use crate::domain::document::{AUTHOR_IDS_FIELD, REFERENCE_DOC_IDS_FIELD};
use crate::domain::ports::{
    AuthorRepository, AuthorRepositoryError, DocumentCommand, DocumentEventPublisher,
    DocumentQuery, DocumentRepository, DocumentRepositoryError,
};
use crate::domain::{
    AuthorId, Document, DocumentDraft, DocumentEvent, DocumentFields, DocumentId, Error,
};

/// Document service implementing [`DocumentCommand`] and [`DocumentQuery`].
#[derive(Clone)]
pub struct DocumentService<D, A> {
    documents: Arc<D>,
    authors: Arc<A>,
    publisher: Arc<dyn DocumentEventPublisher>,
    clock: Arc<dyn Clock>,
}

impl<D, A> DocumentService<D, A> {
    /// Create a new service over the given stores and publisher.
    pub fn new(
        documents: Arc<D>,
        authors: Arc<A>,
        publisher: Arc<dyn DocumentEventPublisher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            documents,
            authors,
            publisher,
            clock,
        }
    }
}

impl<D, A> DocumentService<D, A>
where
    D: DocumentRepository,
    A: AuthorRepository,
{
    fn map_document_error(error: DocumentRepositoryError) -> Error {
        match error {
            DocumentRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("document repository unavailable: {message}"))
            }
            DocumentRepositoryError::Query { message } => {
                Error::internal(format!("document repository error: {message}"))
            }
        }
    }

    fn map_author_error(error: AuthorRepositoryError) -> Error {
        match error {
            AuthorRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("author repository unavailable: {message}"))
            }
            AuthorRepositoryError::Query { message } => {
                Error::internal(format!("author repository error: {message}"))
            }
            AuthorRepositoryError::InUse { author_id } => {
                Error::internal(format!("unexpected author {author_id} conflict"))
            }
        }
    }

    fn not_found(id: DocumentId) -> Error {
        Error::not_found(format!("document {id} not found"))
    }

    fn unknown_ids<T: Copy + Display + Into<i64>>(
        field: &'static str,
        code: &'static str,
        missing: &BTreeSet<T>,
    ) -> Error {
        let listed = missing
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let ids: Vec<i64> = missing.iter().map(|id| (*id).into()).collect();
        Error::invalid_request(format!("{field} contains unknown identifiers: {listed}"))
            .with_details(json!({ "field": field, "code": code, "ids": ids }))
    }

    async fn ensure_authors_exist(&self, ids: &BTreeSet<AuthorId>) -> Result<(), Error> {
        let found = self
            .authors
            .existing_ids(ids)
            .await
            .map_err(Self::map_author_error)?;
        let missing: BTreeSet<AuthorId> = ids.difference(&found).copied().collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Self::unknown_ids(AUTHOR_IDS_FIELD, "unknown_author", &missing))
        }
    }

    /// Resolve the reference set, plus `subject` when updating.
    ///
    /// A missing subject wins over unknown references so that updates to
    /// absent documents report not found.
    async fn ensure_references_exist(
        &self,
        references: &BTreeSet<DocumentId>,
        subject: Option<DocumentId>,
    ) -> Result<(), Error> {
        let mut wanted = references.clone();
        wanted.extend(subject);
        if wanted.is_empty() {
            return Ok(());
        }
        let found = self
            .documents
            .existing_ids(&wanted)
            .await
            .map_err(Self::map_document_error)?;
        if let Some(id) = subject.filter(|id| !found.contains(id)) {
            return Err(Self::not_found(id));
        }
        let missing: BTreeSet<DocumentId> = references.difference(&found).copied().collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Self::unknown_ids(
                REFERENCE_DOC_IDS_FIELD,
                "unknown_reference",
                &missing,
            ))
        }
    }

    async fn publish(&self, event: DocumentEvent) {
        match self.publisher.publish(&event).await {
            Ok(()) => debug!(
                document_id = %event.document_id(),
                event_type = %event.kind(),
                "document event published"
            ),
            Err(err) => error!(
                document_id = %event.document_id(),
                event_type = %event.kind(),
                error = %err,
                "failed to publish document event"
            ),
        }
    }
}

#[async_trait]
impl<D, A> DocumentCommand for DocumentService<D, A>
where
    D: DocumentRepository,
    A: AuthorRepository,
{
    async fn create_document(&self, fields: DocumentFields) -> Result<Document, Error> {
        let draft = DocumentDraft::try_from(fields)?;
        self.ensure_authors_exist(draft.author_ids()).await?;
        self.ensure_references_exist(draft.reference_ids(), None)
            .await?;

        let document = self
            .documents
            .insert(&draft)
            .await
            .map_err(Self::map_document_error)?;

        self.publish(DocumentEvent::created(document.clone(), self.clock.utc()))
            .await;
        Ok(document)
    }

    async fn update_document(
        &self,
        id: DocumentId,
        fields: DocumentFields,
    ) -> Result<Document, Error> {
        let draft = DocumentDraft::try_from(fields)?;
        let document = Document::new(id, draft)?;
        self.ensure_references_exist(document.reference_ids(), Some(id))
            .await?;
        self.ensure_authors_exist(document.author_ids()).await?;

        let updated = self
            .documents
            .update(&document)
            .await
            .map_err(Self::map_document_error)?;
        if !updated {
            return Err(Self::not_found(id));
        }

        self.publish(DocumentEvent::updated(document.clone(), self.clock.utc()))
            .await;
        Ok(document)
    }

    async fn delete_document(&self, id: DocumentId) -> Result<(), Error> {
        let deleted = self
            .documents
            .delete(id)
            .await
            .map_err(Self::map_document_error)?;
        if !deleted {
            return Err(Self::not_found(id));
        }

        self.publish(DocumentEvent::deleted(id, self.clock.utc()))
            .await;
        Ok(())
    }
}

#[async_trait]
impl<D, A> DocumentQuery for DocumentService<D, A>
where
    D: DocumentRepository,
    A: AuthorRepository,
{
    async fn list_documents(&self) -> Result<Vec<Document>, Error> {
        self.documents
            .list()
            .await
            .map_err(Self::map_document_error)
    }

    async fn get_document(&self, id: DocumentId) -> Result<Document, Error> {
        self.documents
            .find_by_id(id)
            .await
            .map_err(Self::map_document_error)?
            .ok_or_else(|| Self::not_found(id))
    }
}

#[cfg(test)]
#[path = "document_service_tests.rs"]
mod tests;
