//! Change events emitted after document writes.
//!
//! Events stay transport agnostic; the publisher adapter decides the wire
//! envelope. The JSON shape produced by `serde` is the contract consumers
//! rely on.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Document, DocumentId, TraceId};

/// Kind of change a [`DocumentEvent`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentEventKind {
    DocumentCreated,
    DocumentUpdated,
    DocumentDeleted,
}

impl DocumentEventKind {
    /// Stable wire name of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DocumentCreated => "DOCUMENT_CREATED",
            Self::DocumentUpdated => "DOCUMENT_UPDATED",
            Self::DocumentDeleted => "DOCUMENT_DELETED",
        }
    }
}

impl fmt::Display for DocumentEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One change to one document.
///
/// Created and updated events carry a snapshot of the stored document;
/// deleted events carry only the identifier. The trace identifier in scope
/// at construction time is captured for correlation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentEvent {
    event_type: DocumentEventKind,
    document_id: DocumentId,
    #[serde(skip_serializing_if = "Option::is_none")]
    document: Option<Document>,
    occurred_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
}

impl DocumentEvent {
    pub fn created(document: Document, occurred_at: DateTime<Utc>) -> Self {
        Self::with_snapshot(DocumentEventKind::DocumentCreated, document, occurred_at)
    }

    pub fn updated(document: Document, occurred_at: DateTime<Utc>) -> Self {
        Self::with_snapshot(DocumentEventKind::DocumentUpdated, document, occurred_at)
    }

    pub fn deleted(document_id: DocumentId, occurred_at: DateTime<Utc>) -> Self {
        Self {
            event_type: DocumentEventKind::DocumentDeleted,
            document_id,
            document: None,
            occurred_at,
            trace_id: TraceId::current().map(|id| id.to_string()),
        }
    }

    fn with_snapshot(
        event_type: DocumentEventKind,
        document: Document,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            event_type,
            document_id: document.id(),
            document: Some(document),
            occurred_at,
            trace_id: TraceId::current().map(|id| id.to_string()),
        }
    }

    pub fn kind(&self) -> DocumentEventKind {
        self.event_type
    }

    pub fn document_id(&self) -> DocumentId {
        self.document_id
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }
}
