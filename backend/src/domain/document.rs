//! Document aggregate and its validation rules.
//!
//! A [`DocumentDraft`] is the validated content of a document before the
//! store assigns an identifier. [`DocumentFields`] is the raw, nullable
//! shape inbound adapters receive; converting it into a draft enforces the
//! required-field rules in one place.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{AuthorId, Error};

/// Wire name of the title field.
pub const TITLE_FIELD: &str = "title";
/// Wire name of the body field.
pub const BODY_FIELD: &str = "body";
/// Wire name of the author identifier set.
pub const AUTHOR_IDS_FIELD: &str = "authorIds";
/// Wire name of the reference document identifier set.
pub const REFERENCE_DOC_IDS_FIELD: &str = "referenceDocIds";

/// Server-generated document identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(i64);

impl DocumentId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// The raw identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<DocumentId> for i64 {
    fn from(value: DocumentId) -> Self {
        value.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation failures raised while building or updating a document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentValidationError {
    /// A required field was null, blank or empty.
    #[error("{field} must not be empty")]
    MissingField { field: &'static str },
    /// The reference set names the document being updated.
    #[error("document {id} cannot reference itself")]
    SelfReference { id: DocumentId },
}

impl DocumentValidationError {
    /// Wire name of the offending field.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field } => field,
            Self::SelfReference { .. } => REFERENCE_DOC_IDS_FIELD,
        }
    }

    /// Stable detail code reported to clients.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "missing_field",
            Self::SelfReference { .. } => "self_reference",
        }
    }
}

impl From<DocumentValidationError> for Error {
    fn from(value: DocumentValidationError) -> Self {
        Error::invalid_request(value.to_string())
            .with_details(json!({ "field": value.field(), "code": value.code() }))
    }
}

/// Raw document payload as received from a client.
///
/// Every field is optional so that missing and null values reach validation
/// instead of failing deserialisation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentFields {
    pub title: Option<String>,
    pub body: Option<String>,
    pub author_ids: Option<Vec<i64>>,
    pub reference_doc_ids: Option<Vec<i64>>,
}

/// Validated document content without an identifier.
///
/// ## Invariants
/// - `title` and `body` are non-empty once trimmed.
/// - `author_ids` is non-empty.
///
/// # Examples
/// ```
/// use std::collections::BTreeSet;
/// use document_service::domain::{AuthorId, DocumentDraft};
///
/// let draft = DocumentDraft::new(
///     "Tenancy",
///     "Lease terms",
///     BTreeSet::from([AuthorId::new(1)]),
///     BTreeSet::new(),
/// )
/// .expect("valid draft");
/// assert_eq!(draft.title(), "Tenancy");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentDraft {
    title: String,
    body: String,
    author_ids: BTreeSet<AuthorId>,
    reference_ids: BTreeSet<DocumentId>,
}

impl DocumentDraft {
    /// Validate and construct a draft.
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        author_ids: BTreeSet<AuthorId>,
        reference_ids: BTreeSet<DocumentId>,
    ) -> Result<Self, DocumentValidationError> {
        let title = title.into();
        let body = body.into();
        if title.trim().is_empty() {
            return Err(DocumentValidationError::MissingField { field: TITLE_FIELD });
        }
        if body.trim().is_empty() {
            return Err(DocumentValidationError::MissingField { field: BODY_FIELD });
        }
        if author_ids.is_empty() {
            return Err(DocumentValidationError::MissingField {
                field: AUTHOR_IDS_FIELD,
            });
        }
        Ok(Self {
            title,
            body,
            author_ids,
            reference_ids,
        })
    }

    /// Reject a draft whose reference set contains `id`.
    pub fn ensure_not_referencing(&self, id: DocumentId) -> Result<(), DocumentValidationError> {
        if self.reference_ids.contains(&id) {
            return Err(DocumentValidationError::SelfReference { id });
        }
        Ok(())
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    pub fn body(&self) -> &str {
        self.body.as_str()
    }

    pub fn author_ids(&self) -> &BTreeSet<AuthorId> {
        &self.author_ids
    }

    pub fn reference_ids(&self) -> &BTreeSet<DocumentId> {
        &self.reference_ids
    }
}

impl TryFrom<DocumentFields> for DocumentDraft {
    type Error = DocumentValidationError;

    fn try_from(value: DocumentFields) -> Result<Self, Self::Error> {
        let DocumentFields {
            title,
            body,
            author_ids,
            reference_doc_ids,
        } = value;
        Self::new(
            title.unwrap_or_default(),
            body.unwrap_or_default(),
            author_ids
                .unwrap_or_default()
                .into_iter()
                .map(AuthorId::new)
                .collect(),
            reference_doc_ids
                .unwrap_or_default()
                .into_iter()
                .map(DocumentId::new)
                .collect(),
        )
    }
}

/// A stored document.
///
/// Serialises as `{id, title, body, authorIds, referenceDocIds}` with both
/// identifier sets in ascending order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    id: DocumentId,
    title: String,
    body: String,
    author_ids: BTreeSet<AuthorId>,
    #[serde(rename = "referenceDocIds")]
    reference_ids: BTreeSet<DocumentId>,
}

impl Document {
    /// Attach an identifier to validated content.
    ///
    /// Fails when the draft references the identifier it is being stored
    /// under.
    pub fn new(id: DocumentId, draft: DocumentDraft) -> Result<Self, DocumentValidationError> {
        draft.ensure_not_referencing(id)?;
        let DocumentDraft {
            title,
            body,
            author_ids,
            reference_ids,
        } = draft;
        Ok(Self {
            id,
            title,
            body,
            author_ids,
            reference_ids,
        })
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    pub fn body(&self) -> &str {
        self.body.as_str()
    }

    pub fn author_ids(&self) -> &BTreeSet<AuthorId> {
        &self.author_ids
    }

    pub fn reference_ids(&self) -> &BTreeSet<DocumentId> {
        &self.reference_ids
    }
}
