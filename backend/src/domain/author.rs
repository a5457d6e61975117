//! Author records referenced by documents.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::Error;

/// Wire name of the first name field.
pub const FIRST_NAME_FIELD: &str = "firstName";
/// Wire name of the last name field.
pub const LAST_NAME_FIELD: &str = "lastName";

/// Server-generated author identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorId(i64);

impl AuthorId {
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

impl From<AuthorId> for i64 {
    fn from(value: AuthorId) -> Self {
        value.0
    }
}

impl fmt::Display for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation errors returned by [`AuthorDraft::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorValidationError {
    EmptyFirstName,
    EmptyLastName,
}

impl AuthorValidationError {
    /// Wire name of the offending field.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyFirstName => FIRST_NAME_FIELD,
            Self::EmptyLastName => LAST_NAME_FIELD,
        }
    }
}

impl fmt::Display for AuthorValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyFirstName => write!(f, "first name must not be empty"),
            Self::EmptyLastName => write!(f, "last name must not be empty"),
        }
    }
}

impl std::error::Error for AuthorValidationError {}

impl From<AuthorValidationError> for Error {
    fn from(value: AuthorValidationError) -> Self {
        Error::invalid_request(value.to_string())
            .with_details(json!({ "field": value.field(), "code": "missing_field" }))
    }
}

/// Raw author payload as received from a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorFields {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Validated author names awaiting an identifier.
///
/// # Examples
/// ```
/// use document_service::domain::AuthorDraft;
///
/// let draft = AuthorDraft::new(" Sreekanth ", "G").expect("valid names");
/// assert_eq!(draft.first_name(), "Sreekanth");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorDraft {
    first_name: String,
    last_name: String,
}

impl AuthorDraft {
    /// Trim and validate both names.
    pub fn new(first_name: &str, last_name: &str) -> Result<Self, AuthorValidationError> {
        let first_name = first_name.trim();
        if first_name.is_empty() {
            return Err(AuthorValidationError::EmptyFirstName);
        }
        let last_name = last_name.trim();
        if last_name.is_empty() {
            return Err(AuthorValidationError::EmptyLastName);
        }
        Ok(Self {
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
        })
    }

    pub fn first_name(&self) -> &str {
        self.first_name.as_str()
    }

    pub fn last_name(&self) -> &str {
        self.last_name.as_str()
    }
}

impl TryFrom<AuthorFields> for AuthorDraft {
    type Error = AuthorValidationError;

    fn try_from(value: AuthorFields) -> Result<Self, Self::Error> {
        Self::new(
            value.first_name.as_deref().unwrap_or_default(),
            value.last_name.as_deref().unwrap_or_default(),
        )
    }
}

/// A stored author. Authors are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    id: AuthorId,
    first_name: String,
    last_name: String,
}

impl Author {
    pub fn new(id: AuthorId, draft: AuthorDraft) -> Self {
        let AuthorDraft {
            first_name,
            last_name,
        } = draft;
        Self {
            id,
            first_name,
            last_name,
        }
    }

    pub fn id(&self) -> AuthorId {
        self.id
    }

    pub fn first_name(&self) -> &str {
        self.first_name.as_str()
    }

    pub fn last_name(&self) -> &str {
        self.last_name.as_str()
    }
}
