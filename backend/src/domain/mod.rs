//! Domain primitives, aggregates and services.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers, plus the services implementing the driving ports.
//! Keep types immutable and document invariants and serialisation
//! contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - Document / Author: the managed records and their drafts.
//! - DocumentEvent: change notification published after writes.
//! - DocumentService / AuthorService: driving port implementations.

pub mod auth;
pub mod author;
mod author_service;
pub mod document;
pub mod document_events;
mod document_service;
pub mod error;
pub mod ports;
mod principal_registry;
pub mod trace_id;

pub use self::auth::{BasicCredentials, CredentialsValidationError, Principal, Role};
pub use self::author::{Author, AuthorDraft, AuthorFields, AuthorId, AuthorValidationError};
pub use self::author_service::AuthorService;
pub use self::document::{
    Document, DocumentDraft, DocumentFields, DocumentId, DocumentValidationError,
};
pub use self::document_events::{DocumentEvent, DocumentEventKind};
pub use self::document_service::DocumentService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::principal_registry::PrincipalRegistry;
pub use self::trace_id::TraceId;
