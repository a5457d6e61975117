//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, the event publisher) are implemented by
//! outbound adapters. Driving ports (commands, queries, the credential
//! verifier) are implemented by domain services and called by inbound
//! adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod author_command;
mod author_query;
mod author_repository;
mod credential_verifier;
mod document_command;
mod document_event_publisher;
mod document_query;
mod document_repository;

pub use author_command::AuthorCommand;
#[cfg(test)]
pub use author_command::MockAuthorCommand;
pub use author_query::AuthorQuery;
#[cfg(test)]
pub use author_query::MockAuthorQuery;
#[cfg(test)]
pub use author_repository::MockAuthorRepository;
pub use author_repository::{AuthorRepository, AuthorRepositoryError};
pub use credential_verifier::CredentialVerifier;
#[cfg(test)]
pub use credential_verifier::MockCredentialVerifier;
pub use document_command::DocumentCommand;
#[cfg(test)]
pub use document_command::MockDocumentCommand;
#[cfg(test)]
pub use document_event_publisher::MockDocumentEventPublisher;
pub use document_event_publisher::{DocumentEventPublisher, DocumentEventPublisherError};
pub use document_query::DocumentQuery;
#[cfg(test)]
pub use document_query::MockDocumentQuery;
#[cfg(test)]
pub use document_repository::MockDocumentRepository;
pub use document_repository::{DocumentRepository, DocumentRepositoryError};
