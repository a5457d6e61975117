//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use zeroize::Zeroizing;

use crate::domain::{AuthorService, DocumentService, PrincipalRegistry, Role};
use crate::inbound::http::state::HttpState;
use crate::outbound::events::LoggingDocumentEventPublisher;
use crate::outbound::memory::InMemoryStore;

/// Build an `Authorization` header value for Basic credentials.
pub fn basic_header(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

/// Registry with one principal per role:
/// `documents`/`documents-secret` and `authors`/`authors-secret`.
pub fn test_registry() -> PrincipalRegistry {
    PrincipalRegistry::default()
        .with_principal(
            "documents",
            Zeroizing::new("documents-secret".to_owned()),
            [Role::Document],
        )
        .with_principal(
            "authors",
            Zeroizing::new("authors-secret".to_owned()),
            [Role::Author],
        )
}

/// HTTP state over a fresh in-memory store with the test registry.
pub fn test_state() -> HttpState {
    test_state_with_store(&InMemoryStore::default())
}

pub fn test_state_with_store(store: &InMemoryStore) -> HttpState {
    let documents = Arc::new(DocumentService::new(
        Arc::new(store.documents()),
        Arc::new(store.authors()),
        Arc::new(LoggingDocumentEventPublisher::new("documents")),
        Arc::new(mockable::DefaultClock),
    ));
    let authors = Arc::new(AuthorService::new(Arc::new(store.authors())));
    HttpState::new(
        documents.clone(),
        documents,
        authors.clone(),
        authors,
        Arc::new(test_registry()),
    )
}
