//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AuthorCommand, AuthorQuery, CredentialVerifier, DocumentCommand, DocumentQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub documents: Arc<dyn DocumentCommand>,
    pub documents_query: Arc<dyn DocumentQuery>,
    pub authors: Arc<dyn AuthorCommand>,
    pub authors_query: Arc<dyn AuthorQuery>,
    pub credentials: Arc<dyn CredentialVerifier>,
}

impl HttpState {
    /// Bundle the ports used by the handlers.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use document_service::domain::{AuthorService, DocumentService, PrincipalRegistry};
    /// use document_service::inbound::http::state::HttpState;
    /// use document_service::outbound::events::LoggingDocumentEventPublisher;
    /// use document_service::outbound::memory::InMemoryStore;
    ///
    /// let store = InMemoryStore::default();
    /// let documents = Arc::new(DocumentService::new(
    ///     Arc::new(store.documents()),
    ///     Arc::new(store.authors()),
    ///     Arc::new(LoggingDocumentEventPublisher::new("documents")),
    ///     Arc::new(mockable::DefaultClock),
    /// ));
    /// let authors = Arc::new(AuthorService::new(Arc::new(store.authors())));
    /// let state = HttpState::new(
    ///     documents.clone(),
    ///     documents,
    ///     authors.clone(),
    ///     authors,
    ///     Arc::new(PrincipalRegistry::default()),
    /// );
    /// # let _ = state;
    /// ```
    pub fn new(
        documents: Arc<dyn DocumentCommand>,
        documents_query: Arc<dyn DocumentQuery>,
        authors: Arc<dyn AuthorCommand>,
        authors_query: Arc<dyn AuthorQuery>,
        credentials: Arc<dyn CredentialVerifier>,
    ) -> Self {
        Self {
            documents,
            documents_query,
            authors,
            authors_query,
            credentials,
        }
    }
}
