//! Builders for the HTTP state ports.
//!
//! Diesel repositories back the services when a pool is configured; an
//! [`InMemoryStore`] otherwise.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use document_service::domain::ports::{AuthorRepository, DocumentEventPublisher, DocumentRepository};
use document_service::domain::{AuthorService, DocumentService, PrincipalRegistry};
use document_service::inbound::http::state::HttpState;
use document_service::outbound::memory::InMemoryStore;
use document_service::outbound::persistence::{
    DbPool, DieselAuthorRepository, DieselDocumentRepository,
};

use super::ServerConfig;

/// Wire both services over one pair of repositories.
fn build_state_with_repositories<D, A>(
    documents: Arc<D>,
    authors: Arc<A>,
    publisher: Arc<dyn DocumentEventPublisher>,
    clock: Arc<dyn Clock>,
    principals: PrincipalRegistry,
) -> HttpState
where
    D: DocumentRepository + 'static,
    A: AuthorRepository + 'static,
{
    let document_service = Arc::new(DocumentService::new(
        documents,
        authors.clone(),
        publisher,
        clock,
    ));
    let author_service = Arc::new(AuthorService::new(authors));
    HttpState::new(
        document_service.clone(),
        document_service,
        author_service.clone(),
        author_service,
        Arc::new(principals),
    )
}

fn build_state(
    pool: Option<&DbPool>,
    publisher: Arc<dyn DocumentEventPublisher>,
    principals: PrincipalRegistry,
) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    match pool {
        Some(pool) => build_state_with_repositories(
            Arc::new(DieselDocumentRepository::new(pool.clone())),
            Arc::new(DieselAuthorRepository::new(pool.clone())),
            publisher,
            clock,
            principals,
        ),
        None => {
            let store = InMemoryStore::default();
            build_state_with_repositories(
                Arc::new(store.documents()),
                Arc::new(store.authors()),
                publisher,
                clock,
                principals,
            )
        }
    }
}

pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    web::Data::new(build_state(
        config.db_pool.as_ref(),
        config.publisher.clone(),
        config.principals.clone(),
    ))
}
