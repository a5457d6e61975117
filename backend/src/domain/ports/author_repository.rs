//! Port for author persistence.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::domain::{Author, AuthorDraft, AuthorId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by author repository adapters.
    pub enum AuthorRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "author repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "author repository query failed: {message}",
        /// The author is still listed on at least one document.
        InUse { author_id: i64 } =>
            "author {author_id} is still referenced by a document",
    }
}

/// Port for author storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    /// Store a new author and return it with its assigned identifier.
    async fn insert(&self, draft: &AuthorDraft) -> Result<Author, AuthorRepositoryError>;

    async fn find_by_id(&self, id: AuthorId) -> Result<Option<Author>, AuthorRepositoryError>;

    /// Fetch every author ordered by identifier.
    async fn list(&self) -> Result<Vec<Author>, AuthorRepositoryError>;

    /// Delete an author.
    ///
    /// Returns `false` when no author with that identifier exists and
    /// [`AuthorRepositoryError::InUse`] when a document still lists it.
    async fn delete(&self, id: AuthorId) -> Result<bool, AuthorRepositoryError>;

    /// The subset of `ids` that names stored authors.
    async fn existing_ids(
        &self,
        ids: &BTreeSet<AuthorId>,
    ) -> Result<BTreeSet<AuthorId>, AuthorRepositoryError>;
}
