//! Author domain service implementing the author driving ports.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::ports::{AuthorCommand, AuthorQuery, AuthorRepository, AuthorRepositoryError};
use crate::domain::{Author, AuthorDraft, AuthorFields, AuthorId, Error};

/// Author service backed by an [`AuthorRepository`].
#[derive(Clone)]
pub struct AuthorService<A> {
    authors: Arc<A>,
}

impl<A> AuthorService<A> {
    pub fn new(authors: Arc<A>) -> Self {
        Self { authors }
    }
}

impl<A> AuthorService<A>
where
    A: AuthorRepository,
{
    fn map_repository_error(error: AuthorRepositoryError) -> Error {
        match error {
            AuthorRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("author repository unavailable: {message}"))
            }
            AuthorRepositoryError::Query { message } => {
                Error::internal(format!("author repository error: {message}"))
            }
            AuthorRepositoryError::InUse { author_id } => Error::conflict(format!(
                "author {author_id} is still referenced by a document"
            ))
            .with_details(json!({ "authorId": author_id, "code": "author_in_use" })),
        }
    }

    fn not_found(id: AuthorId) -> Error {
        Error::not_found(format!("author {id} not found"))
    }
}

#[async_trait]
impl<A> AuthorCommand for AuthorService<A>
where
    A: AuthorRepository,
{
    async fn create_author(&self, fields: AuthorFields) -> Result<Author, Error> {
        let draft = AuthorDraft::try_from(fields)?;
        self.authors
            .insert(&draft)
            .await
            .map_err(Self::map_repository_error)
    }

    async fn delete_author(&self, id: AuthorId) -> Result<(), Error> {
        let deleted = self
            .authors
            .delete(id)
            .await
            .map_err(Self::map_repository_error)?;
        if deleted {
            Ok(())
        } else {
            Err(Self::not_found(id))
        }
    }
}

#[async_trait]
impl<A> AuthorQuery for AuthorService<A>
where
    A: AuthorRepository,
{
    async fn list_authors(&self) -> Result<Vec<Author>, Error> {
        self.authors
            .list()
            .await
            .map_err(Self::map_repository_error)
    }

    async fn get_author(&self, id: AuthorId) -> Result<Author, Error> {
        self.authors
            .find_by_id(id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Self::not_found(id))
    }
}
