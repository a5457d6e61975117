//! Driving port for author mutations.

use async_trait::async_trait;

use crate::domain::{Author, AuthorFields, AuthorId, Error};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthorCommand: Send + Sync {
    async fn create_author(&self, fields: AuthorFields) -> Result<Author, Error>;

    /// Remove an author no document refers to.
    async fn delete_author(&self, id: AuthorId) -> Result<(), Error>;
}
