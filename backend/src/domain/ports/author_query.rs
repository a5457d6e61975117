//! Driving port for author reads.

use async_trait::async_trait;

use crate::domain::{Author, AuthorId, Error};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthorQuery: Send + Sync {
    async fn list_authors(&self) -> Result<Vec<Author>, Error>;

    async fn get_author(&self, id: AuthorId) -> Result<Author, Error>;
}
