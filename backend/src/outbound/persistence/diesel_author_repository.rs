//! PostgreSQL-backed `AuthorRepository` implementation using Diesel ORM.

use std::collections::BTreeSet;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AuthorRepository, AuthorRepositoryError};
use crate::domain::{Author, AuthorDraft, AuthorId};

use super::diesel_basic_error_mapping::{
    is_foreign_key_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{AuthorRow, NewAuthorRow};
use super::pool::{DbPool, PoolError};
use super::schema::authors;

/// Diesel-backed implementation of the author repository port.
#[derive(Clone)]
pub struct DieselAuthorRepository {
    pool: DbPool,
}

impl DieselAuthorRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AuthorRepositoryError {
    map_basic_pool_error(error, |message| AuthorRepositoryError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> AuthorRepositoryError {
    map_basic_diesel_error(
        error,
        AuthorRepositoryError::query,
        AuthorRepositoryError::connection,
    )
}

fn row_to_author(row: AuthorRow) -> Result<Author, AuthorRepositoryError> {
    let AuthorRow {
        id,
        first_name,
        last_name,
    } = row;
    AuthorDraft::new(&first_name, &last_name)
        .map(|draft| Author::new(AuthorId::new(id), draft))
        .map_err(|err| AuthorRepositoryError::query(format!("stored author {id}: {err}")))
}

#[async_trait]
impl AuthorRepository for DieselAuthorRepository {
    async fn insert(&self, draft: &AuthorDraft) -> Result<Author, AuthorRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: AuthorRow = diesel::insert_into(authors::table)
            .values(&NewAuthorRow {
                first_name: draft.first_name(),
                last_name: draft.last_name(),
            })
            .returning(AuthorRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_author(row)
    }

    async fn find_by_id(&self, id: AuthorId) -> Result<Option<Author>, AuthorRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = authors::table
            .find(id.get())
            .select(AuthorRow::as_select())
            .first::<AuthorRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_author).transpose()
    }

    async fn list(&self) -> Result<Vec<Author>, AuthorRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<AuthorRow> = authors::table
            .order(authors::id.asc())
            .select(AuthorRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_author).collect()
    }

    async fn delete(&self, id: AuthorId) -> Result<bool, AuthorRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        match diesel::delete(authors::table.find(id.get()))
            .execute(&mut conn)
            .await
        {
            Ok(deleted) => Ok(deleted > 0),
            Err(err) if is_foreign_key_violation(&err) => {
                Err(AuthorRepositoryError::in_use(id.get()))
            }
            Err(err) => Err(map_diesel_error(err)),
        }
    }

    async fn existing_ids(
        &self,
        ids: &BTreeSet<AuthorId>,
    ) -> Result<BTreeSet<AuthorId>, AuthorRepositoryError> {
        if ids.is_empty() {
            return Ok(BTreeSet::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let raw: Vec<i64> = ids.iter().map(|id| id.get()).collect();

        let found: Vec<i64> = authors::table
            .filter(authors::id.eq_any(raw))
            .select(authors::id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(found.into_iter().map(AuthorId::new).collect())
    }
}
