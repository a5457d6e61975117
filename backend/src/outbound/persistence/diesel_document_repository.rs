//! PostgreSQL-backed `DocumentRepository` implementation using Diesel ORM.
//!
//! A document is one `documents` row plus its `document_authors` and
//! `document_references` join rows. Writes replace the join rows inside the
//! same transaction as the content change.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{DocumentRepository, DocumentRepositoryError};
use crate::domain::{AuthorId, Document, DocumentDraft, DocumentId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{DocumentAuthorRow, DocumentReferenceRow, DocumentRow, NewDocumentRow};
use super::pool::{DbPool, PoolError};
use super::schema::{document_authors, document_references, documents};

/// Diesel-backed implementation of the document repository port.
#[derive(Clone)]
pub struct DieselDocumentRepository {
    pool: DbPool,
}

impl DieselDocumentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> DocumentRepositoryError {
    map_basic_pool_error(error, |message| DocumentRepositoryError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> DocumentRepositoryError {
    map_basic_diesel_error(
        error,
        DocumentRepositoryError::query,
        DocumentRepositoryError::connection,
    )
}

/// Identifier sets keyed by owning document.
#[derive(Default)]
struct Links {
    authors: BTreeMap<i64, BTreeSet<AuthorId>>,
    references: BTreeMap<i64, BTreeSet<DocumentId>>,
}

impl Links {
    fn take(&mut self, document_id: i64) -> (BTreeSet<AuthorId>, BTreeSet<DocumentId>) {
        (
            self.authors.remove(&document_id).unwrap_or_default(),
            self.references.remove(&document_id).unwrap_or_default(),
        )
    }
}

async fn load_links<C>(conn: &mut C, document_ids: &[i64]) -> QueryResult<Links>
where
    C: AsyncConnection<Backend = Pg> + Send,
{
    let author_rows: Vec<DocumentAuthorRow> = document_authors::table
        .filter(document_authors::document_id.eq_any(document_ids))
        .select(DocumentAuthorRow::as_select())
        .load(conn)
        .await?;
    let reference_rows: Vec<DocumentReferenceRow> = document_references::table
        .filter(document_references::document_id.eq_any(document_ids))
        .select(DocumentReferenceRow::as_select())
        .load(conn)
        .await?;

    let mut links = Links::default();
    for row in author_rows {
        links
            .authors
            .entry(row.document_id)
            .or_default()
            .insert(AuthorId::new(row.author_id));
    }
    for row in reference_rows {
        links
            .references
            .entry(row.document_id)
            .or_default()
            .insert(DocumentId::new(row.referenced_document_id));
    }
    Ok(links)
}

async fn insert_links<C>(
    conn: &mut C,
    document_id: i64,
    author_ids: &BTreeSet<AuthorId>,
    reference_ids: &BTreeSet<DocumentId>,
) -> QueryResult<()>
where
    C: AsyncConnection<Backend = Pg> + Send,
{
    let author_rows: Vec<DocumentAuthorRow> = author_ids
        .iter()
        .map(|author_id| DocumentAuthorRow {
            document_id,
            author_id: author_id.get(),
        })
        .collect();
    if !author_rows.is_empty() {
        diesel::insert_into(document_authors::table)
            .values(&author_rows)
            .execute(conn)
            .await?;
    }

    let reference_rows: Vec<DocumentReferenceRow> = reference_ids
        .iter()
        .map(|reference_id| DocumentReferenceRow {
            document_id,
            referenced_document_id: reference_id.get(),
        })
        .collect();
    if !reference_rows.is_empty() {
        diesel::insert_into(document_references::table)
            .values(&reference_rows)
            .execute(conn)
            .await?;
    }
    Ok(())
}

/// Rebuild a domain document through its validating constructors.
fn assemble(
    row: DocumentRow,
    author_ids: BTreeSet<AuthorId>,
    reference_ids: BTreeSet<DocumentId>,
) -> Result<Document, DocumentRepositoryError> {
    let DocumentRow { id, title, body } = row;
    DocumentDraft::new(title, body, author_ids, reference_ids)
        .and_then(|draft| Document::new(DocumentId::new(id), draft))
        .map_err(|err| DocumentRepositoryError::query(format!("stored document {id}: {err}")))
}

#[async_trait]
impl DocumentRepository for DieselDocumentRepository {
    async fn insert(&self, draft: &DocumentDraft) -> Result<Document, DocumentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = conn
            .transaction(|conn| {
                async move {
                    let row: DocumentRow = diesel::insert_into(documents::table)
                        .values(&NewDocumentRow {
                            title: draft.title(),
                            body: draft.body(),
                        })
                        .returning(DocumentRow::as_returning())
                        .get_result(conn)
                        .await?;
                    insert_links(conn, row.id, draft.author_ids(), draft.reference_ids()).await?;
                    Ok::<_, diesel::result::Error>(row)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        assemble(
            row,
            draft.author_ids().clone(),
            draft.reference_ids().clone(),
        )
    }

    async fn update(&self, document: &Document) -> Result<bool, DocumentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id = document.id().get();

        conn.transaction(|conn| {
            async move {
                let updated = diesel::update(documents::table.find(id))
                    .set((
                        documents::title.eq(document.title()),
                        documents::body.eq(document.body()),
                        documents::updated_at.eq(diesel::dsl::now),
                    ))
                    .execute(conn)
                    .await?;
                if updated == 0 {
                    return Ok(false);
                }

                diesel::delete(
                    document_authors::table.filter(document_authors::document_id.eq(id)),
                )
                .execute(conn)
                .await?;
                diesel::delete(
                    document_references::table.filter(document_references::document_id.eq(id)),
                )
                .execute(conn)
                .await?;
                insert_links(conn, id, document.author_ids(), document.reference_ids()).await?;
                Ok::<_, diesel::result::Error>(true)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn find_by_id(
        &self,
        id: DocumentId,
    ) -> Result<Option<Document>, DocumentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = documents::table
            .find(id.get())
            .select(DocumentRow::as_select())
            .first::<DocumentRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        let Some(row) = row else {
            return Ok(None);
        };

        let mut links = load_links(&mut conn, &[row.id])
            .await
            .map_err(map_diesel_error)?;
        let (author_ids, reference_ids) = links.take(row.id);
        assemble(row, author_ids, reference_ids).map(Some)
    }

    async fn list(&self) -> Result<Vec<Document>, DocumentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<DocumentRow> = documents::table
            .order(documents::id.asc())
            .select(DocumentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        let mut links = load_links(&mut conn, &ids)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(|row| {
                let (author_ids, reference_ids) = links.take(row.id);
                assemble(row, author_ids, reference_ids)
            })
            .collect()
    }

    async fn delete(&self, id: DocumentId) -> Result<bool, DocumentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(documents::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }

    async fn existing_ids(
        &self,
        ids: &BTreeSet<DocumentId>,
    ) -> Result<BTreeSet<DocumentId>, DocumentRepositoryError> {
        if ids.is_empty() {
            return Ok(BTreeSet::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let raw: Vec<i64> = ids.iter().map(|id| id.get()).collect();

        let found: Vec<i64> = documents::table
            .filter(documents::id.eq_any(raw))
            .select(documents::id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(found.into_iter().map(DocumentId::new).collect())
    }
}
