//! Integration tests for the Diesel document and author repositories.
//!
//! Each test runs against its own migrated database on the shared embedded
//! PostgreSQL cluster.

use std::collections::BTreeSet;

use document_service::domain::ports::{
    AuthorRepository, AuthorRepositoryError, DocumentRepository,
};
use document_service::domain::{AuthorDraft, AuthorId, Document, DocumentDraft, DocumentId};
use document_service::outbound::persistence::{
    DbPool, DieselAuthorRepository, DieselDocumentRepository, PoolConfig,
};
use pg_embedded_setup_unpriv::TemporaryDatabase;
use postgres::{Client, NoTls};
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

mod support;

use support::{
    format_postgres_error, handle_cluster_setup_failure, provision_database,
    shared_cluster_handle,
};

struct TestContext {
    runtime: Runtime,
    documents: DieselDocumentRepository,
    authors: DieselAuthorRepository,
    database_url: String,
    _database: TemporaryDatabase,
}

impl TestContext {
    fn author(&self, first: &str, last: &str) -> AuthorId {
        let draft = AuthorDraft::new(first, last).expect("valid author");
        self.runtime
            .block_on(self.authors.insert(&draft))
            .expect("author inserted")
            .id()
    }

    fn document(&self, title: &str, authors: &[AuthorId], references: &[DocumentId]) -> Document {
        let draft = DocumentDraft::new(
            title,
            format!("{title} body"),
            authors.iter().copied().collect(),
            references.iter().copied().collect(),
        )
        .expect("valid draft");
        self.runtime
            .block_on(self.documents.insert(&draft))
            .expect("document inserted")
    }

    fn find(&self, id: DocumentId) -> Option<Document> {
        self.runtime
            .block_on(self.documents.find_by_id(id))
            .expect("lookup succeeds")
    }
}

fn reference_row_count(url: &str) -> Result<i64, String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    let row = client
        .query_one("SELECT count(*) FROM document_references", &[])
        .map_err(|err| format_postgres_error(&err))?;
    Ok(row.get(0))
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = shared_cluster_handle().map_err(|err| err.to_string())?;
    let database = provision_database(cluster)?;
    let database_url = database.url().to_string();

    let config = PoolConfig::new(database_url.as_str())
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(async { DbPool::new(config).await })
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        documents: DieselDocumentRepository::new(pool.clone()),
        authors: DieselAuthorRepository::new(pool),
        database_url,
        _database: database,
    })
}

#[fixture]
fn repo_context() -> Option<TestContext> {
    match setup_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

#[rstest]
fn insert_then_find_round_trips_links(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: insert_then_find_round_trips_links skipped");
        return;
    };
    let first = ctx.author("Sreekanth", "G");
    let second = ctx.author("Ada", "Lovelace");
    let cited = ctx.document("Schedule A", &[first], &[]);

    let stored = ctx.document("Lease", &[first, second], &[cited.id()]);

    let found = ctx.find(stored.id()).expect("document present");
    assert_eq!(found, stored);
    assert_eq!(found.author_ids(), &BTreeSet::from([first, second]));
    assert_eq!(found.reference_ids(), &BTreeSet::from([cited.id()]));
}

#[rstest]
fn list_orders_by_identifier(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: list_orders_by_identifier skipped");
        return;
    };
    let author = ctx.author("Sreekanth", "G");
    let first = ctx.document("First", &[author], &[]);
    let second = ctx.document("Second", &[author], &[first.id()]);

    let listed = ctx
        .runtime
        .block_on(ctx.documents.list())
        .expect("list succeeds");

    assert_eq!(listed, vec![first, second]);
}

#[rstest]
fn update_replaces_content_and_links(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: update_replaces_content_and_links skipped");
        return;
    };
    let original_author = ctx.author("Sreekanth", "G");
    let new_author = ctx.author("Ada", "Lovelace");
    let cited = ctx.document("Schedule A", &[original_author], &[]);
    let stored = ctx.document("Lease", &[original_author], &[cited.id()]);

    let replacement = Document::new(
        stored.id(),
        DocumentDraft::new(
            "Lease v2",
            "Amended",
            BTreeSet::from([new_author]),
            BTreeSet::new(),
        )
        .expect("valid draft"),
    )
    .expect("no self reference");
    let updated = ctx
        .runtime
        .block_on(ctx.documents.update(&replacement))
        .expect("update succeeds");

    assert!(updated);
    assert_eq!(ctx.find(stored.id()), Some(replacement));
}

#[rstest]
fn update_of_missing_document_reports_false(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: update_of_missing_document_reports_false skipped");
        return;
    };
    let author = ctx.author("Sreekanth", "G");
    let ghost = Document::new(
        DocumentId::new(9_999),
        DocumentDraft::new("Ghost", "Nope", BTreeSet::from([author]), BTreeSet::new())
            .expect("valid draft"),
    )
    .expect("no self reference");

    let updated = ctx
        .runtime
        .block_on(ctx.documents.update(&ghost))
        .expect("update runs");

    assert!(!updated);
}

#[rstest]
fn delete_drops_references_to_the_document(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: delete_drops_references_to_the_document skipped");
        return;
    };
    let author = ctx.author("Sreekanth", "G");
    let cited = ctx.document("Schedule A", &[author], &[]);
    let citing = ctx.document("Lease", &[author], &[cited.id()]);

    let deleted = ctx
        .runtime
        .block_on(ctx.documents.delete(cited.id()))
        .expect("delete succeeds");
    let deleted_again = ctx
        .runtime
        .block_on(ctx.documents.delete(cited.id()))
        .expect("second delete runs");

    assert!(deleted);
    assert!(!deleted_again);
    assert!(ctx.find(cited.id()).is_none());
    let remaining = ctx.find(citing.id()).expect("citing document kept");
    assert!(remaining.reference_ids().is_empty());
    assert_eq!(reference_row_count(&ctx.database_url), Ok(0));
}

#[rstest]
fn referenced_author_cannot_be_deleted(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: referenced_author_cannot_be_deleted skipped");
        return;
    };
    let author = ctx.author("Sreekanth", "G");
    let unused = ctx.author("Ada", "Lovelace");
    ctx.document("Lease", &[author], &[]);

    let blocked = ctx.runtime.block_on(ctx.authors.delete(author));
    let removed = ctx
        .runtime
        .block_on(ctx.authors.delete(unused))
        .expect("unused author deleted");

    assert_eq!(blocked, Err(AuthorRepositoryError::in_use(author.get())));
    assert!(removed);
}

#[rstest]
fn existing_ids_filters_unknown_identifiers(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: existing_ids_filters_unknown_identifiers skipped");
        return;
    };
    let author = ctx.author("Sreekanth", "G");
    let document = ctx.document("Lease", &[author], &[]);

    let authors = ctx
        .runtime
        .block_on(
            ctx.authors
                .existing_ids(&BTreeSet::from([author, AuthorId::new(4_242)])),
        )
        .expect("author lookup");
    let documents = ctx
        .runtime
        .block_on(
            ctx.documents
                .existing_ids(&BTreeSet::from([document.id(), DocumentId::new(4_242)])),
        )
        .expect("document lookup");

    assert_eq!(authors, BTreeSet::from([author]));
    assert_eq!(documents, BTreeSet::from([document.id()]));
}
