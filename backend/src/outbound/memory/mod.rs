//! In-memory store backing both repository ports when no database is
//! configured, and in handler tests.
//!
//! Both repositories share one state so that referential rules hold across
//! them: deleting a document drops it from other documents' reference sets,
//! and an author listed on a document cannot be deleted. The mutex is never
//! held across an await point.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    AuthorRepository, AuthorRepositoryError, DocumentRepository, DocumentRepositoryError,
};
use crate::domain::{Author, AuthorDraft, AuthorId, Document, DocumentDraft, DocumentId};

#[derive(Debug, Clone)]
struct StoredDocument {
    title: String,
    body: String,
    author_ids: BTreeSet<AuthorId>,
    reference_ids: BTreeSet<DocumentId>,
}

impl StoredDocument {
    fn from_parts(
        title: &str,
        body: &str,
        author_ids: &BTreeSet<AuthorId>,
        reference_ids: &BTreeSet<DocumentId>,
    ) -> Self {
        Self {
            title: title.to_owned(),
            body: body.to_owned(),
            author_ids: author_ids.clone(),
            reference_ids: reference_ids.clone(),
        }
    }

    fn to_document(&self, id: DocumentId) -> Result<Document, DocumentRepositoryError> {
        DocumentDraft::new(
            self.title.clone(),
            self.body.clone(),
            self.author_ids.clone(),
            self.reference_ids.clone(),
        )
        .and_then(|draft| Document::new(id, draft))
        .map_err(|err| DocumentRepositoryError::query(format!("stored document {id}: {err}")))
    }
}

#[derive(Debug, Default)]
struct State {
    last_document_id: i64,
    documents: BTreeMap<DocumentId, StoredDocument>,
    last_author_id: i64,
    authors: BTreeMap<AuthorId, Author>,
}

/// Shared in-memory state handing out repository views.
///
/// # Examples
/// ```
/// use document_service::outbound::memory::InMemoryStore;
///
/// let store = InMemoryStore::default();
/// let documents = store.documents();
/// let authors = store.authors();
/// # let _ = (documents, authors);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryStore {
    pub fn documents(&self) -> InMemoryDocumentRepository {
        InMemoryDocumentRepository {
            state: Arc::clone(&self.state),
        }
    }

    pub fn authors(&self) -> InMemoryAuthorRepository {
        InMemoryAuthorRepository {
            state: Arc::clone(&self.state),
        }
    }
}

fn lock(state: &Mutex<State>) -> MutexGuard<'_, State> {
    state.lock().unwrap_or_else(|err| err.into_inner())
}

/// Document repository view over an [`InMemoryStore`].
#[derive(Debug, Clone)]
pub struct InMemoryDocumentRepository {
    state: Arc<Mutex<State>>,
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn insert(&self, draft: &DocumentDraft) -> Result<Document, DocumentRepositoryError> {
        let mut state = lock(&self.state);
        state.last_document_id += 1;
        let id = DocumentId::new(state.last_document_id);
        let stored = StoredDocument::from_parts(
            draft.title(),
            draft.body(),
            draft.author_ids(),
            draft.reference_ids(),
        );
        let document = stored.to_document(id)?;
        state.documents.insert(id, stored);
        Ok(document)
    }

    async fn update(&self, document: &Document) -> Result<bool, DocumentRepositoryError> {
        let mut state = lock(&self.state);
        let Some(slot) = state.documents.get_mut(&document.id()) else {
            return Ok(false);
        };
        *slot = StoredDocument::from_parts(
            document.title(),
            document.body(),
            document.author_ids(),
            document.reference_ids(),
        );
        Ok(true)
    }

    async fn find_by_id(
        &self,
        id: DocumentId,
    ) -> Result<Option<Document>, DocumentRepositoryError> {
        let state = lock(&self.state);
        state
            .documents
            .get(&id)
            .map(|stored| stored.to_document(id))
            .transpose()
    }

    async fn list(&self) -> Result<Vec<Document>, DocumentRepositoryError> {
        let state = lock(&self.state);
        state
            .documents
            .iter()
            .map(|(id, stored)| stored.to_document(*id))
            .collect()
    }

    async fn delete(&self, id: DocumentId) -> Result<bool, DocumentRepositoryError> {
        let mut state = lock(&self.state);
        if state.documents.remove(&id).is_none() {
            return Ok(false);
        }
        for stored in state.documents.values_mut() {
            stored.reference_ids.remove(&id);
        }
        Ok(true)
    }

    async fn existing_ids(
        &self,
        ids: &BTreeSet<DocumentId>,
    ) -> Result<BTreeSet<DocumentId>, DocumentRepositoryError> {
        let state = lock(&self.state);
        Ok(ids
            .iter()
            .copied()
            .filter(|id| state.documents.contains_key(id))
            .collect())
    }
}

/// Author repository view over an [`InMemoryStore`].
#[derive(Debug, Clone)]
pub struct InMemoryAuthorRepository {
    state: Arc<Mutex<State>>,
}

#[async_trait]
impl AuthorRepository for InMemoryAuthorRepository {
    async fn insert(&self, draft: &AuthorDraft) -> Result<Author, AuthorRepositoryError> {
        let mut state = lock(&self.state);
        state.last_author_id += 1;
        let id = AuthorId::new(state.last_author_id);
        let author = Author::new(id, draft.clone());
        state.authors.insert(id, author.clone());
        Ok(author)
    }

    async fn find_by_id(&self, id: AuthorId) -> Result<Option<Author>, AuthorRepositoryError> {
        Ok(lock(&self.state).authors.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Author>, AuthorRepositoryError> {
        Ok(lock(&self.state).authors.values().cloned().collect())
    }

    async fn delete(&self, id: AuthorId) -> Result<bool, AuthorRepositoryError> {
        let mut state = lock(&self.state);
        if !state.authors.contains_key(&id) {
            return Ok(false);
        }
        if state
            .documents
            .values()
            .any(|stored| stored.author_ids.contains(&id))
        {
            return Err(AuthorRepositoryError::in_use(id.get()));
        }
        state.authors.remove(&id);
        Ok(true)
    }

    async fn existing_ids(
        &self,
        ids: &BTreeSet<AuthorId>,
    ) -> Result<BTreeSet<AuthorId>, AuthorRepositoryError> {
        let state = lock(&self.state);
        Ok(ids
            .iter()
            .copied()
            .filter(|id| state.authors.contains_key(id))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    //! Referential behaviour of the shared in-memory store.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn store() -> InMemoryStore {
        InMemoryStore::default()
    }

    async fn seed_author(store: &InMemoryStore) -> AuthorId {
        let draft = AuthorDraft::new("Sreekanth", "G").expect("valid names");
        store
            .authors()
            .insert(&draft)
            .await
            .expect("insert author")
            .id()
    }

    fn draft(author: AuthorId, references: &[DocumentId]) -> DocumentDraft {
        DocumentDraft::new(
            "Title",
            "Body",
            BTreeSet::from([author]),
            references.iter().copied().collect(),
        )
        .expect("valid draft")
    }

    #[rstest]
    #[tokio::test]
    async fn assigns_increasing_identifiers(store: InMemoryStore) {
        let author = seed_author(&store).await;
        let documents = store.documents();

        let first = documents.insert(&draft(author, &[])).await.expect("insert");
        let second = documents.insert(&draft(author, &[])).await.expect("insert");

        assert_eq!(first.id(), DocumentId::new(1));
        assert_eq!(second.id(), DocumentId::new(2));
        let listed: Vec<_> = documents
            .list()
            .await
            .expect("list")
            .iter()
            .map(Document::id)
            .collect();
        assert_eq!(listed, vec![first.id(), second.id()]);
    }

    #[rstest]
    #[tokio::test]
    async fn deleting_a_document_removes_inbound_references(store: InMemoryStore) {
        let author = seed_author(&store).await;
        let documents = store.documents();
        let cited = documents.insert(&draft(author, &[])).await.expect("insert");
        let citing = documents
            .insert(&draft(author, &[cited.id()]))
            .await
            .expect("insert");

        assert!(documents.delete(cited.id()).await.expect("delete"));

        let reloaded = documents
            .find_by_id(citing.id())
            .await
            .expect("lookup")
            .expect("citing document remains");
        assert!(reloaded.reference_ids().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn authors_on_documents_cannot_be_deleted(store: InMemoryStore) {
        let author = seed_author(&store).await;
        store
            .documents()
            .insert(&draft(author, &[]))
            .await
            .expect("insert");

        let result = store.authors().delete(author).await;

        assert_eq!(result, Err(AuthorRepositoryError::in_use(author.get())));
    }

    #[rstest]
    #[tokio::test]
    async fn update_of_missing_document_reports_false(store: InMemoryStore) {
        let author = seed_author(&store).await;
        let ghost = Document::new(DocumentId::new(99), draft(author, &[])).expect("valid");

        assert!(!store.documents().update(&ghost).await.expect("update"));
    }

    #[rstest]
    #[tokio::test]
    async fn existing_ids_filters_unknown_values(store: InMemoryStore) {
        let author = seed_author(&store).await;

        let found = store
            .authors()
            .existing_ids(&BTreeSet::from([author, AuthorId::new(50)]))
            .await
            .expect("lookup");

        assert_eq!(found, BTreeSet::from([author]));
    }
}
