//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use diesel::prelude::*;

use super::schema::{authors, document_authors, document_references, documents};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = authors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AuthorRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = authors)]
pub(crate) struct NewAuthorRow<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DocumentRow {
    pub id: i64,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = documents)]
pub(crate) struct NewDocumentRow<'a> {
    pub title: &'a str,
    pub body: &'a str,
}

/// Join row linking a document to one of its authors.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = document_authors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DocumentAuthorRow {
    pub document_id: i64,
    pub author_id: i64,
}

/// Join row linking a document to a document it cites.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = document_references)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DocumentReferenceRow {
    pub document_id: i64,
    pub referenced_document_id: i64,
}
