//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate
//! with `diesel print-schema` after changing a migration.

diesel::table! {
    /// Authors referenced by documents.
    authors (id) {
        id -> Int8,
        first_name -> Text,
        last_name -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Document content. Identifier sets live in the join tables.
    documents (id) {
        id -> Int8,
        title -> Text,
        body -> Text,
        created_at -> Timestamptz,
        /// Refreshed on every full replacement.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Author set of each document. Deleting a listed author is restricted.
    document_authors (document_id, author_id) {
        document_id -> Int8,
        author_id -> Int8,
    }
}

diesel::table! {
    /// Reference set of each document. Rows cascade with either side.
    document_references (document_id, referenced_document_id) {
        document_id -> Int8,
        referenced_document_id -> Int8,
    }
}

diesel::joinable!(document_authors -> authors (author_id));
diesel::joinable!(document_authors -> documents (document_id));

diesel::allow_tables_to_appear_in_same_query!(
    authors,
    documents,
    document_authors,
    document_references,
);
