//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror the wire shape of their domain counterparts and live
//! in the inbound adapter where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    #[schema(rename = "unauthorized")]
    Unauthorized,
    #[schema(rename = "forbidden")]
    Forbidden,
    #[schema(rename = "not_found")]
    NotFound,
    #[schema(rename = "conflict")]
    Conflict,
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "title must not be empty")]
    message: String,
    /// Correlation identifier, also sent as the `trace-id` header.
    #[schema(rename = "traceId", example = "6f1c1f0e-8d5b-4a53-9a55-1b0f3c2d7e10")]
    trace_id: Option<String>,
    /// Field-level context such as `{"field": "title", "code": "missing_field"}`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Document`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Document)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct DocumentSchema {
    #[schema(example = 1)]
    id: i64,
    #[schema(example = "Tenancy agreement")]
    title: String,
    #[schema(example = "Twelve month lease")]
    body: String,
    #[schema(rename = "authorIds")]
    author_ids: Vec<i64>,
    #[schema(rename = "referenceDocIds")]
    reference_doc_ids: Vec<i64>,
}

/// OpenAPI schema for [`crate::domain::DocumentFields`].
#[derive(ToSchema)]
#[schema(as = crate::domain::DocumentFields)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct DocumentRequestSchema {
    /// Required, non-empty.
    title: Option<String>,
    /// Required, non-empty.
    body: Option<String>,
    /// Required, non-empty; every id must name an existing author.
    #[schema(rename = "authorIds")]
    author_ids: Option<Vec<i64>>,
    /// Optional; every id must name an existing document other than this one.
    #[schema(rename = "referenceDocIds")]
    reference_doc_ids: Option<Vec<i64>>,
}

/// `{content: [...]}` listing of documents.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct DocumentPageSchema {
    content: Vec<DocumentSchema>,
}

/// OpenAPI schema for [`crate::domain::Author`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Author)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct AuthorSchema {
    #[schema(example = 1)]
    id: i64,
    #[schema(rename = "firstName", example = "Sreekanth")]
    first_name: String,
    #[schema(rename = "lastName", example = "G")]
    last_name: String,
}

/// OpenAPI schema for [`crate::domain::AuthorFields`].
#[derive(ToSchema)]
#[schema(as = crate::domain::AuthorFields)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct AuthorRequestSchema {
    #[schema(rename = "firstName")]
    first_name: Option<String>,
    #[schema(rename = "lastName")]
    last_name: Option<String>,
}

/// `{content: [...]}` listing of authors.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct AuthorPageSchema {
    content: Vec<AuthorSchema>,
}
