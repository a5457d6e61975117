//! Document HTTP handlers.
//!
//! ```text
//! POST   /api/v1/documents
//! GET    /api/v1/documents
//! GET    /api/v1/documents/{id}
//! PUT    /api/v1/documents/{id}
//! DELETE /api/v1/documents/{id}
//! ```
//!
//! Every route requires the `DOCUMENT` role. Payloads pass through to the
//! document service unchanged; it owns validation.

use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::domain::{Document, DocumentFields, DocumentId, Role};
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::page::Page;
use crate::inbound::http::schemas::{
    DocumentPageSchema, DocumentRequestSchema, DocumentSchema, ErrorSchema,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Create a document.
#[utoipa::path(
    post,
    path = "/api/v1/documents",
    request_body = DocumentRequestSchema,
    responses(
        (status = 201, description = "Document created", body = DocumentSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["documents"],
    operation_id = "createDocument"
)]
#[post("/documents")]
pub async fn create_document(
    state: web::Data<HttpState>,
    auth: Authenticated,
    payload: web::Json<DocumentFields>,
) -> ApiResult<HttpResponse> {
    auth.require(Role::Document)?;
    let document = state.documents.create_document(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(document))
}

/// List every document ordered by identifier.
#[utoipa::path(
    get,
    path = "/api/v1/documents",
    responses(
        (status = 200, description = "Documents", body = DocumentPageSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["documents"],
    operation_id = "listDocuments"
)]
#[get("/documents")]
pub async fn list_documents(
    state: web::Data<HttpState>,
    auth: Authenticated,
) -> ApiResult<web::Json<Page<Document>>> {
    auth.require(Role::Document)?;
    let documents = state.documents_query.list_documents().await?;
    Ok(web::Json(Page::from(documents)))
}

/// Fetch one document.
#[utoipa::path(
    get,
    path = "/api/v1/documents/{id}",
    params(("id" = i64, Path, description = "Document identifier")),
    responses(
        (status = 200, description = "Document", body = DocumentSchema),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["documents"],
    operation_id = "getDocument"
)]
#[get("/documents/{id}")]
pub async fn get_document(
    state: web::Data<HttpState>,
    auth: Authenticated,
    id: web::Path<i64>,
) -> ApiResult<web::Json<Document>> {
    auth.require(Role::Document)?;
    let document = state
        .documents_query
        .get_document(DocumentId::new(id.into_inner()))
        .await?;
    Ok(web::Json(document))
}

/// Replace a document.
///
/// The payload is validated before the identifier is resolved, so an invalid
/// body is reported as `400` even for unknown documents.
#[utoipa::path(
    put,
    path = "/api/v1/documents/{id}",
    params(("id" = i64, Path, description = "Document identifier")),
    request_body = DocumentRequestSchema,
    responses(
        (status = 200, description = "Document updated", body = DocumentSchema),
        (status = 400, description = "Invalid request or self reference", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["documents"],
    operation_id = "updateDocument"
)]
#[put("/documents/{id}")]
pub async fn update_document(
    state: web::Data<HttpState>,
    auth: Authenticated,
    id: web::Path<i64>,
    payload: web::Json<DocumentFields>,
) -> ApiResult<web::Json<Document>> {
    auth.require(Role::Document)?;
    let document = state
        .documents
        .update_document(DocumentId::new(id.into_inner()), payload.into_inner())
        .await?;
    Ok(web::Json(document))
}

/// Delete a document.
#[utoipa::path(
    delete,
    path = "/api/v1/documents/{id}",
    params(("id" = i64, Path, description = "Document identifier")),
    responses(
        (status = 204, description = "Document deleted"),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["documents"],
    operation_id = "deleteDocument"
)]
#[delete("/documents/{id}")]
pub async fn delete_document(
    state: web::Data<HttpState>,
    auth: Authenticated,
    id: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    auth.require(Role::Document)?;
    state
        .documents
        .delete_document(DocumentId::new(id.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "documents_tests.rs"]
mod tests;
