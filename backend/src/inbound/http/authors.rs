//! Author HTTP handlers.
//!
//! ```text
//! POST   /api/v1/authors
//! GET    /api/v1/authors
//! GET    /api/v1/authors/{id}
//! DELETE /api/v1/authors/{id}
//! ```

use actix_web::{delete, get, post, web, HttpResponse};

use crate::domain::{Author, AuthorFields, AuthorId, Role};
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::page::Page;
use crate::inbound::http::schemas::{AuthorPageSchema, AuthorRequestSchema, AuthorSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

#[utoipa::path(
    post,
    path = "/api/v1/authors",
    request_body = AuthorRequestSchema,
    responses(
        (status = 201, description = "Author created", body = AuthorSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["authors"],
    operation_id = "createAuthor"
)]
#[post("/authors")]
pub async fn create_author(
    state: web::Data<HttpState>,
    auth: Authenticated,
    payload: web::Json<AuthorFields>,
) -> ApiResult<HttpResponse> {
    auth.require(Role::Author)?;
    let author = state.authors.create_author(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(author))
}

#[utoipa::path(
    get,
    path = "/api/v1/authors",
    responses(
        (status = 200, description = "Authors", body = AuthorPageSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["authors"],
    operation_id = "listAuthors"
)]
#[get("/authors")]
pub async fn list_authors(
    state: web::Data<HttpState>,
    auth: Authenticated,
) -> ApiResult<web::Json<Page<Author>>> {
    auth.require(Role::Author)?;
    let authors = state.authors_query.list_authors().await?;
    Ok(web::Json(Page::from(authors)))
}

#[utoipa::path(
    get,
    path = "/api/v1/authors/{id}",
    params(("id" = i64, Path, description = "Author identifier")),
    responses(
        (status = 200, description = "Author", body = AuthorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["authors"],
    operation_id = "getAuthor"
)]
#[get("/authors/{id}")]
pub async fn get_author(
    state: web::Data<HttpState>,
    auth: Authenticated,
    id: web::Path<i64>,
) -> ApiResult<web::Json<Author>> {
    auth.require(Role::Author)?;
    let author = state
        .authors_query
        .get_author(AuthorId::new(id.into_inner()))
        .await?;
    Ok(web::Json(author))
}

/// Delete an author that no document lists.
#[utoipa::path(
    delete,
    path = "/api/v1/authors/{id}",
    params(("id" = i64, Path, description = "Author identifier")),
    responses(
        (status = 204, description = "Author deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Author still listed on a document", body = ErrorSchema)
    ),
    tags = ["authors"],
    operation_id = "deleteAuthor"
)]
#[delete("/authors/{id}")]
pub async fn delete_author(
    state: web::Data<HttpState>,
    auth: Authenticated,
    id: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    auth.require(Role::Author)?;
    state
        .authors
        .delete_author(AuthorId::new(id.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
