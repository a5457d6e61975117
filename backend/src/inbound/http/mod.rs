//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod authors;
pub mod documents;
pub mod error;
pub mod health;
pub mod page;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;

use actix_web::web;

/// Register the `/api/v1` routes and their extractor configuration.
///
/// Mount inside a scope: `web::scope("/api/v1").configure(configure_api)`.
/// The application must also carry `web::Data` wrapping [`HttpState`].
///
/// [`HttpState`]: state::HttpState
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(validation::json_config())
        .app_data(validation::path_config())
        .service(documents::create_document)
        .service(documents::list_documents)
        .service(documents::get_document)
        .service(documents::update_document)
        .service(documents::delete_document)
        .service(authors::create_author)
        .service(authors::list_authors)
        .service(authors::get_author)
        .service(authors::delete_author);
}
