//! Extractor configuration turning framework parse failures into
//! the standard error payload.

use actix_web::error::{JsonPayloadError, PathError};
use actix_web::{web, HttpRequest};
use serde_json::json;
use tracing::debug;

use crate::domain::Error;

fn invalid_json_error(err: &JsonPayloadError) -> Error {
    Error::invalid_request(format!("request body is not valid JSON: {err}"))
        .with_details(json!({ "field": "body", "code": "invalid_json" }))
}

fn invalid_path_error(err: &PathError) -> Error {
    Error::invalid_request(format!("path parameter is invalid: {err}"))
        .with_details(json!({ "field": "id", "code": "invalid_path" }))
}

/// JSON body configuration for API routes.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req: &HttpRequest| {
        debug!(path = %req.path(), error = %err, "rejected request body");
        invalid_json_error(&err).into()
    })
}

/// Path parameter configuration for API routes.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, req: &HttpRequest| {
        debug!(path = %req.path(), error = %err, "rejected path parameter");
        invalid_path_error(&err).into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, App, HttpResponse};
    use rstest::rstest;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Payload {
        #[allow(dead_code)]
        title: String,
    }

    #[rstest]
    #[actix_web::test]
    async fn malformed_json_is_reported_as_invalid_request() {
        let app = test::init_service(App::new().app_data(json_config()).route(
            "/",
            web::post().to(|_: web::Json<Payload>| async { HttpResponse::Ok().finish() }),
        ))
        .await;

        let request = test::TestRequest::post()
            .uri("/")
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{\"title\":")
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(response).await;
        assert_eq!(body["code"], "invalid_request");
        assert_eq!(body["details"]["code"], "invalid_json");
    }

    #[rstest]
    #[actix_web::test]
    async fn non_numeric_path_ids_are_reported_as_invalid_request() {
        let app = test::init_service(App::new().app_data(path_config()).route(
            "/{id}",
            web::get().to(|_: web::Path<i64>| async { HttpResponse::Ok().finish() }),
        ))
        .await;

        let request = test::TestRequest::get().uri("/abc").to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(response).await;
        assert_eq!(body["details"]["code"], "invalid_path");
    }
}
