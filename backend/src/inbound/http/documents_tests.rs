//! Handler tests for the document endpoints over the in-memory store.

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, App};
use rstest::rstest;
use serde_json::{json, Value};

use super::*;
use crate::domain::ports::AuthorRepository;
use crate::domain::AuthorDraft;
use crate::inbound::http::configure_api;
use crate::inbound::http::test_utils::{basic_header, test_state_with_store};
use crate::outbound::memory::InMemoryStore;

async fn seeded_store() -> InMemoryStore {
    let store = InMemoryStore::default();
    let draft = AuthorDraft::new("Sreekanth", "G").expect("valid names");
    store.authors().insert(&draft).await.expect("seed author");
    store
}

async fn app(
    store: &InMemoryStore,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(test_state_with_store(store)))
            .service(web::scope("/api/v1").configure(configure_api)),
    )
    .await
}

fn document_auth() -> (&'static str, String) {
    ("Authorization", basic_header("documents", "documents-secret"))
}

fn payload(title: &str, references: Value) -> Value {
    json!({
        "title": title,
        "body": "Twelve month lease",
        "authorIds": [1],
        "referenceDocIds": references,
    })
}

async fn create(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    body: Value,
) -> ServiceResponse {
    test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/documents")
            .insert_header(document_auth())
            .set_json(body)
            .to_request(),
    )
    .await
}

#[rstest]
#[actix_web::test]
async fn create_returns_the_stored_document() {
    let store = seeded_store().await;
    let app = app(&store).await;

    let response = create(&app, payload("Tenancy agreement", Value::Null)).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(
        body,
        json!({
            "id": 1,
            "title": "Tenancy agreement",
            "body": "Twelve month lease",
            "authorIds": [1],
            "referenceDocIds": [],
        })
    );
}

#[rstest]
#[case::missing_title(json!({"body": "b", "authorIds": [1]}), "missing_field")]
#[case::empty_body(json!({"title": "t", "body": "", "authorIds": [1]}), "missing_field")]
#[case::null_authors(json!({"title": "t", "body": "b", "authorIds": null}), "missing_field")]
#[case::unknown_author(json!({"title": "t", "body": "b", "authorIds": [9]}), "unknown_author")]
#[case::unknown_reference(
    json!({"title": "t", "body": "b", "authorIds": [1], "referenceDocIds": [9]}),
    "unknown_reference"
)]
#[case::wrong_type(json!({"title": "t", "body": "b", "authorIds": "one"}), "invalid_json")]
#[actix_web::test]
async fn create_rejects_invalid_payloads(#[case] body: Value, #[case] detail_code: &str) {
    let store = seeded_store().await;
    let app = app(&store).await;

    let response = create(&app, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["code"], detail_code);
}

#[rstest]
#[actix_web::test]
async fn update_replaces_the_document() {
    let store = seeded_store().await;
    let app = app(&store).await;
    create(&app, payload("First", Value::Null)).await;
    create(&app, payload("Second", Value::Null)).await;

    let response = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/v1/documents/2")
            .insert_header(document_auth())
            .set_json(payload("Second, revised", json!([1])))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["title"], "Second, revised");
    assert_eq!(body["referenceDocIds"], json!([1]));
}

#[rstest]
#[case::self_reference(1, payload("Loop", json!([1])), StatusCode::BAD_REQUEST)]
#[case::unknown_id(42, payload("Ghost", Value::Null), StatusCode::NOT_FOUND)]
#[case::invalid_before_lookup(42, json!({"title": ""}), StatusCode::BAD_REQUEST)]
#[actix_web::test]
async fn update_reports_failures(
    #[case] id: i64,
    #[case] body: Value,
    #[case] expected: StatusCode,
) {
    let store = seeded_store().await;
    let app = app(&store).await;
    create(&app, payload("First", Value::Null)).await;

    let response = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/v1/documents/{id}"))
            .insert_header(document_auth())
            .set_json(body)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), expected);
}

#[rstest]
#[actix_web::test]
async fn list_wraps_documents_in_content() {
    let store = seeded_store().await;
    let app = app(&store).await;

    let empty: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/documents")
            .insert_header(document_auth())
            .to_request(),
    )
    .await;
    assert_eq!(empty, json!({"content": []}));

    create(&app, payload("First", Value::Null)).await;
    create(&app, payload("Second", Value::Null)).await;

    let listed: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/documents")
            .insert_header(document_auth())
            .to_request(),
    )
    .await;
    let titles: Vec<&str> = listed["content"]
        .as_array()
        .expect("content array")
        .iter()
        .filter_map(|doc| doc["title"].as_str())
        .collect();
    assert_eq!(titles, vec!["First", "Second"]);
}

#[rstest]
#[actix_web::test]
async fn delete_then_get_reports_not_found() {
    let store = seeded_store().await;
    let app = app(&store).await;
    create(&app, payload("Doomed", Value::Null)).await;

    let deleted = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri("/api/v1/documents/1")
            .insert_header(document_auth())
            .to_request(),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    for request in [
        test::TestRequest::get().uri("/api/v1/documents/1"),
        test::TestRequest::delete().uri("/api/v1/documents/1"),
    ] {
        let response =
            test::call_service(&app, request.insert_header(document_auth()).to_request()).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

#[rstest]
#[actix_web::test]
async fn non_numeric_ids_are_rejected() {
    let store = seeded_store().await;
    let app = app(&store).await;

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/documents/abc")
            .insert_header(document_auth())
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[actix_web::test]
async fn requests_without_credentials_are_challenged() {
    let store = seeded_store().await;
    let app = app(&store).await;

    let response = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/documents").to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response
            .headers()
            .get("WWW-Authenticate")
            .and_then(|v| v.to_str().ok()),
        Some("Basic realm=\"documents\"")
    );
}

#[rstest]
#[actix_web::test]
async fn authors_listed_on_documents_cannot_be_deleted() {
    let store = seeded_store().await;
    let app = app(&store).await;
    create(&app, payload("Keeps author", Value::Null)).await;

    let response = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri("/api/v1/authors/1")
            .insert_header(("Authorization", basic_header("authors", "authors-secret")))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}
