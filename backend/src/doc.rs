//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every document, author and health endpoint, the
//! schema wrappers from [`crate::inbound::http::schemas`] and the HTTP Basic
//! security scheme. Swagger UI serves it in debug builds and
//! `cargo run --bin openapi-dump` exports it for tooling.

use crate::inbound::http::schemas::{
    AuthorPageSchema, AuthorRequestSchema, AuthorSchema, DocumentPageSchema,
    DocumentRequestSchema, DocumentSchema, ErrorCodeSchema, ErrorSchema,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the Basic authentication scheme in the generated document.
pub const BASIC_AUTH_SCHEME: &str = "BasicAuth";

/// Enrich the generated document with the Basic authentication scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BASIC_AUTH_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Basic)
                    .description(Some(
                        "Configured principal; document routes need the DOCUMENT role.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Document service API",
        description = "CRUD access to documents and their authors, with change events."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BasicAuth" = [])),
    paths(
        crate::inbound::http::documents::create_document,
        crate::inbound::http::documents::list_documents,
        crate::inbound::http::documents::get_document,
        crate::inbound::http::documents::update_document,
        crate::inbound::http::documents::delete_document,
        crate::inbound::http::authors::create_author,
        crate::inbound::http::authors::list_authors,
        crate::inbound::http::authors::get_author,
        crate::inbound::http::authors::delete_author,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        DocumentSchema,
        DocumentRequestSchema,
        DocumentPageSchema,
        AuthorSchema,
        AuthorRequestSchema,
        AuthorPageSchema,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "documents", description = "Document records and their references"),
        (name = "authors", description = "Authors credited on documents"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated OpenAPI document.

    use super::*;
    use rstest::rstest;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    // utoipa replaces :: with . in schema names
    #[rstest]
    #[case("crate.domain.Error", &["code", "message", "traceId"])]
    #[case("crate.domain.Document", &["id", "title", "body", "authorIds", "referenceDocIds"])]
    #[case("crate.domain.Author", &["id", "firstName", "lastName"])]
    #[case("DocumentPageSchema", &["content"])]
    fn schemas_expose_wire_fields(#[case] name: &str, #[case] fields: &[&str]) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(name).expect("schema registered");

        for field in fields {
            assert_object_schema_has_field(schema, field);
        }
    }

    #[rstest]
    fn document_paths_are_registered() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/api/v1/documents"));
        assert!(doc.paths.paths.contains_key("/api/v1/documents/{id}"));
        assert!(doc.paths.paths.contains_key("/health/ready"));
    }

    #[rstest]
    fn basic_auth_scheme_is_declared() {
        let doc = ApiDoc::openapi();
        let components = doc.components.as_ref().expect("components");

        assert!(matches!(
            components.security_schemes.get(BASIC_AUTH_SCHEME),
            Some(SecurityScheme::Http(_))
        ));
    }
}
