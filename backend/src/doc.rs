//! OpenAPI documentation configuration.
//!
//! Defines [`ApiDoc`], the generated specification for the REST API. It
//! registers every endpoint from the inbound layer, the request/response
//! envelopes, and the bearer-token security scheme. Swagger UI serves the
//! document at `/docs` in debug builds.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    AuthenticatedUser, ConnectedAccount, Error, ErrorCode, FeedMeta, PlanTier, RefreshRate,
    SesFeed, SocialFeedEntry, StoredFeed, UserProfile,
};
use crate::inbound::http::accounts::{
    AccountsResponse, ConnectRequest, ConnectResponse, DisconnectResponse,
};
use crate::inbound::http::feed::{GenerateFeedResponse, GetFeedResponse};
use crate::inbound::http::users::{CurrentUserResponse, SignupRequest, SignupResponse, SignupUser};

/// Enrich the generated document with the bearer-token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "SES Feed backend API",
        description = "HTTP interface for signup, connected accounts, and SES feed generation."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::users::signup,
        crate::inbound::http::users::current_user,
        crate::inbound::http::accounts::list_accounts,
        crate::inbound::http::accounts::connect_account,
        crate::inbound::http::accounts::disconnect_account,
        crate::inbound::http::feed::generate_feed,
        crate::inbound::http::feed::get_feed,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        PlanTier,
        RefreshRate,
        UserProfile,
        AuthenticatedUser,
        ConnectedAccount,
        SesFeed,
        SocialFeedEntry,
        FeedMeta,
        StoredFeed,
        SignupRequest,
        SignupUser,
        SignupResponse,
        CurrentUserResponse,
        ConnectRequest,
        AccountsResponse,
        ConnectResponse,
        DisconnectResponse,
        GenerateFeedResponse,
        GetFeedResponse,
    )),
    tags(
        (name = "auth", description = "Signup and authenticated-user lookup"),
        (name = "accounts", description = "Connected social accounts"),
        (name = "feed", description = "SES feed generation and retrieval"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI document structure.

    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    use super::*;

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

    #[test]
    fn error_schema_matches_envelope() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get("Error").expect("Error schema");

        assert_object_schema_has_field(error_schema, "success");
        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "error");
    }

    #[test]
    fn all_endpoints_are_registered() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/auth/signup",
            "/api/v1/auth/user",
            "/api/v1/accounts",
            "/api/v1/accounts/connect",
            "/api/v1/accounts/{account_id}",
            "/api/v1/feed/generate",
            "/api/v1/feed",
            "/health/ready",
            "/health/live",
        ] {
            assert!(
                doc.paths.paths.contains_key(path),
                "OpenAPI document should register {path}"
            );
        }
    }

    #[test]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.as_ref().expect("components");
        assert!(components.security_schemes.contains_key("BearerToken"));
    }
}
