//! Feed API handlers.
//!
//! ```text
//! POST /api/v1/feed/generate
//! GET  /api/v1/feed
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, SesFeed, StoredFeed};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{BearerToken, require_identity};
use crate::inbound::http::state::HttpState;

/// Response envelope for `POST /api/v1/feed/generate`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GenerateFeedResponse {
    /// Always `true` on success.
    pub success: bool,
    /// The freshly assembled document.
    pub feed: SesFeed,
}

/// Response envelope for `GET /api/v1/feed`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GetFeedResponse {
    /// Always `true` on success.
    pub success: bool,
    /// The stored document, including its storage timestamp.
    pub feed: StoredFeed,
}

/// Assemble the SES feed from the caller's connected accounts.
///
/// Overwrites any previously stored feed; fails when no accounts are
/// connected.
#[utoipa::path(
    post,
    path = "/api/v1/feed/generate",
    responses(
        (status = 200, description = "Feed generated", body = GenerateFeedResponse),
        (status = 400, description = "No connected accounts", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["feed"],
    operation_id = "generateFeed"
)]
#[post("/feed/generate")]
pub async fn generate_feed(
    state: web::Data<HttpState>,
    token: BearerToken,
) -> ApiResult<web::Json<GenerateFeedResponse>> {
    let identity = require_identity(&state, &token).await?;
    let feed = state.feed.generate(&identity).await?;
    Ok(web::Json(GenerateFeedResponse {
        success: true,
        feed,
    }))
}

/// Fetch the caller's stored feed.
#[utoipa::path(
    get,
    path = "/api/v1/feed",
    responses(
        (status = 200, description = "Stored feed", body = GetFeedResponse),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 404, description = "No feed generated yet", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["feed"],
    operation_id = "getFeed"
)]
#[get("/feed")]
pub async fn get_feed(
    state: web::Data<HttpState>,
    token: BearerToken,
) -> ApiResult<web::Json<GetFeedResponse>> {
    let identity = require_identity(&state, &token).await?;
    let feed = state.feed_query.fetch(&identity.id).await?;
    Ok(web::Json(GetFeedResponse {
        success: true,
        feed,
    }))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test, web};
    use serde_json::Value;

    use super::*;
    use crate::domain::AccessToken;
    use crate::domain::ports::{
        FixtureIdentityProvider, NO_ACCOUNTS_MESSAGE, NO_FEED_MESSAGE, ProviderIdentity,
    };
    use crate::domain::{EmailAddress, UserId};

    fn authed_state() -> HttpState {
        let provider = FixtureIdentityProvider::new();
        provider.register_token(
            &AccessToken::new("fixture-token").expect("token"),
            ProviderIdentity {
                id: UserId::random(),
                email: EmailAddress::new("ada@example.com").expect("email"),
                name: None,
            },
        );
        HttpState {
            identity: Arc::new(provider),
            ..HttpState::fixtures()
        }
    }

    fn app_with(
        state: HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().app_data(web::Data::new(state)).service(
            web::scope("/api/v1")
                .service(generate_feed)
                .service(get_feed),
        )
    }

    #[actix_web::test]
    async fn generate_requires_a_token() {
        let service = actix_test::init_service(app_with(HttpState::fixtures())).await;
        let res = actix_test::call_service(
            &service,
            actix_test::TestRequest::post()
                .uri("/api/v1/feed/generate")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn generate_maps_empty_registry_to_bad_request() {
        let service = actix_test::init_service(app_with(authed_state())).await;
        let req = actix_test::TestRequest::post()
            .uri("/api/v1/feed/generate")
            .insert_header(("Authorization", "Bearer fixture-token"))
            .to_request();
        let res = actix_test::call_service(&service, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(
            body.get("error").and_then(Value::as_str),
            Some(NO_ACCOUNTS_MESSAGE)
        );
    }

    #[actix_web::test]
    async fn get_feed_maps_missing_document_to_not_found() {
        let service = actix_test::init_service(app_with(authed_state())).await;
        let req = actix_test::TestRequest::get()
            .uri("/api/v1/feed")
            .insert_header(("Authorization", "Bearer fixture-token"))
            .to_request();
        let res = actix_test::call_service(&service, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(
            body.get("error").and_then(Value::as_str),
            Some(NO_FEED_MESSAGE)
        );
    }
}
