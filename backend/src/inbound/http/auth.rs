//! Bearer-token extraction and identity resolution for HTTP handlers.
//!
//! Signup is the only unauthenticated endpoint; everything else extracts a
//! [`BearerToken`] from the `Authorization` header and resolves it through
//! the identity provider port. Raw tokens never reach log output; failures
//! log the SHA-256 fingerprint prefix instead.

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{Ready, ready};
use tracing::warn;

use crate::domain::ports::ProviderIdentity;
use crate::domain::{AccessToken, Error};
use crate::inbound::http::state::HttpState;

const BEARER_PREFIX: &str = "Bearer ";

/// Bearer token extracted from the `Authorization` request header.
pub struct BearerToken(AccessToken);

impl BearerToken {
    /// The extracted token.
    #[must_use]
    pub fn token(&self) -> &AccessToken {
        &self.0
    }

    fn parse(req: &HttpRequest) -> Result<Self, Error> {
        let header = req
            .headers()
            .get(header::AUTHORIZATION)
            .ok_or_else(|| Error::unauthorized("No authorization token provided"))?;
        let value = header
            .to_str()
            .map_err(|_| Error::unauthorized("Invalid authorization header"))?;
        let raw = value
            .strip_prefix(BEARER_PREFIX)
            .ok_or_else(|| Error::unauthorized("Authorization header must use the Bearer scheme"))?;
        let token = AccessToken::new(raw)
            .map_err(|_| Error::unauthorized("No authorization token provided"))?;
        Ok(Self(token))
    }
}

impl FromRequest for BearerToken {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::parse(req))
    }
}

/// Resolve a bearer token to the provider identity it was issued for.
pub async fn require_identity(
    state: &HttpState,
    token: &BearerToken,
) -> Result<ProviderIdentity, Error> {
    state
        .identity
        .verify_token(token.token())
        .await
        .map_err(|err| {
            warn!(
                token_fingerprint = %token.token().fingerprint(),
                error = %err,
                "bearer token verification failed"
            );
            Error::from(err)
        })
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;

    use super::*;
    use crate::domain::ApiResult;

    async fn token_echo(token: BearerToken) -> ApiResult<HttpResponse> {
        Ok(HttpResponse::Ok().body(token.token().expose().to_owned()))
    }

    fn app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().route("/", web::get().to(token_echo))
    }

    #[actix_web::test]
    async fn extracts_token_from_bearer_header() {
        let service = test::init_service(app()).await;
        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((header::AUTHORIZATION, "Bearer shiny-token"))
            .to_request();
        let res = test::call_service(&service, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        assert_eq!(body, "shiny-token");
    }

    #[rstest]
    #[case(None)]
    #[case(Some("Basic dXNlcjpwdw=="))]
    #[case(Some("Bearer "))]
    #[case(Some("Bearer    "))]
    #[actix_web::test]
    async fn rejects_missing_or_malformed_headers(#[case] header_value: Option<&str>) {
        let service = test::init_service(app()).await;
        let mut req = test::TestRequest::get().uri("/");
        if let Some(value) = header_value {
            req = req.insert_header((header::AUTHORIZATION, value));
        }
        let res = test::call_service(&service, req.to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
