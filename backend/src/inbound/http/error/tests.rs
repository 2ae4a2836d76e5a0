//! Regression coverage for the HTTP error mapping.

use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use actix_web::ResponseError;
use rstest::rstest;
use serde_json::Value;

use crate::domain::{Error, ErrorCode};

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("nope"), StatusCode::UNAUTHORIZED)]
#[case(Error::limit_exceeded("full"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn codes_map_to_expected_statuses(#[case] error: Error, #[case] expected: StatusCode) {
    assert_eq!(error.status_code(), expected);
}

#[tokio::test]
async fn internal_errors_are_redacted() {
    let error = Error::internal("sql syntax near line 3").with_trace_id("abc");
    let response = error.error_response();
    let body = to_bytes(response.into_body()).await.expect("body bytes");
    let value: Value = serde_json::from_slice(&body).expect("error payload");

    assert_eq!(
        value.get("error").and_then(Value::as_str),
        Some("Internal server error")
    );
    assert_eq!(value.get("traceId").and_then(Value::as_str), Some("abc"));
}

#[tokio::test]
async fn client_errors_keep_message_and_envelope() {
    let error = Error::limit_exceeded("Account limit reached for free plan");
    let response = error.error_response();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = to_bytes(response.into_body()).await.expect("body bytes");
    let value: Value = serde_json::from_slice(&body).expect("error payload");
    assert_eq!(value.get("success"), Some(&Value::Bool(false)));
    assert_eq!(
        value.get("code").and_then(Value::as_str),
        Some("limit_exceeded")
    );
    assert_eq!(
        value.get("error").and_then(Value::as_str),
        Some("Account limit reached for free plan")
    );
}

#[test]
fn actix_errors_promote_to_redacted_internal() {
    let err = Error::from(actix_web::error::ErrorBadGateway("upstream"));
    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message, "Internal server error");
}
