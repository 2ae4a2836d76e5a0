//! Shared validation-error helpers for inbound HTTP adapters.
//!
//! Validation failures carry a `{ field, code }` details object so clients
//! can attach messages to the offending form input.

use serde_json::json;

use crate::domain::{
    AccountValidationError, Error, SignupValidationError, UserValidationError,
};

pub(crate) fn field_error(
    field: &'static str,
    code: &'static str,
    message: impl Into<String>,
) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code,
    }))
}

pub(crate) fn map_signup_validation_error(err: SignupValidationError) -> Error {
    match err {
        SignupValidationError::PasswordTooShort { .. } => {
            field_error("password", "password_too_short", err.to_string())
        }
        SignupValidationError::User(inner) => map_user_validation_error(inner),
    }
}

pub(crate) fn map_user_validation_error(err: UserValidationError) -> Error {
    let field = match err {
        UserValidationError::EmptyEmail | UserValidationError::InvalidEmail => "email",
        UserValidationError::EmptyName | UserValidationError::NameTooLong { .. } => "name",
        UserValidationError::EmptyId | UserValidationError::InvalidId => "id",
    };
    let code = match err {
        UserValidationError::EmptyEmail => "empty_email",
        UserValidationError::InvalidEmail => "invalid_email",
        UserValidationError::EmptyName => "empty_name",
        UserValidationError::NameTooLong { .. } => "name_too_long",
        UserValidationError::EmptyId => "empty_id",
        UserValidationError::InvalidId => "invalid_id",
    };
    field_error(field, code, err.to_string())
}

pub(crate) fn map_account_validation_error(err: AccountValidationError) -> Error {
    let (field, code) = match err {
        AccountValidationError::EmptyPlatform => ("platform", "empty_platform"),
        AccountValidationError::PlatformTooLong { .. } => ("platform", "platform_too_long"),
        AccountValidationError::EmptyAccountId => ("accountId", "empty_account_id"),
        AccountValidationError::AccountIdInvalidCharacters => {
            ("accountId", "invalid_account_id")
        }
    };
    field_error(field, code, err.to_string())
}
