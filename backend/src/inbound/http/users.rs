//! Auth API handlers: signup and authenticated-user lookup.
//!
//! ```text
//! POST /api/v1/auth/signup {"email":"ada@example.com","password":"...","name":"Ada"}
//! GET  /api/v1/auth/user   (Authorization: Bearer <token>)
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AuthenticatedUser, Error, SignupDetails, SignupValidationError, UserProfile};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{BearerToken, require_identity};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::map_signup_validation_error;

/// Signup request body for `POST /api/v1/auth/signup`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignupRequest {
    /// Email address to register.
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Password, at least 8 characters.
    #[schema(example = "correct horse battery staple")]
    pub password: String,
    /// Display name stored on the profile.
    #[schema(example = "Ada Lovelace")]
    pub name: String,
}

impl TryFrom<SignupRequest> for SignupDetails {
    type Error = SignupValidationError;

    fn try_from(value: SignupRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password, &value.name)
    }
}

/// Public view of a freshly created user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupUser {
    /// Stable user identifier.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    /// Registered email address.
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Display name.
    #[schema(example = "Ada Lovelace")]
    pub name: String,
}

impl From<&UserProfile> for SignupUser {
    fn from(profile: &UserProfile) -> Self {
        Self {
            id: profile.id().as_ref().to_owned(),
            email: profile.email().as_ref().to_owned(),
            name: profile.name().as_ref().to_owned(),
        }
    }
}

/// Response envelope for `POST /api/v1/auth/signup`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignupResponse {
    /// Always `true` on success.
    pub success: bool,
    /// The created user.
    pub user: SignupUser,
}

/// Response envelope for `GET /api/v1/auth/user`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CurrentUserResponse {
    /// Always `true` on success.
    pub success: bool,
    /// Provider identity merged with the stored profile.
    pub user: AuthenticatedUser,
}

/// Create a new user account.
///
/// Validates the payload locally, registers the user with the identity
/// provider, and persists a free-tier profile record.
#[utoipa::path(
    post,
    path = "/api/v1/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Account created", body = SignupResponse),
        (status = 400, description = "Invalid payload or provider rejection", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "signup",
    security([])
)]
#[post("/auth/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<web::Json<SignupResponse>> {
    let details =
        SignupDetails::try_from(payload.into_inner()).map_err(map_signup_validation_error)?;
    let profile = state.signup.signup(details).await?;
    Ok(web::Json(SignupResponse {
        success: true,
        user: SignupUser::from(&profile),
    }))
}

/// Look up the authenticated user.
///
/// Verifies the bearer token with the identity provider and merges the
/// identity with the stored profile (name and plan).
#[utoipa::path(
    get,
    path = "/api/v1/auth/user",
    responses(
        (status = 200, description = "Authenticated user", body = CurrentUserResponse),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "currentUser"
)]
#[get("/auth/user")]
pub async fn current_user(
    state: web::Data<HttpState>,
    token: BearerToken,
) -> ApiResult<web::Json<CurrentUserResponse>> {
    let identity = require_identity(&state, &token).await?;
    let user = state.profile.current_user(&identity).await?;
    Ok(web::Json(CurrentUserResponse {
        success: true,
        user,
    }))
}
