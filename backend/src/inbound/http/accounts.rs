//! Connected-account API handlers.
//!
//! ```text
//! GET    /api/v1/accounts
//! POST   /api/v1/accounts/connect {"platform":"instagram","handle":"@ada"}
//! DELETE /api/v1/accounts/{account_id}
//! ```

use actix_web::{delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AccountId, ConnectedAccount, Error, NewAccountDetails};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{BearerToken, require_identity};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::map_account_validation_error;

/// Connect request body for `POST /api/v1/accounts/connect`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConnectRequest {
    /// Social platform to connect, e.g. `instagram`.
    #[schema(example = "instagram")]
    pub platform: String,
    /// Handle on the platform.
    #[schema(example = "@ada")]
    pub handle: Option<String>,
    /// Public profile URL.
    #[schema(example = "https://instagram.com/ada")]
    pub profile_url: Option<String>,
}

impl TryFrom<ConnectRequest> for NewAccountDetails {
    type Error = crate::domain::AccountValidationError;

    fn try_from(value: ConnectRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.platform, value.handle, value.profile_url)
    }
}

/// Response envelope for `GET /api/v1/accounts`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccountsResponse {
    /// Always `true` on success.
    pub success: bool,
    /// All accounts connected by the caller.
    pub accounts: Vec<ConnectedAccount>,
}

/// Response envelope for `POST /api/v1/accounts/connect`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConnectResponse {
    /// Always `true` on success.
    pub success: bool,
    /// The newly connected account.
    pub account: ConnectedAccount,
}

/// Response envelope for `DELETE /api/v1/accounts/{account_id}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DisconnectResponse {
    /// Always `true`; disconnecting an unknown id is not an error.
    pub success: bool,
    /// Human-readable confirmation.
    pub message: String,
}

/// List the caller's connected accounts.
#[utoipa::path(
    get,
    path = "/api/v1/accounts",
    responses(
        (status = 200, description = "Connected accounts", body = AccountsResponse),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "listAccounts"
)]
#[get("/accounts")]
pub async fn list_accounts(
    state: web::Data<HttpState>,
    token: BearerToken,
) -> ApiResult<web::Json<AccountsResponse>> {
    let identity = require_identity(&state, &token).await?;
    let accounts = state.accounts.list(&identity.id).await?;
    Ok(web::Json(AccountsResponse {
        success: true,
        accounts,
    }))
}

/// Connect a new social account, enforcing the caller's plan limit.
#[utoipa::path(
    post,
    path = "/api/v1/accounts/connect",
    request_body = ConnectRequest,
    responses(
        (status = 200, description = "Account connected", body = ConnectResponse),
        (status = 400, description = "Invalid payload", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Plan account limit reached", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "connectAccount"
)]
#[post("/accounts/connect")]
pub async fn connect_account(
    state: web::Data<HttpState>,
    token: BearerToken,
    payload: web::Json<ConnectRequest>,
) -> ApiResult<web::Json<ConnectResponse>> {
    let identity = require_identity(&state, &token).await?;
    let details =
        NewAccountDetails::try_from(payload.into_inner()).map_err(map_account_validation_error)?;
    let account = state.accounts_command.connect(&identity.id, details).await?;
    Ok(web::Json(ConnectResponse {
        success: true,
        account,
    }))
}

/// Disconnect an account by id. Idempotent: unknown ids succeed.
#[utoipa::path(
    delete,
    path = "/api/v1/accounts/{account_id}",
    params(
        ("account_id" = String, Path, description = "Connected account identifier")
    ),
    responses(
        (status = 200, description = "Account disconnected", body = DisconnectResponse),
        (status = 400, description = "Malformed account id", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "disconnectAccount"
)]
#[delete("/accounts/{account_id}")]
pub async fn disconnect_account(
    state: web::Data<HttpState>,
    token: BearerToken,
    path: web::Path<String>,
) -> ApiResult<web::Json<DisconnectResponse>> {
    let identity = require_identity(&state, &token).await?;
    let account_id =
        AccountId::new(path.into_inner()).map_err(map_account_validation_error)?;
    state
        .accounts_command
        .disconnect(&identity.id, &account_id)
        .await?;
    Ok(web::Json(DisconnectResponse {
        success: true,
        message: "Account disconnected successfully".to_owned(),
    }))
}
