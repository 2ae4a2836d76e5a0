//! Reqwest-backed identity provider adapter.
//!
//! This adapter owns transport details only: request serialisation, timeout
//! and HTTP error mapping, and JSON decoding into the domain's
//! [`ProviderIdentity`]. The wire shape follows the hosted provider's admin
//! API: `POST {base}/admin/users` with the service-role key creates a user,
//! `GET {base}/user` with the subject's bearer token resolves it.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{IdentityProvider, IdentityProviderError, ProviderIdentity};
use crate::domain::{AccessToken, EmailAddress, SignupDetails, UserId, UserName};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Identity provider adapter performing HTTP requests against one endpoint.
pub struct HttpIdentityProvider {
    client: Client,
    base: Url,
    service_key: String,
}

impl HttpIdentityProvider {
    /// Build an adapter with the default request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url, service_key: impl Into<String>) -> Result<Self, reqwest::Error> {
        Self::with_timeout(base, service_key, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_timeout(
        base: Url,
        service_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base,
            service_key: service_key.into(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base.as_str().trim_end_matches('/'))
    }
}

#[derive(Serialize)]
struct CreateUserBody<'a> {
    email: &'a str,
    password: &'a str,
    user_metadata: UserMetadataBody<'a>,
    // The product sends no verification mail; confirm the address up front.
    email_confirm: bool,
}

#[derive(Serialize)]
struct UserMetadataBody<'a> {
    name: &'a str,
}

#[derive(Debug, Deserialize)]
struct ProviderUserDto {
    id: String,
    email: Option<String>,
    user_metadata: Option<ProviderMetadataDto>,
}

#[derive(Debug, Deserialize)]
struct ProviderMetadataDto {
    name: Option<String>,
}

impl ProviderUserDto {
    fn into_identity(self) -> Result<ProviderIdentity, IdentityProviderError> {
        let id = UserId::new(&self.id).map_err(|err| {
            IdentityProviderError::decode(format!("invalid user id {:?}: {err}", self.id))
        })?;
        let email = self
            .email
            .ok_or_else(|| IdentityProviderError::decode("user payload missing email"))?;
        let email = EmailAddress::new(email)
            .map_err(|err| IdentityProviderError::decode(format!("invalid email: {err}")))?;
        let name = self
            .user_metadata
            .and_then(|metadata| metadata.name)
            .and_then(|name| UserName::new(name).ok());
        Ok(ProviderIdentity { id, email, name })
    }
}

#[derive(Debug, Deserialize)]
struct ProviderErrorDto {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
}

impl ProviderErrorDto {
    fn into_message(self) -> Option<String> {
        self.msg.or(self.message).or(self.error_description)
    }
}

fn map_transport_error(error: reqwest::Error) -> IdentityProviderError {
    IdentityProviderError::transport(error.to_string())
}

fn rejection_message(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<ProviderErrorDto>(body)
        .ok()
        .and_then(ProviderErrorDto::into_message)
        .unwrap_or_else(|| format!("status {}", status.as_u16()))
}

fn map_create_status_error(status: StatusCode, body: &[u8]) -> IdentityProviderError {
    if status.is_client_error() {
        IdentityProviderError::rejected(rejection_message(status, body))
    } else {
        IdentityProviderError::transport(format!("status {}", status.as_u16()))
    }
}

fn map_verify_status_error(status: StatusCode, body: &[u8]) -> IdentityProviderError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            IdentityProviderError::invalid_token(rejection_message(status, body))
        }
        _ if status.is_client_error() => {
            IdentityProviderError::rejected(rejection_message(status, body))
        }
        _ => IdentityProviderError::transport(format!("status {}", status.as_u16())),
    }
}

fn parse_user(body: &[u8]) -> Result<ProviderIdentity, IdentityProviderError> {
    let decoded: ProviderUserDto = serde_json::from_slice(body).map_err(|error| {
        IdentityProviderError::decode(format!("invalid user payload: {error}"))
    })?;
    decoded.into_identity()
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn create_user(
        &self,
        details: &SignupDetails,
    ) -> Result<ProviderIdentity, IdentityProviderError> {
        let body = CreateUserBody {
            email: details.email().as_ref(),
            password: details.password().expose(),
            user_metadata: UserMetadataBody {
                name: details.name().as_ref(),
            },
            email_confirm: true,
        };

        let response = self
            .client
            .post(self.endpoint("admin/users"))
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let payload = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_create_status_error(status, payload.as_ref()));
        }

        parse_user(payload.as_ref())
    }

    async fn verify_token(
        &self,
        token: &AccessToken,
    ) -> Result<ProviderIdentity, IdentityProviderError> {
        let response = self
            .client
            .get(self.endpoint("user"))
            .bearer_auth(token.expose())
            .header("apikey", &self.service_key)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let payload = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_verify_status_error(status, payload.as_ref()));
        }

        parse_user(payload.as_ref())
    }
}
