//! Application settings loaded via OrthoConfig.
//!
//! All values come from `SESFEED_*` environment variables (or CLI flags /
//! config file, per OrthoConfig's layering) and are optional: absent
//! adapter settings wire in-process fixtures instead, so a bare `backend`
//! binary starts a fully self-contained development server.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_FEED_BASE_URL: &str = "https://api.sesfeed.com";

/// Settings failures surfaced at startup.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The bind address could not be parsed as `host:port`.
    #[error("invalid bind address {value:?}: {source}")]
    BindAddr {
        /// Offending value.
        value: String,
        /// Parse failure.
        source: std::net::AddrParseError,
    },
    /// A URL setting could not be parsed.
    #[error("invalid {setting} {value:?}: {source}")]
    Url {
        /// Which setting failed.
        setting: &'static str,
        /// Offending value.
        value: String,
        /// Parse failure.
        source: url::ParseError,
    },
}

/// Configuration values controlling the HTTP server and outbound adapters.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SESFEED")]
pub struct AppSettings {
    /// Socket address to bind, `0.0.0.0:8080` when unset.
    pub bind_addr: Option<String>,
    /// Redis URL for the key-value store; in-memory store when unset.
    pub redis_url: Option<String>,
    /// Identity provider base URL; fixture provider when unset.
    pub identity_url: Option<String>,
    /// Service-role key for identity provider admin calls.
    pub identity_service_key: Option<String>,
    /// Public origin synthesized feed URLs point at.
    pub feed_base_url: Option<String>,
}

impl AppSettings {
    /// Parsed bind address, falling back to the default.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|source| SettingsError::BindAddr {
            value: raw.to_owned(),
            source,
        })
    }

    /// Parsed feed base URL, falling back to the default.
    pub fn feed_base_url(&self) -> Result<Url, SettingsError> {
        let raw = self.feed_base_url.as_deref().unwrap_or(DEFAULT_FEED_BASE_URL);
        Url::parse(raw).map_err(|source| SettingsError::Url {
            setting: "feed base url",
            value: raw.to_owned(),
            source,
        })
    }

    /// Parsed identity provider base URL, when configured.
    pub fn identity_url(&self) -> Result<Option<Url>, SettingsError> {
        self.identity_url
            .as_deref()
            .map(|raw| {
                Url::parse(raw).map_err(|source| SettingsError::Url {
                    setting: "identity provider url",
                    value: raw.to_owned(),
                    source,
                })
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    use super::*;

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("backend")]).expect("settings should load")
    }

    #[rstest]
    fn defaults_apply_when_environment_is_empty() {
        let _guard = lock_env([
            ("SESFEED_BIND_ADDR", None::<String>),
            ("SESFEED_REDIS_URL", None::<String>),
            ("SESFEED_IDENTITY_URL", None::<String>),
            ("SESFEED_IDENTITY_SERVICE_KEY", None::<String>),
            ("SESFEED_FEED_BASE_URL", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default bind addr").to_string(),
            "0.0.0.0:8080"
        );
        assert_eq!(
            settings.feed_base_url().expect("default feed url").as_str(),
            "https://api.sesfeed.com/"
        );
        assert!(settings.redis_url.is_none());
        assert!(settings.identity_url().expect("no identity url").is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("SESFEED_BIND_ADDR", Some("127.0.0.1:9090".to_owned())),
            ("SESFEED_REDIS_URL", Some("redis://cache:6379".to_owned())),
            (
                "SESFEED_IDENTITY_URL",
                Some("https://auth.example.com/auth/v1".to_owned()),
            ),
            ("SESFEED_IDENTITY_SERVICE_KEY", Some("service-key".to_owned())),
            (
                "SESFEED_FEED_BASE_URL",
                Some("https://feeds.example.com".to_owned()),
            ),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("bind addr").to_string(),
            "127.0.0.1:9090"
        );
        assert_eq!(settings.redis_url.as_deref(), Some("redis://cache:6379"));
        assert_eq!(
            settings
                .identity_url()
                .expect("identity url parses")
                .map(|url| url.as_str().to_owned()),
            Some("https://auth.example.com/auth/v1".to_owned())
        );
        assert_eq!(
            settings.feed_base_url().expect("feed url").as_str(),
            "https://feeds.example.com/"
        );
    }

    #[rstest]
    fn malformed_bind_addr_is_rejected() {
        let _guard = lock_env([("SESFEED_BIND_ADDR", Some("nonsense".to_owned()))]);

        let settings = load_from_empty_args();
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::BindAddr { .. })
        ));
    }
}
