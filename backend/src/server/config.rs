//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use url::Url;

use backend::domain::ports::IdentityProvider;
use backend::outbound::persistence::KvStore;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

/// Builder-style configuration for creating the HTTP server.
///
/// Adapter slots left empty fall back to in-process fixtures at wiring
/// time, keeping local development and tests free of external services.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) feed_base_url: Url,
    pub(crate) kv: Option<Arc<dyn KvStore>>,
    pub(crate) identity: Option<Arc<dyn IdentityProvider>>,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Construct a server configuration from parsed settings.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, feed_base_url: Url) -> Self {
        Self {
            bind_addr,
            feed_base_url,
            kv: None,
            identity: None,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Attach a key-value store backend for the repositories.
    #[must_use]
    pub fn with_kv_store(mut self, kv: Arc<dyn KvStore>) -> Self {
        self.kv = Some(kv);
        self
    }

    /// Attach an identity provider adapter.
    #[must_use]
    pub fn with_identity_provider(mut self, identity: Arc<dyn IdentityProvider>) -> Self {
        self.identity = Some(identity);
        self
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: PrometheusMetrics) -> Self {
        self.prometheus = Some(prometheus);
        self
    }
}
