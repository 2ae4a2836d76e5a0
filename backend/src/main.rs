//! SES Feed backend entry point: wires settings, adapters, and the REST API.

mod server;

use std::env;
use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::outbound::identity::HttpIdentityProvider;
use backend::outbound::persistence::RedisKvStore;
use server::{AppSettings, ServerConfig};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(env::args_os())
        .wrap_err("failed to load configuration")?;
    let bind_addr = settings.bind_addr()?;
    let feed_base_url = settings.feed_base_url()?;

    let mut config = ServerConfig::new(bind_addr, feed_base_url);

    if let Some(redis_url) = settings.redis_url.as_deref() {
        let kv = RedisKvStore::connect(redis_url)
            .await
            .wrap_err("failed to connect the redis key-value store")?;
        info!("redis key-value store connected");
        config = config.with_kv_store(Arc::new(kv));
    }

    match (settings.identity_url()?, settings.identity_service_key.clone()) {
        (Some(identity_url), Some(service_key)) => {
            let provider = HttpIdentityProvider::new(identity_url, service_key)
                .wrap_err("failed to build the identity provider client")?;
            info!("identity provider client configured");
            config = config.with_identity_provider(Arc::new(provider));
        }
        (Some(_), None) => {
            warn!("identity url set without a service key; falling back to the fixture provider");
        }
        _ => {}
    }

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, "starting server");
    server::create_server(health_state, config)?
        .await
        .wrap_err("server terminated abnormally")
}
