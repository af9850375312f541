//! Backend entry-point: loads settings, connects persistence and serves the
//! JSON API, the rendered pages and the OpenAPI docs.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use monuments::inbound::http::health::HealthState;
use monuments::inbound::web::session_config::{
    BuildMode, key_fingerprint, session_settings_from_env,
};
use monuments::outbound::persistence::{DbPool, PoolConfig};
use monuments::settings::AppSettings;
use server::{ServerConfig, create_server};

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

    let settings = AppSettings::load().wrap_err("failed to load settings")?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .wrap_err("invalid session configuration")?;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        "session key loaded"
    );
    let bind_addr = settings
        .bind_addr()
        .wrap_err("invalid MONUMENTS_BIND_ADDR")?;

    let database_url = settings.database_url.clone();
    let mut config = ServerConfig::new(settings, session, bind_addr);
    if let Some(url) = database_url {
        let pool = DbPool::connect(PoolConfig::new(url))
            .await
            .wrap_err("failed to connect to the database")?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config).await?;
    server.await?;
    Ok(())
}
