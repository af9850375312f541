//! Builders selecting database or in-memory repositories and live or fixture
//! third-party adapters for the HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use reqwest::Url;
use tracing::{info, warn};
use zeroize::Zeroizing;

use monuments::domain::ports::{
    AssetHost, CategoryRepository, FixtureAssetHost, FixtureWeatherSource, ImageRepository,
    MonumentRepository, UserRepository, WeatherSource,
};
use monuments::inbound::http::state::{HttpState, HttpStatePorts};
use monuments::outbound::asset_host::{AssetHostCredentials, CloudinaryAssetHost};
use monuments::outbound::jwt::JwtTokenService;
use monuments::outbound::memory::MemoryStore;
use monuments::outbound::password::Argon2PasswordHasher;
use monuments::outbound::persistence::{
    DbPool, DieselCategoryRepository, DieselImageRepository, DieselMonumentRepository,
    DieselUserRepository,
};
use monuments::outbound::weather::OpenWeatherSource;
use monuments::settings::AppSettings;

use super::ServerConfig;

/// The four repository ports, backed by one store.
struct Repositories {
    users: Arc<dyn UserRepository>,
    monuments: Arc<dyn MonumentRepository>,
    categories: Arc<dyn CategoryRepository>,
    images: Arc<dyn ImageRepository>,
}

fn build_repositories(pool: Option<&DbPool>) -> Repositories {
    match pool {
        Some(pool) => Repositories {
            users: Arc::new(DieselUserRepository::new(pool.clone())),
            monuments: Arc::new(DieselMonumentRepository::new(pool.clone())),
            categories: Arc::new(DieselCategoryRepository::new(pool.clone())),
            images: Arc::new(DieselImageRepository::new(pool.clone())),
        },
        None => {
            warn!("no database configured; catalogue is held in memory");
            let store = Arc::new(MemoryStore::new());
            Repositories {
                users: store.clone(),
                monuments: store.clone(),
                categories: store.clone(),
                images: store,
            }
        }
    }
}

fn build_asset_host(
    settings: &AppSettings,
    clock: Arc<dyn Clock>,
) -> std::io::Result<Arc<dyn AssetHost>> {
    let Some((api_key, api_secret)) = settings.asset_host_credentials() else {
        info!("asset host credentials unset; uploads use placeholder URLs");
        return Ok(Arc::new(FixtureAssetHost));
    };
    let origin = Url::parse(settings.asset_host_origin())
        .map_err(|err| std::io::Error::other(format!("invalid asset host origin: {err}")))?;
    let host = CloudinaryAssetHost::new(
        &origin,
        AssetHostCredentials {
            cloud_name: settings.cloud_name().to_owned(),
            api_key: api_key.to_owned(),
            api_secret: Zeroizing::new(api_secret.to_owned()),
        },
        settings.http_timeout(),
        clock,
    )
    .map_err(std::io::Error::other)?;
    Ok(Arc::new(host))
}

fn build_weather_source(settings: &AppSettings) -> std::io::Result<Arc<dyn WeatherSource>> {
    let Some(api_key) = settings.weather_api_key.as_deref() else {
        info!("weather API key unset; weather is reported unavailable");
        return Ok(Arc::new(FixtureWeatherSource));
    };
    let endpoint = Url::parse(settings.weather_endpoint())
        .map_err(|err| std::io::Error::other(format!("invalid weather endpoint: {err}")))?;
    let source = OpenWeatherSource::new(endpoint, api_key, settings.http_timeout())
        .map_err(std::io::Error::other)?;
    Ok(Arc::new(source))
}

/// Token signing secret; falls back to the session signing key when unset.
fn token_secret(config: &ServerConfig) -> Zeroizing<Vec<u8>> {
    match config.settings.jwt_secret.as_deref() {
        Some(secret) => Zeroizing::new(secret.as_bytes().to_vec()),
        None => {
            warn!("MONUMENTS_JWT_SECRET unset; signing tokens with the session key");
            Zeroizing::new(config.session_key().signing().to_vec())
        }
    }
}

/// Assemble the ports for `config`.
fn build_ports(config: &ServerConfig) -> std::io::Result<HttpStatePorts> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let Repositories {
        users,
        monuments,
        categories,
        images,
    } = build_repositories(config.db_pool.as_ref());
    let secret = token_secret(config);
    Ok(HttpStatePorts {
        users,
        monuments,
        categories,
        images,
        assets: build_asset_host(&config.settings, clock.clone())?,
        weather: build_weather_source(&config.settings)?,
        tokens: Arc::new(JwtTokenService::new(
            secret.as_slice(),
            config.settings.jwt_ttl_secs(),
            clock.clone(),
        )),
        hasher: Arc::new(Argon2PasswordHasher),
        clock,
    })
}

/// Build the shared HTTP state from configured ports and fixture fallbacks.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    Ok(web::Data::new(HttpState::new(build_ports(config)?)))
}
