//! Test utilities for the backend crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`). The
//! fixtures run the full service stack over the in-memory store with the
//! fixture asset host and weather source, so no network or database is
//! touched.

pub mod multipart;

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use mockable::{Clock, DefaultClock};

use crate::domain::ports::{AssetHost, FixtureAssetHost, FixtureWeatherSource, WeatherSource};
use crate::domain::{AccountPayload, User, UserType, account_details_from_payload};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::jwt::JwtTokenService;
use crate::outbound::memory::MemoryStore;
use crate::outbound::password::Argon2PasswordHasher;

/// Signing secret used by every fixture token service.
pub const TEST_TOKEN_SECRET: &str = "monument-test-secret";
/// Password given to seeded accounts.
pub const TEST_PASSWORD: &str = "secret";

/// In-memory catalogue and the HTTP state built over it.
#[derive(Clone)]
pub struct TestCatalogue {
    pub store: Arc<MemoryStore>,
    pub state: HttpState,
}

/// Ports over `store` with the fixture asset host and weather source.
pub fn fixture_ports(store: &Arc<MemoryStore>) -> HttpStatePorts {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    HttpStatePorts {
        users: store.clone(),
        monuments: store.clone(),
        categories: store.clone(),
        images: store.clone(),
        assets: Arc::new(FixtureAssetHost),
        weather: Arc::new(FixtureWeatherSource),
        tokens: Arc::new(JwtTokenService::new(TEST_TOKEN_SECRET, 3600, clock.clone())),
        hasher: Arc::new(Argon2PasswordHasher),
        clock,
    }
}

/// Empty catalogue with fixture adapters.
pub fn fixture_catalogue() -> TestCatalogue {
    fixture_catalogue_with(Arc::new(FixtureAssetHost), Arc::new(FixtureWeatherSource))
}

/// Empty catalogue with the given asset host and weather source.
pub fn fixture_catalogue_with(
    assets: Arc<dyn AssetHost>,
    weather: Arc<dyn WeatherSource>,
) -> TestCatalogue {
    let store = Arc::new(MemoryStore::new());
    let mut ports = fixture_ports(&store);
    ports.assets = assets;
    ports.weather = weather;
    TestCatalogue {
        state: HttpState::new(ports),
        store,
    }
}

/// Signup payload for an account with [`TEST_PASSWORD`].
pub fn account_payload(first_name: &str, email: &str, user_type: UserType) -> AccountPayload {
    AccountPayload {
        first_name: first_name.to_owned(),
        last_name: "Simpson".to_owned(),
        email: email.to_owned(),
        password: TEST_PASSWORD.to_owned(),
        user_type: Some(user_type.as_str().to_owned()),
    }
}

/// Register an account through the account service.
///
/// # Panics
///
/// Panics when the payload is rejected or the email is already taken.
pub async fn seed_user(
    state: &HttpState,
    first_name: &str,
    email: &str,
    user_type: UserType,
) -> User {
    let details = account_details_from_payload(account_payload(first_name, email, user_type))
        .expect("fixture payload is valid");
    state
        .accounts
        .signup(details)
        .await
        .expect("fixture signup succeeds")
}

/// Bearer token for `user`.
///
/// # Panics
///
/// Panics when signing fails.
pub fn bearer_for(state: &HttpState, user: &User) -> String {
    let token = state.tokens.issue(user).expect("fixture token signs");
    format!("Bearer {token}")
}

/// Session middleware with a fresh key and an insecure cookie for plain HTTP
/// test requests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}
