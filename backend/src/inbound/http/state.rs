//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` and depend only on the
//! domain services built from it, keeping persistence and third-party
//! details out of the inbound layer.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    AssetHost, CategoryRepository, ImageRepository, MonumentRepository, PasswordHasher,
    TokenService, UserRepository, WeatherSource,
};
use crate::domain::{
    AccountService, CategoryReconciliationService, ImageAttachmentService, MonumentService,
    WeatherService,
};

/// Driven ports the HTTP state is assembled from.
///
/// Grouping them keeps [`HttpState::new`] to a single parameter and lets the
/// server swap database and fixture adapters in one place.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub users: Arc<dyn UserRepository>,
    pub monuments: Arc<dyn MonumentRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub images: Arc<dyn ImageRepository>,
    pub assets: Arc<dyn AssetHost>,
    pub weather: Arc<dyn WeatherSource>,
    pub tokens: Arc<dyn TokenService>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub clock: Arc<dyn Clock>,
}

/// Services shared by the JSON API and the rendered pages.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: AccountService,
    pub monuments: MonumentService,
    pub weather: WeatherService,
    pub tokens: Arc<dyn TokenService>,
    pub clock: Arc<dyn Clock>,
}

impl HttpState {
    /// Wire the domain services over `ports`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use monuments::domain::ports::{FixtureAssetHost, FixtureWeatherSource};
    /// use monuments::inbound::http::state::{HttpState, HttpStatePorts};
    /// use monuments::outbound::jwt::JwtTokenService;
    /// use monuments::outbound::memory::MemoryStore;
    /// use monuments::outbound::password::Argon2PasswordHasher;
    ///
    /// let store = Arc::new(MemoryStore::new());
    /// let clock = Arc::new(DefaultClock);
    /// let state = HttpState::new(HttpStatePorts {
    ///     users: store.clone(),
    ///     monuments: store.clone(),
    ///     categories: store.clone(),
    ///     images: store,
    ///     assets: Arc::new(FixtureAssetHost),
    ///     weather: Arc::new(FixtureWeatherSource),
    ///     tokens: Arc::new(JwtTokenService::new("secret", 60, clock.clone())),
    ///     hasher: Arc::new(Argon2PasswordHasher),
    ///     clock,
    /// });
    /// let _accounts = state.accounts.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            users,
            monuments,
            categories,
            images,
            assets,
            weather,
            tokens,
            hasher,
            clock,
        } = ports;

        let reconciliation = CategoryReconciliationService::new(categories, monuments.clone());
        let attachment = ImageAttachmentService::new(images, assets, clock.clone());
        Self {
            accounts: AccountService::new(users.clone(), hasher, clock.clone()),
            monuments: MonumentService::new(monuments, users, reconciliation, attachment),
            weather: WeatherService::new(weather),
            tokens,
            clock,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
