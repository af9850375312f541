//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Repositories, the asset host, the weather source and the credential
//! helpers are all driven ports. Each exposes a typed error enum so adapters
//! map their failures into predictable variants.

mod macros;
pub(crate) use macros::define_port_error;

mod asset_host;
mod category_repository;
mod image_repository;
mod monument_repository;
mod password_hasher;
mod token_service;
mod user_repository;
mod weather_source;

#[cfg(test)]
pub use asset_host::MockAssetHost;
pub use asset_host::{AssetHost, AssetHostError, FixtureAssetHost};
#[cfg(test)]
pub use category_repository::MockCategoryRepository;
pub use category_repository::{CategoryPersistenceError, CategoryRepository};
#[cfg(test)]
pub use image_repository::MockImageRepository;
pub use image_repository::{ImagePersistenceError, ImageRepository};
#[cfg(test)]
pub use monument_repository::MockMonumentRepository;
pub use monument_repository::{MonumentPersistenceError, MonumentRepository};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{TokenError, TokenService};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use weather_source::MockWeatherSource;
pub use weather_source::{FixtureWeatherSource, WeatherSource, WeatherSourceError};
