//! Driven port for the third-party weather API.

use async_trait::async_trait;

use crate::domain::{Coordinates, WeatherReport};

use super::define_port_error;

define_port_error! {
    /// Errors raised by weather source adapters.
    pub enum WeatherSourceError {
        /// Request could not be sent or timed out.
        Transport { message: String } => "weather transport failed: {message}",
        /// Upstream answered with a non-success status.
        Status { status: u16 } => "weather source returned status {status}",
        /// Response body could not be decoded.
        Decode { message: String } => "weather response invalid: {message}",
    }
}

/// Fetches current conditions and the daily forecast for a location.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Fetch a report for `coordinates`.
    async fn fetch(&self, coordinates: Coordinates) -> Result<WeatherReport, WeatherSourceError>;
}

/// Weather source used when no API key is configured: always unavailable.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureWeatherSource;

#[async_trait]
impl WeatherSource for FixtureWeatherSource {
    async fn fetch(&self, _coordinates: Coordinates) -> Result<WeatherReport, WeatherSourceError> {
        Err(WeatherSourceError::status(401_u16))
    }
}
