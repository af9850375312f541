//! Reqwest-backed One Call weather adapter.
//!
//! The adapter only deals with transport: it builds the query, applies the
//! client timeout, maps HTTP failures and decodes the body. Turning failures
//! into "weather unavailable" is the weather service's job.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use zeroize::Zeroizing;

use super::dto::OneCallResponseDto;
use crate::domain::ports::{WeatherSource, WeatherSourceError};
use crate::domain::{Coordinates, WeatherReport};
use crate::outbound::http_support::body_preview;

/// Default One Call endpoint.
pub const DEFAULT_WEATHER_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/onecall";

/// Weather source querying a One Call compatible endpoint.
pub struct OpenWeatherSource {
    client: Client,
    endpoint: Url,
    api_key: Zeroizing<String>,
}

impl OpenWeatherSource {
    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key: Zeroizing::new(api_key.into()),
        })
    }

    fn query(&self, coordinates: Coordinates) -> [(&'static str, String); 5] {
        [
            ("lat", coordinates.latitude.to_string()),
            ("lon", coordinates.longitude.to_string()),
            ("units", "metric".to_owned()),
            ("exclude", "minutely,alerts".to_owned()),
            ("appid", self.api_key.to_string()),
        ]
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherSource {
    async fn fetch(&self, coordinates: Coordinates) -> Result<WeatherReport, WeatherSourceError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&self.query(coordinates))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_report(body.as_ref())
    }
}

fn parse_report(body: &[u8]) -> Result<WeatherReport, WeatherSourceError> {
    let decoded: OneCallResponseDto = serde_json::from_slice(body).map_err(|error| {
        WeatherSourceError::decode(format!("invalid weather JSON payload: {error}"))
    })?;
    Ok(decoded.into_report())
}

fn map_transport_error(error: reqwest::Error) -> WeatherSourceError {
    // Strip the URL: it carries the API key in its query string.
    WeatherSourceError::transport(error.without_url().to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> WeatherSourceError {
    tracing::debug!(
        status = status.as_u16(),
        body = %body_preview(body),
        "weather endpoint returned an error status"
    );
    WeatherSourceError::status(status.as_u16())
}
