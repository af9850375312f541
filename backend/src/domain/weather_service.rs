//! Best-effort weather lookup for monument pages.
//!
//! Weather is an enrichment: every failure collapses into
//! [`WeatherLookup::Unavailable`] and never reaches the caller as an error.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::ports::WeatherSource;
use crate::domain::{Coordinates, WeatherLookup, WeatherSummary};

/// Fetches and reshapes weather for a location.
#[derive(Clone)]
pub struct WeatherService {
    source: Arc<dyn WeatherSource>,
}

impl WeatherService {
    pub fn new(source: Arc<dyn WeatherSource>) -> Self {
        Self { source }
    }

    /// Fetch the raw report for `coordinates`.
    pub async fn fetch_weather(&self, coordinates: Coordinates) -> WeatherLookup {
        if !coordinates.is_in_range() {
            debug!(
                latitude = coordinates.latitude,
                longitude = coordinates.longitude,
                "coordinates out of range; weather unavailable"
            );
            return WeatherLookup::Unavailable;
        }
        match self.source.fetch(coordinates).await {
            Ok(report) => WeatherLookup::Available(report),
            Err(error) => {
                warn!(%error, "weather lookup failed");
                WeatherLookup::Unavailable
            }
        }
    }

    /// Derive the display fields from a lookup.
    pub fn reshape(lookup: WeatherLookup) -> WeatherSummary {
        WeatherSummary::from_lookup(lookup)
    }

    /// Fetch then reshape.
    pub async fn summary_for(&self, coordinates: Coordinates) -> WeatherSummary {
        Self::reshape(self.fetch_weather(coordinates).await)
    }
}
