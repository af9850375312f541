//! Monument records.

use serde::{Deserialize, Serialize};

use super::category::Province;
use super::ids::{CategoryId, ImageId, UserId};
pub use super::ids::MonumentId;

/// Geographic position of a monument in decimal degrees.
///
/// Values are not range-checked on construction; monuments with coordinates
/// outside the valid range can still be catalogued, they simply have no
/// weather (see [`Coordinates::is_in_range`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Build coordinates from latitude and longitude.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both values are finite and within the WGS84 range.
    pub fn is_in_range(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Persisted monument.
///
/// ## Invariants
/// - After creation `categories[0]` is the province category.
/// - `images` lists the monument's images in upload order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Monument {
    pub id: MonumentId,
    pub title: String,
    pub description: String,
    pub coordinates: Coordinates,
    pub province: Province,
    pub county: String,
    pub user_id: Option<UserId>,
    pub categories: Vec<CategoryId>,
    pub images: Vec<ImageId>,
}

/// Validated, sanitised monument fields from a create or edit form.
#[derive(Debug, Clone, PartialEq)]
pub struct MonumentDraft {
    pub title: String,
    pub description: String,
    pub province: Province,
    pub county: String,
    pub coordinates: Coordinates,
}

/// Filters offered by the report page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonumentFilter {
    /// Every monument.
    All,
    /// Monuments in the given county (exact match).
    County(String),
    /// Monuments whose title matches exactly.
    Title(String),
    /// Monuments whose title contains the term, ignoring case.
    TitleContains(String),
}

impl MonumentFilter {
    /// Whether `monument` satisfies the filter.
    pub fn matches(&self, monument: &Monument) -> bool {
        match self {
            Self::All => true,
            Self::County(county) => monument.county == *county,
            Self::Title(title) => monument.title == *title,
            Self::TitleContains(term) => monument
                .title
                .to_lowercase()
                .contains(&term.to_lowercase()),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn customs_house() -> Monument {
        Monument {
            id: MonumentId::random(),
            title: "Customs House".to_owned(),
            description: "Neoclassical 18th century building".to_owned(),
            coordinates: Coordinates::new(53.347, -6.234),
            province: Province::Leinster,
            county: "Dublin".to_owned(),
            user_id: None,
            categories: Vec::new(),
            images: Vec::new(),
        }
    }

    #[rstest]
    #[case(Coordinates::new(53.347, -6.234), true)]
    #[case(Coordinates::new(90.0, 180.0), true)]
    #[case(Coordinates::new(999.0, 999.0), false)]
    #[case(Coordinates::new(f64::NAN, 0.0), false)]
    fn coordinate_range(#[case] coordinates: Coordinates, #[case] expected: bool) {
        assert_eq!(coordinates.is_in_range(), expected);
    }

    #[rstest]
    #[case(MonumentFilter::All, true)]
    #[case(MonumentFilter::County("Dublin".to_owned()), true)]
    #[case(MonumentFilter::County("Cork".to_owned()), false)]
    #[case(MonumentFilter::Title("Customs House".to_owned()), true)]
    #[case(MonumentFilter::Title("Customs".to_owned()), false)]
    #[case(MonumentFilter::TitleContains("customs".to_owned()), true)]
    #[case(MonumentFilter::TitleContains("castle".to_owned()), false)]
    fn filters_match_monuments(
        customs_house: Monument,
        #[case] filter: MonumentFilter,
        #[case] expected: bool,
    ) {
        assert_eq!(filter.matches(&customs_house), expected);
    }
}
