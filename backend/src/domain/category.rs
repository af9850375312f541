//! Categories group monuments by province and by free-form tags.
//!
//! Province categories form the closed set [`Province::ALL`]. Every other
//! title is a user-supplied tag. Categories hold back-references to their
//! member monuments so listings do not need a join table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use super::ids::CategoryId;
use super::ids::MonumentId;
use super::monument::Monument;

/// One of the four provinces of Ireland.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Province {
    Munster,
    Leinster,
    Connacht,
    Ulster,
}

impl Province {
    /// Every province in display order.
    pub const ALL: [Self; 4] = [Self::Munster, Self::Leinster, Self::Connacht, Self::Ulster];

    /// Category title used for the province.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Munster => "Munster",
            Self::Leinster => "Leinster",
            Self::Connacht => "Connacht",
            Self::Ulster => "Ulster",
        }
    }

    /// Whether `title` names a province category (exact, case-sensitive).
    pub fn is_province_title(title: &str) -> bool {
        title.parse::<Self>().is_ok()
    }
}

impl fmt::Display for Province {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a title does not name a province.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown province: {0}")]
pub struct UnknownProvince(pub String);

impl FromStr for Province {
    type Err = UnknownProvince;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|province| province.as_str() == s)
            .ok_or_else(|| UnknownProvince(s.to_owned()))
    }
}

/// Persisted category with its member monuments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub title: String,
    pub monuments: Vec<MonumentId>,
}

impl Category {
    /// Whether this category is one of the province categories.
    pub fn is_province(&self) -> bool {
        Province::is_province_title(&self.title)
    }
}

/// A category together with the monuments it lists, for report pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryWithMonuments {
    pub category: Category,
    pub monuments: Vec<Monument>,
}

/// Additional category titles selected on a monument form.
///
/// Forms submit nothing, a single value, or a repeated field. All three
/// normalise to a list through [`CategorySelection::titles`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategorySelection {
    #[default]
    None,
    Single(String),
    Many(Vec<String>),
}

impl CategorySelection {
    /// Build a selection from however many values a form submitted.
    pub fn from_values(mut values: Vec<String>) -> Self {
        values.retain(|value| !value.trim().is_empty());
        match values.len() {
            0 => Self::None,
            1 => values.pop().map_or(Self::None, Self::Single),
            _ => Self::Many(values),
        }
    }

    /// Selected titles in submission order, without duplicates.
    pub fn titles(&self) -> Vec<String> {
        let raw: Vec<String> = match self {
            Self::None => Vec::new(),
            Self::Single(title) => vec![title.clone()],
            Self::Many(titles) => titles.clone(),
        };
        let mut titles: Vec<String> = Vec::with_capacity(raw.len());
        for title in raw {
            if !titles.contains(&title) {
                titles.push(title);
            }
        }
        titles
    }

    /// Whether nothing was selected.
    pub fn is_empty(&self) -> bool {
        self.titles().is_empty()
    }
}
