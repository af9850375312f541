//! Weather reports for monument locations.
//!
//! The weather source returns a [`WeatherLookup`]. Failures are not errors:
//! they collapse to [`WeatherLookup::Unavailable`] and the page or API shows
//! that no weather is available. [`WeatherSummary::from_lookup`] derives the
//! presentation fields.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

use super::date_format::{format_forecast_date, format_time_of_day};

/// Summary and description of one weather condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherCondition {
    pub main: String,
    pub description: String,
}

/// Current conditions at the monument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    /// Observation time, seconds since the Unix epoch.
    pub dt: i64,
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
    pub temp: f64,
    pub feels_like: f64,
    pub pressure: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
}

/// One day of the forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyWeather {
    /// Forecast day, seconds since the Unix epoch.
    pub dt: i64,
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
}

/// Report returned by the weather source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    /// Offset of the location's local time from UTC, in seconds.
    #[serde(default)]
    pub timezone_offset: i32,
    pub current: CurrentWeather,
    #[serde(default)]
    pub daily: Vec<DailyWeather>,
}

/// Outcome of a weather lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherLookup {
    Available(WeatherReport),
    Unavailable,
}

/// Current conditions labelled for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedCurrentWeather {
    #[serde(rename = "Perceived Temperature")]
    pub perceived_temperature: f64,
    #[serde(rename = "Pressure")]
    pub pressure: f64,
    #[serde(rename = "Humidity")]
    pub humidity: f64,
    #[serde(rename = "Wind Speed")]
    pub wind_speed: f64,
}

/// One labelled forecast row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Summary")]
    pub summary: String,
    #[serde(rename = "Description")]
    pub description: String,
}

/// Presentation-ready weather for a monument.
///
/// When `weather_available` is false every other field is `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSummary {
    pub weather_available: bool,
    pub current_weather: Option<CurrentWeather>,
    pub current_weather_formatted_object: Option<FormattedCurrentWeather>,
    pub weather_forecast_next_week: Option<Vec<ForecastDay>>,
    pub formatted_sunset_time: Option<String>,
    pub current_weather_description: Option<String>,
}

impl WeatherSummary {
    /// Summary for a location without weather.
    pub const fn unavailable() -> Self {
        Self {
            weather_available: false,
            current_weather: None,
            current_weather_formatted_object: None,
            weather_forecast_next_week: None,
            formatted_sunset_time: None,
            current_weather_description: None,
        }
    }

    /// Derive display fields from a lookup.
    pub fn from_lookup(lookup: WeatherLookup) -> Self {
        match lookup {
            WeatherLookup::Unavailable => Self::unavailable(),
            WeatherLookup::Available(report) => Self::from_report(report),
        }
    }

    fn from_report(report: WeatherReport) -> Self {
        let offset = FixedOffset::east_opt(report.timezone_offset).unwrap_or_else(|| Utc.fix());
        let current = report.current;

        let forecast = report
            .daily
            .iter()
            .take(FORECAST_DAYS)
            .map(|day| {
                let (summary, description) = first_condition(&day.weather);
                ForecastDay {
                    date: local_time(day.dt, offset)
                        .map(|at| format_forecast_date(&at))
                        .unwrap_or_default(),
                    summary,
                    description,
                }
            })
            .collect();

        let formatted_sunset_time = current
            .sunset
            .and_then(|sunset| local_time(sunset, offset))
            .map(|at| format_time_of_day(&at));

        Self {
            weather_available: true,
            current_weather_description: current
                .weather
                .first()
                .map(|condition| condition.main.clone()),
            current_weather_formatted_object: Some(FormattedCurrentWeather {
                perceived_temperature: current.feels_like,
                pressure: current.pressure,
                humidity: current.humidity,
                wind_speed: current.wind_speed,
            }),
            weather_forecast_next_week: Some(forecast),
            formatted_sunset_time,
            current_weather: Some(current),
        }
    }
}

fn first_condition(conditions: &[WeatherCondition]) -> (String, String) {
    conditions
        .first()
        .map(|condition| (condition.main.clone(), condition.description.clone()))
        .unwrap_or_default()
}

/// Days listed in the forecast.
pub const FORECAST_DAYS: usize = 7;

fn local_time(epoch_seconds: i64, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    DateTime::<Utc>::from_timestamp(epoch_seconds, 0).map(|at| at.with_timezone(&offset))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};

    fn condition(main: &str, description: &str) -> WeatherCondition {
        WeatherCondition {
            main: main.to_owned(),
            description: description.to_owned(),
        }
    }

    #[fixture]
    fn report() -> WeatherReport {
        WeatherReport {
            timezone_offset: 3600,
            current: CurrentWeather {
                dt: 1_634_540_400,
                sunrise: Some(1_634_540_400),
                // 2021-10-18T17:05:00Z
                sunset: Some(1_634_576_700),
                temp: 12.5,
                feels_like: 11.9,
                pressure: 1012.0,
                humidity: 81.0,
                wind_speed: 4.6,
                weather: vec![condition("Clouds", "broken clouds")],
            },
            daily: vec![
                DailyWeather {
                    // 2021-10-18T12:00:00Z
                    dt: 1_634_558_400,
                    weather: vec![condition("Rain", "light rain")],
                },
                DailyWeather {
                    dt: 1_634_644_800,
                    weather: vec![condition("Clear", "clear sky")],
                },
            ],
        }
    }

    #[rstest]
    fn unavailable_lookup_clears_every_field() {
        let summary = WeatherSummary::from_lookup(WeatherLookup::Unavailable);
        assert!(!summary.weather_available);
        assert!(summary.current_weather.is_none());
        assert!(summary.current_weather_formatted_object.is_none());
        assert!(summary.weather_forecast_next_week.is_none());
        assert!(summary.formatted_sunset_time.is_none());
        assert!(summary.current_weather_description.is_none());
    }

    #[rstest]
    fn available_lookup_derives_display_fields(report: WeatherReport) {
        let summary = WeatherSummary::from_lookup(WeatherLookup::Available(report));

        assert!(summary.weather_available);
        assert_eq!(summary.current_weather_description.as_deref(), Some("Clouds"));
        assert_eq!(summary.formatted_sunset_time.as_deref(), Some("18:05:00"));

        let formatted = summary
            .current_weather_formatted_object
            .expect("formatted current weather");
        assert_eq!(formatted.perceived_temperature, 11.9);
        assert_eq!(formatted.wind_speed, 4.6);

        let forecast = summary.weather_forecast_next_week.expect("forecast");
        assert_eq!(forecast.len(), 2);
        assert_eq!(forecast[0].date, "Monday 18 October 2021");
        assert_eq!(forecast[0].summary, "Rain");
        assert_eq!(forecast[1].description, "clear sky");
    }

    #[rstest]
    fn forecast_stops_after_a_week(mut report: WeatherReport) {
        report.daily = (0..8)
            .map(|day| DailyWeather {
                dt: 1_634_558_400 + day * 86_400,
                weather: vec![condition("Clear", "clear sky")],
            })
            .collect();

        let summary = WeatherSummary::from_lookup(WeatherLookup::Available(report));
        let forecast = summary.weather_forecast_next_week.expect("forecast");

        assert_eq!(forecast.len(), FORECAST_DAYS);
        assert_eq!(forecast[0].date, "Monday 18 October 2021");
        assert_eq!(forecast[6].date, "Sunday 24 October 2021");
    }

    #[rstest]
    fn serialises_with_display_labels(report: WeatherReport) {
        let summary = WeatherSummary::from_lookup(WeatherLookup::Available(report));
        let value = serde_json::to_value(summary).expect("serialise summary");

        assert_eq!(value["weatherAvailable"], true);
        assert_eq!(value["currentWeatherFormattedObject"]["Wind Speed"], 4.6);
        assert_eq!(value["weatherForecastNextWeek"][0]["Summary"], "Rain");
    }
}
