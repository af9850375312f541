//! DTOs for decoding One Call weather responses.

use serde::Deserialize;

use crate::domain::{CurrentWeather, DailyWeather, WeatherCondition, WeatherReport};

#[derive(Debug, Deserialize)]
pub(super) struct OneCallResponseDto {
    #[serde(default)]
    timezone_offset: i32,
    current: CurrentDto,
    #[serde(default)]
    daily: Vec<DailyDto>,
}

#[derive(Debug, Deserialize)]
struct CurrentDto {
    dt: i64,
    sunrise: Option<i64>,
    sunset: Option<i64>,
    temp: f64,
    feels_like: f64,
    pressure: f64,
    humidity: f64,
    #[serde(default)]
    wind_speed: f64,
    #[serde(default)]
    weather: Vec<ConditionDto>,
}

#[derive(Debug, Deserialize)]
struct DailyDto {
    dt: i64,
    #[serde(default)]
    weather: Vec<ConditionDto>,
}

#[derive(Debug, Deserialize)]
struct ConditionDto {
    main: String,
    #[serde(default)]
    description: String,
}

impl From<ConditionDto> for WeatherCondition {
    fn from(dto: ConditionDto) -> Self {
        Self {
            main: dto.main,
            description: dto.description,
        }
    }
}

fn conditions(dtos: Vec<ConditionDto>) -> Vec<WeatherCondition> {
    dtos.into_iter().map(WeatherCondition::from).collect()
}

impl OneCallResponseDto {
    pub(super) fn into_report(self) -> WeatherReport {
        let current = self.current;
        WeatherReport {
            timezone_offset: self.timezone_offset,
            current: CurrentWeather {
                dt: current.dt,
                sunrise: current.sunrise,
                sunset: current.sunset,
                temp: current.temp,
                feels_like: current.feels_like,
                pressure: current.pressure,
                humidity: current.humidity,
                wind_speed: current.wind_speed,
                weather: conditions(current.weather),
            },
            daily: self
                .daily
                .into_iter()
                .map(|day| DailyWeather {
                    dt: day.dt,
                    weather: conditions(day.weather),
                })
                .collect(),
        }
    }
}
