//! OpenAPI schema definitions for domain types.
//!
//! Domain types do not derive `ToSchema`. The wrappers here mirror the JSON
//! those types serialise to and are registered under the domain type names,
//! so framework concerns stay in the inbound layer.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    #[schema(rename = "unauthorized")]
    Unauthorized,
    #[schema(rename = "forbidden")]
    Forbidden,
    #[schema(rename = "not_found")]
    NotFound,
    /// Duplicate email on signup or update.
    #[schema(rename = "conflict")]
    Conflict,
    /// Database or asset host unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    #[schema(example = "monument 3fa85f64-5717-4562-b3fc-2c963f66afa6 not found")]
    message: String,
    /// Correlation identifier, echoed in the `trace-id` header.
    #[schema(example = "01HZY8B2W6X5Y7Z9ABCD1234")]
    trace_id: Option<String>,
    /// Field-level validation failures and similar context.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::ImageSummary`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ImageSummary)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ImageSummarySchema {
    #[schema(example = "front.jpg")]
    title: String,
    #[schema(example = "https://res.cloudinary.com/monuments/image/upload/front.jpg")]
    url: String,
}

/// OpenAPI schema for [`crate::domain::ImageListing`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ImageListing, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ImageListingSchema {
    number_of_results: usize,
    images: Vec<ImageSummarySchema>,
}

/// OpenAPI schema for [`crate::domain::WeatherSummary`].
///
/// Every field other than `weatherAvailable` is null when no weather could
/// be fetched.
#[derive(ToSchema)]
#[schema(as = crate::domain::WeatherSummary, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct WeatherSummarySchema {
    weather_available: bool,
    /// Raw current conditions from the weather source.
    #[schema(value_type = Option<Object>)]
    current_weather: Option<serde_json::Value>,
    /// Perceived temperature, pressure, humidity and wind speed.
    #[schema(value_type = Option<Object>)]
    current_weather_formatted_object: Option<serde_json::Value>,
    /// Daily rows with `Date`, `Summary` and `Description`.
    #[schema(value_type = Option<Vec<Object>>)]
    weather_forecast_next_week: Option<Vec<serde_json::Value>>,
    #[schema(example = "18:05:00")]
    formatted_sunset_time: Option<String>,
    #[schema(example = "Clouds")]
    current_weather_description: Option<String>,
}
