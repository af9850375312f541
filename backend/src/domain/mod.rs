//! Domain primitives, services and ports.
//!
//! Purpose: define the catalogue entities (users, monuments, categories,
//! images), the services that keep their cross references consistent, and
//! the ports through which those services reach storage and third parties.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Monument, Category, Image, User: persisted entities.
//! - CategoryReconciliationService, ImageAttachmentService, WeatherService,
//!   AccountService, MonumentService: use cases driven by the adapters.

pub mod account_service;
pub mod auth;
pub mod category;
pub mod category_service;
pub mod date_format;
pub mod error;
pub mod ids;
pub mod image;
pub mod image_service;
pub mod monument;
pub mod monument_service;
pub mod payload;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod weather;
pub mod weather_service;

pub use self::account_service::AccountService;
pub use self::auth::{LoginCredentials, LoginValidationError, TokenClaims};
pub use self::category::{
    Category, CategoryId, CategorySelection, CategoryWithMonuments, Province, UnknownProvince,
};
pub use self::category_service::CategoryReconciliationService;
pub use self::date_format::{
    format_date_with_time, format_forecast_date, format_time_of_day, format_title_stamp,
};
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::ids::InvalidId;
pub use self::image::{
    DEFAULT_IMAGE_TITLE_PREFIX, DEFAULT_IMAGE_URL, Image, ImageBatch, ImageId, ImageListing,
    ImageSummary, NewImage, UploadIntent, UploadedFile,
};
pub use self::image_service::ImageAttachmentService;
pub use self::monument::{Coordinates, Monument, MonumentDraft, MonumentFilter, MonumentId};
pub use self::monument_service::{CatalogueCounts, MonumentDetails, MonumentService};
pub use self::payload::{
    AccountPayload, FieldError, MonumentPayload, PASSWORD_MIN_LEN, account_details_from_payload,
    field_errors_to_error, monument_draft_from_payload, sanitize_account_payload,
    sanitize_monument_payload, strip_markup, validate_account_payload, validate_monument_payload,
};
pub use self::trace_id::TraceId;
pub use self::user::{AccountDetails, PasswordHash, UnknownUserType, User, UserId, UserType};
pub use self::weather::{
    CurrentWeather, DailyWeather, ForecastDay, FormattedCurrentWeather, WeatherCondition,
    WeatherLookup, WeatherReport, WeatherSummary,
};
pub use self::weather_service::WeatherService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use monuments::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
