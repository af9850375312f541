//! Human-facing date and time renderings.

use chrono::{DateTime, TimeZone};

/// Render a timestamp as `DD-Month-YYYY HH:MM:SS`, e.g. `05-March-2022 09:07:03`.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use monuments::domain::date_format::format_date_with_time;
///
/// let at = Utc.with_ymd_and_hms(2022, 3, 5, 9, 7, 3).unwrap();
/// assert_eq!(format_date_with_time(&at), "05-March-2022 09:07:03");
/// ```
pub fn format_date_with_time<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    at.format("%d-%B-%Y %H:%M:%S").to_string()
}

/// Render a forecast day as `Weekday D Month YYYY`, e.g. `Saturday 5 March 2022`.
pub fn format_forecast_date<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    at.format("%A %-d %B %Y").to_string()
}

/// Render a time of day as `HH:MM:SS`.
pub fn format_time_of_day<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    at.format("%H:%M:%S").to_string()
}

/// Render a timestamp the way generated image titles embed it,
/// e.g. `Sat Mar 05 2022 09:07:03 GMT+0000`.
pub fn format_title_stamp<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    at.format("%a %b %d %Y %H:%M:%S GMT%z").to_string()
}
