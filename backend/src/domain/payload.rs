//! Validation and sanitisation of account and monument form payloads.
//!
//! Inbound adapters collect raw strings into [`AccountPayload`] or
//! [`MonumentPayload`]. Validation reports every failing field; sanitisation
//! strips markup and refuses payloads whose required fields end up empty.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;
use zeroize::Zeroizing;

use super::category::{CategorySelection, Province};
use super::error::Error;
use super::monument::{Coordinates, MonumentDraft};
use super::user::{AccountDetails, UserType};

/// Minimum accepted password length.
pub const PASSWORD_MIN_LEN: usize = 5;

/// One failing field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Collapse field errors into a single `400` domain error.
pub fn field_errors_to_error(errors: &[FieldError]) -> Error {
    let message = errors
        .first()
        .map_or_else(|| "invalid payload".to_owned(), |error| error.message.clone());
    Error::invalid_request(message).with_details(json!({ "fields": errors }))
}

/// Raw account fields from a signup, settings or API request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountPayload {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub user_type: Option<String>,
}

/// Raw monument fields from a create or edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonumentPayload {
    pub title: String,
    pub description: String,
    pub province: String,
    pub county: String,
    pub latitude: String,
    pub longitude: String,
    pub categories: Vec<String>,
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn require(errors: &mut Vec<FieldError>, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, format!("{field} is required")));
    }
}

fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|number| number.is_finite())
}

/// Check an account payload against the signup schema.
pub fn validate_account_payload(payload: &AccountPayload) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    require(&mut errors, "firstName", &payload.first_name);
    require(&mut errors, "lastName", &payload.last_name);
    if !email_regex().is_match(payload.email.trim()) {
        errors.push(FieldError::new("email", "email must be a valid email address"));
    }
    if payload.password.chars().count() < PASSWORD_MIN_LEN {
        errors.push(FieldError::new(
            "password",
            format!("password must be at least {PASSWORD_MIN_LEN} characters"),
        ));
    }
    if let Some(user_type) = payload.user_type.as_deref() {
        if !user_type.is_empty() && user_type.parse::<UserType>().is_err() {
            errors.push(FieldError::new("userType", "userType must be User or Admin"));
        }
    }
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Check a monument payload against the monument schema.
pub fn validate_monument_payload(payload: &MonumentPayload) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    require(&mut errors, "title", &payload.title);
    require(&mut errors, "description", &payload.description);
    require(&mut errors, "county", &payload.county);
    if payload.province.trim().is_empty() {
        errors.push(FieldError::new("province", "province is required"));
    } else if payload.province.trim().parse::<Province>().is_err() {
        errors.push(FieldError::new(
            "province",
            "province must be one of Munster, Leinster, Connacht or Ulster",
        ));
    }
    if parse_number(&payload.latitude).is_none() {
        errors.push(FieldError::new("latitude", "latitude must be a number"));
    }
    if parse_number(&payload.longitude).is_none() {
        errors.push(FieldError::new("longitude", "longitude must be a number"));
    }
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Upper bound on clean-and-decode passes in [`strip_markup`].
const MAX_MARKUP_PASSES: usize = 8;

/// Remove markup from free text, leaving plain text.
///
/// Script and style elements are dropped together with their content.
/// Entity-escaped markup is decoded and cleaned again until the text is
/// stable, so `&lt;script&gt;` cannot come back out as a live tag. Text that
/// never settles is returned in ammonia's escaped form.
pub fn strip_markup(raw: &str) -> String {
    let mut builder = ammonia::Builder::default();
    builder.tags(HashSet::new());
    let mut text = raw.to_owned();
    for _ in 0..MAX_MARKUP_PASSES {
        let decoded = decode_text_entities(&builder.clean(&text).to_string());
        if decoded == text {
            return decoded.trim().to_owned();
        }
        text = decoded;
    }
    builder.clean(&text).to_string().trim().to_owned()
}

/// Undo the escaping ammonia applies to text nodes.
fn decode_text_entities(escaped: &str) -> String {
    escaped
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", "\u{a0}")
        .replace("&amp;", "&")
}

fn clean_required(raw: &str) -> Option<String> {
    let cleaned = strip_markup(raw);
    (!cleaned.is_empty()).then_some(cleaned)
}

/// Strip markup from an account payload.
///
/// Returns `None` when a required field is empty after cleaning. The password
/// is never rendered, so it is kept verbatim.
pub fn sanitize_account_payload(payload: AccountPayload) -> Option<AccountDetails> {
    let first_name = clean_required(&payload.first_name)?;
    let last_name = clean_required(&payload.last_name)?;
    let email = clean_required(&payload.email)?;
    if payload.password.is_empty() {
        return None;
    }
    let user_type = UserType::from_form_value(payload.user_type.as_deref().map(str::trim));
    Some(AccountDetails {
        first_name,
        last_name,
        email,
        password: Zeroizing::new(payload.password),
        user_type,
    })
}

/// Strip markup from a monument payload and resolve typed fields.
///
/// Returns `None` when a required field is empty after cleaning or the typed
/// fields no longer parse.
pub fn sanitize_monument_payload(
    payload: MonumentPayload,
) -> Option<(MonumentDraft, CategorySelection)> {
    let title = clean_required(&payload.title)?;
    let description = clean_required(&payload.description)?;
    let province = clean_required(&payload.province)?.parse::<Province>().ok()?;
    let county = clean_required(&payload.county)?;
    let latitude = parse_number(&clean_required(&payload.latitude)?)?;
    let longitude = parse_number(&clean_required(&payload.longitude)?)?;
    let categories = payload
        .categories
        .iter()
        .map(|title| strip_markup(title))
        .collect();

    Some((
        MonumentDraft {
            title,
            description,
            province,
            county,
            coordinates: Coordinates::new(latitude, longitude),
        },
        CategorySelection::from_values(categories),
    ))
}

/// Validate then sanitise an account payload, mapping failures to `400`.
pub fn account_details_from_payload(payload: AccountPayload) -> Result<AccountDetails, Error> {
    validate_account_payload(&payload).map_err(|errors| field_errors_to_error(&errors))?;
    sanitize_account_payload(payload)
        .ok_or_else(|| Error::invalid_request("account details contain disallowed content"))
}

/// Validate then sanitise a monument payload, mapping failures to `400`.
pub fn monument_draft_from_payload(
    payload: MonumentPayload,
) -> Result<(MonumentDraft, CategorySelection), Error> {
    validate_monument_payload(&payload).map_err(|errors| field_errors_to_error(&errors))?;
    sanitize_monument_payload(payload)
        .ok_or_else(|| Error::invalid_request("monument details contain disallowed content"))
}

#[cfg(test)]
mod tests;
