//! Path and credential helpers shared by the inbound adapters.

use std::str::FromStr;

use serde_json::json;

use crate::domain::{Error, InvalidId, LoginCredentials, LoginValidationError};

/// Parse an identifier taken from a URL path.
///
/// A malformed identifier cannot name a stored record, so it is reported
/// exactly like a missing one.
pub(crate) fn parse_path_id<T>(raw: &str, kind: &str) -> Result<T, Error>
where
    T: FromStr<Err = InvalidId>,
{
    raw.parse()
        .map_err(|_| Error::not_found(format!("{kind} {raw} not found")))
}

pub(crate) fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyEmail => Error::invalid_request("email must not be empty")
            .with_details(json!({ "field": "email", "code": "empty_email" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

/// Validate raw login inputs.
pub(crate) fn login_credentials(email: &str, password: &str) -> Result<LoginCredentials, Error> {
    LoginCredentials::try_from_parts(email, password).map_err(map_login_validation_error)
}
