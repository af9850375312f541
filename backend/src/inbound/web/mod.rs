//! Server-rendered pages.
//!
//! Pages share [`HttpState`] with the JSON API but authenticate through a
//! signed cookie session instead of a bearer token.

pub mod accounts;
pub mod error;
pub mod monuments;
pub mod session;
pub mod session_config;
#[cfg(test)]
pub(crate) mod test_pages;
pub mod views;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use maud::Markup;

use crate::domain::{Error, ErrorCode, User};
use crate::inbound::http::error::status_for;
use crate::inbound::http::state::HttpState;

pub use error::{PageError, PageResult};
pub use session::SessionContext;

/// Load the signed-in user or ask the browser to log in.
///
/// A session pointing at a deleted account is purged.
pub(crate) async fn signed_in_user(
    state: &HttpState,
    session: &SessionContext,
) -> PageResult<User> {
    let Some(id) = session.user_id()? else {
        return Err(PageError::SignInRequired);
    };
    match state.accounts.find(&id).await {
        Ok(user) => Ok(user),
        Err(error) if error.code() == ErrorCode::NotFound => {
            session.purge();
            Err(PageError::SignInRequired)
        }
        Err(error) => Err(error.into()),
    }
}

/// Status and messages for a form the user should correct; any other
/// failure is passed on.
pub(crate) fn form_rejection(error: Error) -> PageResult<(StatusCode, Vec<String>)> {
    match error.code() {
        ErrorCode::InvalidRequest | ErrorCode::Conflict | ErrorCode::Unauthorized => {
            Ok((status_for(error.code()), views::messages_for(&error)))
        }
        _ => Err(error.into()),
    }
}

pub(crate) fn render(status: StatusCode, page: Markup) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(page.into_string())
}

/// Register every page route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(accounts::configure)
        .configure(monuments::configure);
}
