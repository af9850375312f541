//! Bearer token authentication for the JSON API.
//!
//! Mutating monument endpoints take an [`ApiUser`] argument. Extraction reads
//! `Authorization: Bearer <token>`, verifies the token and confirms the
//! account it names still exists. Any failure is a `401`.

use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::domain::{Error, ErrorCode, TokenClaims, User};

use super::state::HttpState;

const BEARER_SCHEME: &str = "bearer";

/// Authenticated API caller.
#[derive(Debug, Clone)]
pub struct ApiUser {
    pub user: User,
    pub claims: TokenClaims,
}

/// Token carried in the `Authorization` header, if any.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case(BEARER_SCHEME) && !token.is_empty()).then_some(token)
}

impl FromRequest for ApiUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let token = bearer_token(req.headers()).map(str::to_owned);
        Box::pin(async move {
            let state =
                state.ok_or_else(|| Error::internal("HTTP state is not registered"))?;
            let token = token.ok_or_else(|| Error::unauthorized("bearer token required"))?;
            let claims = state
                .tokens
                .verify(&token)
                .ok_or_else(|| Error::unauthorized("invalid or expired token"))?;
            let user = match state.accounts.find(&claims.id).await {
                Ok(user) => user,
                Err(error) if error.code() == ErrorCode::NotFound => {
                    debug!(user_id = %claims.id, "token names a removed account");
                    return Err(Error::unauthorized("invalid or expired token"));
                }
                Err(error) => return Err(error),
            };
            Ok(Self { user, claims })
        })
    }
}
