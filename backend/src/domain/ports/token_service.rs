//! Port for issuing and verifying API bearer tokens.

use crate::domain::{Error, TokenClaims, User};

use super::define_port_error;

define_port_error! {
    /// Errors raised while issuing a token.
    pub enum TokenError {
        /// Token could not be signed.
        Signing { message: String } => "token signing failed: {message}",
    }
}

/// Issues signed tokens and checks them.
///
/// `verify` never fails loudly: malformed, expired and tampered tokens all
/// yield `None`.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Issue a token carrying the user's id and email.
    fn issue(&self, user: &User) -> Result<String, TokenError>;

    /// Decode and check a token.
    fn verify(&self, token: &str) -> Option<TokenClaims>;
}

impl From<TokenError> for Error {
    fn from(err: TokenError) -> Self {
        Error::internal(err.to_string())
    }
}
