//! HS256 bearer tokens backed by `jsonwebtoken`.

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use tracing::debug;
use zeroize::Zeroizing;

use crate::domain::ports::{TokenError, TokenService};
use crate::domain::{TokenClaims, User};

/// Default token lifetime.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

/// Signs and verifies tokens with a shared secret.
pub struct JwtTokenService {
    secret: Zeroizing<Vec<u8>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl JwtTokenService {
    /// Create a service signing with `secret` and issuing tokens valid for
    /// `ttl_secs` seconds.
    pub fn new(secret: impl AsRef<[u8]>, ttl_secs: i64, clock: Arc<dyn Clock>) -> Self {
        Self {
            secret: Zeroizing::new(secret.as_ref().to_vec()),
            ttl: Duration::seconds(ttl_secs),
            clock,
        }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);
        validation
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, user: &User) -> Result<String, TokenError> {
        let issued_at = self.clock.utc();
        let claims = TokenClaims {
            id: user.id,
            email: user.email.clone(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&self.secret),
        )
        .map_err(|err| TokenError::signing(err.to_string()))
    }

    fn verify(&self, token: &str) -> Option<TokenClaims> {
        match decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(&self.secret),
            &Self::validation(),
        ) {
            Ok(data) => Some(data.claims),
            Err(error) => {
                debug!(%error, "bearer token rejected");
                None
            }
        }
    }
}
