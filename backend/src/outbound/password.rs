//! Argon2id password hashing.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHasher as _, PasswordVerifier as _, SaltString};
use argon2::Argon2;

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Stores passwords as PHC strings produced by Argon2id with default cost.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2PasswordHasher;

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let encoded = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| PasswordHashError::hashing(err.to_string()))?;
        Ok(PasswordHash::new(encoded.to_string()))
    }

    fn verify(&self, password: &str, hash: &PasswordHash) -> bool {
        password_hash::PasswordHash::new(hash.as_str())
            .map(|parsed| {
                Argon2::default()
                    .verify_password(password.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn hashes_are_salted_and_verifiable() {
        let hasher = Argon2PasswordHasher;
        let first = hasher.hash("secret").expect("hash computed");
        let second = hasher.hash("secret").expect("hash computed");

        assert_ne!(first.as_str(), second.as_str());
        assert!(first.as_str().starts_with("$argon2id$"));
        assert!(hasher.verify("secret", &first));
        assert!(!hasher.verify("Secret", &first));
    }

    #[rstest]
    #[case::plaintext("secret")]
    #[case::empty("")]
    fn malformed_hashes_never_match(#[case] stored: &str) {
        assert!(!Argon2PasswordHasher.verify("secret", &PasswordHash::new(stored)));
    }
}
