//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another account already uses the email address.
        DuplicateEmail { email: String } => "email address already in use: {email}",
    }
}

/// Storage for user accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account. Fails with `DuplicateEmail` when the email is taken.
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Overwrite an existing account. Returns `false` when it does not exist.
    async fn update(&self, user: &User) -> Result<bool, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by exact email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError>;

    /// Every account, oldest first.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Number of accounts.
    async fn count(&self) -> Result<u64, UserPersistenceError>;

    /// Remove an account. Returns `false` when it did not exist.
    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError>;

    /// Remove every account.
    async fn delete_all(&self) -> Result<u64, UserPersistenceError>;

    /// Add `delta` to the account's record count, clamping at zero.
    async fn adjust_record_count(&self, id: &UserId, delta: i32)
    -> Result<(), UserPersistenceError>;
}

impl From<UserPersistenceError> for Error {
    fn from(err: UserPersistenceError) -> Self {
        match err {
            UserPersistenceError::Connection { message } => Error::service_unavailable(message),
            UserPersistenceError::Query { message } => Error::internal(message),
            UserPersistenceError::DuplicateEmail { email } => {
                Error::conflict(format!("an account already exists for {email}"))
            }
        }
    }
}
