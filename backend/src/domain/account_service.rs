//! Account lifecycle: signup, login, settings and removal.

use std::sync::Arc;

use mockable::Clock;
use tracing::info;

use crate::domain::ports::{PasswordHasher, UserRepository};
use crate::domain::{AccountDetails, Error, LoginCredentials, User, UserId};

/// Message returned for any failed login; it never says which half was wrong.
const INVALID_CREDENTIALS: &str = "invalid email or password";

/// Manages user accounts.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    clock: Arc<dyn Clock>,
}

impl AccountService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            hasher,
            clock,
        }
    }

    /// Create an account. Fails with `Conflict` when the email is taken.
    pub async fn signup(&self, details: AccountDetails) -> Result<User, Error> {
        if self.users.find_by_email(&details.email).await?.is_some() {
            return Err(Error::conflict(format!(
                "an account already exists for {}",
                details.email
            )));
        }
        let user = User {
            id: UserId::random(),
            password_hash: self.hasher.hash(&details.password)?,
            first_name: details.first_name,
            last_name: details.last_name,
            email: details.email,
            user_type: details.user_type,
            last_login: None,
            last_updated: None,
            record_count: 0,
        };
        self.users.insert(&user).await?;
        info!(user_id = %user.id, user_type = %user.user_type, "account created");
        Ok(user)
    }

    /// Check credentials without touching the account.
    pub async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let user = self
            .users
            .find_by_email(credentials.email())
            .await?
            .ok_or_else(|| Error::unauthorized(INVALID_CREDENTIALS))?;
        if !self
            .hasher
            .verify(credentials.password(), &user.password_hash)
        {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        Ok(user)
    }

    /// Check credentials and stamp the login time.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let mut user = self.authenticate(credentials).await?;
        user.last_login = Some(self.clock.utc());
        self.users.update(&user).await?;
        info!(user_id = %user.id, "user logged in");
        Ok(user)
    }

    /// Replace an account's details and stamp the update time.
    pub async fn update(&self, id: &UserId, details: AccountDetails) -> Result<User, Error> {
        let mut user = self.find(id).await?;
        if user.email != details.email {
            let taken = self
                .users
                .find_by_email(&details.email)
                .await?
                .is_some_and(|other| other.id != user.id);
            if taken {
                return Err(Error::conflict(format!(
                    "an account already exists for {}",
                    details.email
                )));
            }
        }
        user.password_hash = self.hasher.hash(&details.password)?;
        user.first_name = details.first_name;
        user.last_name = details.last_name;
        user.email = details.email;
        user.user_type = details.user_type;
        user.last_updated = Some(self.clock.utc());
        if !self.users.update(&user).await? {
            return Err(not_found(id));
        }
        Ok(user)
    }

    /// Fetch an account.
    pub async fn find(&self, id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Every account.
    pub async fn list(&self) -> Result<Vec<User>, Error> {
        Ok(self.users.list().await?)
    }

    /// Number of accounts.
    pub async fn count(&self) -> Result<u64, Error> {
        Ok(self.users.count().await?)
    }

    /// Remove an account.
    pub async fn delete(&self, id: &UserId) -> Result<(), Error> {
        if !self.users.delete(id).await? {
            return Err(not_found(id));
        }
        info!(user_id = %id, "account deleted");
        Ok(())
    }

    /// Remove every account.
    pub async fn delete_all(&self) -> Result<u64, Error> {
        Ok(self.users.delete_all().await?)
    }
}

fn not_found(id: &UserId) -> Error {
    Error::not_found(format!("user {id} not found"))
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
