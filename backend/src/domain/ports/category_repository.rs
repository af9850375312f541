//! Port for category persistence.
//!
//! Category titles are unique. [`CategoryRepository::upsert_append`] must be
//! atomic: two concurrent calls for the same new title end with exactly one
//! category listing both monuments.

use async_trait::async_trait;

use crate::domain::{Category, CategoryId, Error, MonumentId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by category repository adapters.
    pub enum CategoryPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "category repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "category repository query failed: {message}",
    }
}

/// Storage for categories and their monument back-references.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Append `monument_id` to the category titled `title`, creating the
    /// category when it does not exist. Returns the category id.
    async fn upsert_append(
        &self,
        title: &str,
        monument_id: &MonumentId,
    ) -> Result<CategoryId, CategoryPersistenceError>;

    /// Create the category if missing, without adding members.
    async fn ensure(&self, title: &str) -> Result<CategoryId, CategoryPersistenceError>;

    /// Every category, in creation order.
    async fn list(&self) -> Result<Vec<Category>, CategoryPersistenceError>;

    /// Number of categories.
    async fn count(&self) -> Result<u64, CategoryPersistenceError>;

    /// Remove `monument_id` from every category's member list.
    async fn pull_monument(&self, monument_id: &MonumentId)
    -> Result<(), CategoryPersistenceError>;

    /// Empty every category's member list.
    async fn clear_members(&self) -> Result<(), CategoryPersistenceError>;
}

impl From<CategoryPersistenceError> for Error {
    fn from(err: CategoryPersistenceError) -> Self {
        match err {
            CategoryPersistenceError::Connection { message } => Error::service_unavailable(message),
            CategoryPersistenceError::Query { message } => Error::internal(message),
        }
    }
}
