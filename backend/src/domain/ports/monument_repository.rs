//! Port for monument persistence.

use async_trait::async_trait;

use crate::domain::{Error, Monument, MonumentId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by monument repository adapters.
    pub enum MonumentPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "monument repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "monument repository query failed: {message}",
    }
}

/// Storage for monuments.
///
/// The repository stores the category and image id lists verbatim; keeping
/// them consistent with the category and image back-references is the job of
/// the domain services.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MonumentRepository: Send + Sync {
    /// Insert a new monument.
    async fn insert(&self, monument: &Monument) -> Result<(), MonumentPersistenceError>;

    /// Overwrite an existing monument. Returns `false` when it does not exist.
    async fn update(&self, monument: &Monument) -> Result<bool, MonumentPersistenceError>;

    /// Fetch a monument by identifier.
    async fn find_by_id(
        &self,
        id: &MonumentId,
    ) -> Result<Option<Monument>, MonumentPersistenceError>;

    /// Fetch the monuments with the given ids, skipping unknown ids.
    async fn find_by_ids(
        &self,
        ids: &[MonumentId],
    ) -> Result<Vec<Monument>, MonumentPersistenceError>;

    /// Every monument, oldest first.
    async fn list(&self) -> Result<Vec<Monument>, MonumentPersistenceError>;

    /// Number of monuments.
    async fn count(&self) -> Result<u64, MonumentPersistenceError>;

    /// Remove a monument. Returns `false` when it did not exist.
    async fn delete(&self, id: &MonumentId) -> Result<bool, MonumentPersistenceError>;

    /// Remove every monument, returning how many went.
    async fn delete_all(&self) -> Result<u64, MonumentPersistenceError>;
}

impl From<MonumentPersistenceError> for Error {
    fn from(err: MonumentPersistenceError) -> Self {
        match err {
            MonumentPersistenceError::Connection { message } => Error::service_unavailable(message),
            MonumentPersistenceError::Query { message } => Error::internal(message),
        }
    }
}
