//! Port for image record persistence.

use async_trait::async_trait;

use crate::domain::{Error, Image, ImageId, MonumentId, NewImage};

use super::define_port_error;

define_port_error! {
    /// Errors raised by image repository adapters.
    pub enum ImagePersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "image repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "image repository query failed: {message}",
    }
}

/// Storage for image records. The image bytes live on the asset host.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageRepository: Send + Sync {
    /// Persist a new image without an owning monument.
    async fn insert(&self, image: &NewImage) -> Result<Image, ImagePersistenceError>;

    /// Point the given images at `monument_id`.
    async fn set_monument(
        &self,
        ids: &[ImageId],
        monument_id: &MonumentId,
    ) -> Result<(), ImagePersistenceError>;

    /// Images owned by `monument_id`, oldest first.
    async fn list_for_monument(
        &self,
        monument_id: &MonumentId,
    ) -> Result<Vec<Image>, ImagePersistenceError>;

    /// Fetch the images with the given ids, in the order given.
    async fn find_by_ids(&self, ids: &[ImageId]) -> Result<Vec<Image>, ImagePersistenceError>;

    /// Remove the images owned by `monument_id`, returning how many went.
    async fn delete_for_monument(
        &self,
        monument_id: &MonumentId,
    ) -> Result<u64, ImagePersistenceError>;

    /// Remove every image.
    async fn delete_all(&self) -> Result<u64, ImagePersistenceError>;
}

impl From<ImagePersistenceError> for Error {
    fn from(err: ImagePersistenceError) -> Self {
        match err {
            ImagePersistenceError::Connection { message } => Error::service_unavailable(message),
            ImagePersistenceError::Query { message } => Error::internal(message),
        }
    }
}
