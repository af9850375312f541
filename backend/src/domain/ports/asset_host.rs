//! Driven port for the hosted image store.

use async_trait::async_trait;

use crate::domain::{Error, UploadedFile};

use super::define_port_error;

define_port_error! {
    /// Errors raised by asset host adapters.
    pub enum AssetHostError {
        /// Request could not be sent or timed out.
        Transport { message: String } => "asset host transport failed: {message}",
        /// Host refused the upload.
        Rejected { message: String } => "asset host rejected upload: {message}",
        /// Host response could not be decoded.
        Decode { message: String } => "asset host response invalid: {message}",
    }
}

/// Uploads image bytes and returns the public URL.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetHost: Send + Sync {
    /// Upload a file, returning the URL it is served from.
    async fn upload(&self, file: &UploadedFile) -> Result<String, AssetHostError>;
}

/// Asset host used when no cloud credentials are configured.
///
/// Files are not stored anywhere; each upload gets a deterministic
/// placeholder URL derived from the filename.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAssetHost;

#[async_trait]
impl AssetHost for FixtureAssetHost {
    async fn upload(&self, file: &UploadedFile) -> Result<String, AssetHostError> {
        Ok(format!("/uploads/{}", file.filename))
    }
}

impl From<AssetHostError> for Error {
    fn from(err: AssetHostError) -> Self {
        match err {
            AssetHostError::Transport { message } => {
                Error::service_unavailable(format!("image upload failed: {message}"))
            }
            AssetHostError::Rejected { message } | AssetHostError::Decode { message } => {
                Error::internal(format!("image upload failed: {message}"))
            }
        }
    }
}
