//! DTOs for the image upload API.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(super) struct UploadResponseDto {
    pub(super) secure_url: Option<String>,
    pub(super) url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct UploadErrorDto {
    pub(super) error: UploadErrorBodyDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct UploadErrorBodyDto {
    pub(super) message: String,
}

impl UploadResponseDto {
    /// Prefer the HTTPS URL when the host returns both.
    pub(super) fn into_url(self) -> Option<String> {
        self.secure_url.or(self.url)
    }
}
