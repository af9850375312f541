//! Reqwest-backed signed uploads to a Cloudinary-compatible image host.
//!
//! Each upload is a multipart POST carrying the file, the API key, a Unix
//! timestamp and a SHA-256 signature over the signed parameters plus the API
//! secret.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mockable::Clock;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode, Url};
use sha2::{Digest, Sha256};
use tracing::debug;
use zeroize::Zeroizing;

use super::dto::{UploadErrorDto, UploadResponseDto};
use crate::domain::UploadedFile;
use crate::domain::ports::{AssetHost, AssetHostError};
use crate::outbound::http_support::body_preview;

/// Default API origin.
pub const DEFAULT_ASSET_HOST_ORIGIN: &str = "https://api.cloudinary.com";

/// Account credentials for the image host.
pub struct AssetHostCredentials {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: Zeroizing<String>,
}

/// Asset host uploading images with signed requests.
pub struct CloudinaryAssetHost {
    client: Client,
    upload_url: Url,
    api_key: String,
    api_secret: Zeroizing<String>,
    clock: Arc<dyn Clock>,
}

impl CloudinaryAssetHost {
    /// Build an adapter posting to `{origin}/v1_1/{cloud_name}/image/upload`.
    ///
    /// # Errors
    ///
    /// Returns an error when the upload URL is invalid or the reqwest client
    /// cannot be constructed.
    pub fn new(
        origin: &Url,
        credentials: AssetHostCredentials,
        timeout: Duration,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AssetHostError> {
        let upload_url = origin
            .join(&format!("v1_1/{}/image/upload", credentials.cloud_name))
            .map_err(|err| AssetHostError::rejected(format!("invalid upload URL: {err}")))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| AssetHostError::transport(err.to_string()))?;
        Ok(Self {
            client,
            upload_url,
            api_key: credentials.api_key,
            api_secret: credentials.api_secret,
            clock,
        })
    }

    fn form(&self, file: &UploadedFile, timestamp: i64) -> Result<Form, AssetHostError> {
        let mut part = Part::bytes(file.bytes.clone()).file_name(file.filename.clone());
        if let Some(content_type) = &file.content_type {
            part = part
                .mime_str(content_type)
                .map_err(|err| AssetHostError::rejected(format!("invalid content type: {err}")))?;
        }
        Ok(Form::new()
            .part("file", part)
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp.to_string())
            .text("signature_algorithm", "sha256")
            .text("signature", sign(timestamp, &self.api_secret)))
    }
}

/// Hex SHA-256 over the signed parameters followed by the secret.
fn sign(timestamp: i64, secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("timestamp={timestamp}"));
    hasher.update(secret);
    hex::encode(hasher.finalize())
}

#[async_trait]
impl AssetHost for CloudinaryAssetHost {
    async fn upload(&self, file: &UploadedFile) -> Result<String, AssetHostError> {
        let timestamp = self.clock.utc().timestamp();
        let response = self
            .client
            .post(self.upload_url.clone())
            .multipart(self.form(file, timestamp)?)
            .send()
            .await
            .map_err(|err| AssetHostError::transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| AssetHostError::transport(err.to_string()))?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        let url = parse_url(body.as_ref())?;
        debug!(filename = %file.filename, %url, "image stored on asset host");
        Ok(url)
    }
}

fn parse_url(body: &[u8]) -> Result<String, AssetHostError> {
    let decoded: UploadResponseDto = serde_json::from_slice(body)
        .map_err(|err| AssetHostError::decode(format!("invalid upload response: {err}")))?;
    decoded
        .into_url()
        .ok_or_else(|| AssetHostError::decode("upload response carried no URL"))
}

fn map_status_error(status: StatusCode, body: &[u8]) -> AssetHostError {
    let detail = serde_json::from_slice::<UploadErrorDto>(body)
        .map(|dto| dto.error.message)
        .unwrap_or_else(|_| body_preview(body));
    let message = format!("status {}: {detail}", status.as_u16());
    if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
        AssetHostError::transport(message)
    } else {
        AssetHostError::rejected(message)
    }
}

#[cfg(test)]
mod tests {
    //! Coverage for signing and response mapping.

    use super::*;
    use rstest::rstest;

    #[test]
    fn signature_is_hex_sha256_of_params_and_secret() {
        // printf 'timestamp=1315060510abcd' | sha256sum
        assert_eq!(
            sign(1_315_060_510, "abcd"),
            "5652e549a70bdc03f73a633a23b7d3f3b067d72fff26dd15b25997f46fdf6439"
        );
        assert_ne!(sign(1_315_060_510, "abcd"), sign(1_315_060_511, "abcd"));
    }

    #[test]
    fn prefers_secure_url() {
        let url = parse_url(
            br#"{"public_id":"x","url":"http://res.test/x.jpg","secure_url":"https://res.test/x.jpg"}"#,
        )
        .expect("url decoded");
        assert_eq!(url, "https://res.test/x.jpg");
    }

    #[test]
    fn missing_url_is_a_decode_error() {
        let error = parse_url(br#"{"public_id":"x"}"#).expect_err("no url");
        assert!(matches!(error, AssetHostError::Decode { .. }));
    }

    #[rstest]
    #[case::unauthorised(StatusCode::UNAUTHORIZED, true)]
    #[case::bad_request(StatusCode::BAD_REQUEST, true)]
    #[case::throttled(StatusCode::TOO_MANY_REQUESTS, false)]
    #[case::server_error(StatusCode::BAD_GATEWAY, false)]
    fn statuses_map_to_rejected_or_transport(#[case] status: StatusCode, #[case] rejected: bool) {
        let error = map_status_error(status, br#"{"error":{"message":"Invalid Signature"}}"#);
        assert_eq!(matches!(error, AssetHostError::Rejected { .. }), rejected);
        assert!(error.to_string().contains("Invalid Signature"));
    }
}
