//! Multipart monument forms.
//!
//! The create and edit forms (page and API alike) post `multipart/form-data`
//! carrying the monument fields, zero or more `category` values, zero or more
//! `imageUpload` files and, on edit, an optional `imagesCleared` flag.

use actix_multipart::{Field, Multipart};
use futures_util::StreamExt;
use tracing::debug;

use crate::domain::{Error, MonumentPayload, UploadIntent, UploadedFile};

/// Largest accepted image, in bytes.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;
const MAX_TEXT_BYTES: usize = 64 * 1024;

/// Parsed monument form.
#[derive(Debug, Default)]
pub struct MonumentForm {
    pub payload: MonumentPayload,
    pub files: Vec<UploadedFile>,
    pub images_cleared: bool,
}

impl MonumentForm {
    /// Upload intent for the files carried by the form.
    pub fn upload_intent(&mut self) -> UploadIntent {
        UploadIntent::from_files(std::mem::take(&mut self.files))
    }

    fn set_text(&mut self, name: &str, value: String) {
        match name {
            "title" => self.payload.title = value,
            "description" => self.payload.description = value,
            "province" => self.payload.province = value,
            "county" => self.payload.county = value,
            "latitude" => self.payload.latitude = value,
            "longitude" => self.payload.longitude = value,
            "category" | "category[]" => self.payload.categories.push(value),
            "imagesCleared" => self.images_cleared = is_truthy(&value),
            other => debug!(field = other, "ignoring unknown form field"),
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "on" | "yes"
    )
}

fn malformed(error: impl std::fmt::Display) -> Error {
    Error::invalid_request(format!("malformed multipart body: {error}"))
}

async fn read_field(field: &mut Field, limit: usize) -> Result<Vec<u8>, Error> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(malformed)?;
        if bytes.len() + chunk.len() > limit {
            return Err(Error::invalid_request(format!(
                "form field exceeds {limit} bytes"
            )));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

/// Drain a multipart stream into a [`MonumentForm`].
///
/// # Errors
///
/// Returns `InvalidRequest` when the body is malformed, a text field is not
/// UTF-8, or a part exceeds its size limit.
pub async fn read_monument_form(mut multipart: Multipart) -> Result<MonumentForm, Error> {
    let mut form = MonumentForm::default();
    while let Some(field) = multipart.next().await {
        let mut field = field.map_err(malformed)?;
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        if name == "imageUpload" || name == "imageUpload[]" {
            let filename = field
                .content_disposition()
                .and_then(|disposition| disposition.get_filename())
                .unwrap_or_default()
                .to_owned();
            let content_type = field.content_type().map(ToString::to_string);
            let bytes = read_field(&mut field, MAX_IMAGE_BYTES).await?;
            form.files.push(UploadedFile {
                filename,
                content_type,
                bytes,
            });
        } else {
            let bytes = read_field(&mut field, MAX_TEXT_BYTES).await?;
            let value = String::from_utf8(bytes)
                .map_err(|_| Error::invalid_request(format!("{name} must be UTF-8 text")))?;
            form.set_text(&name, value);
        }
    }
    Ok(form)
}
