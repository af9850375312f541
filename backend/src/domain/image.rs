//! Monument images and upload intents.

use std::fmt;

use serde::{Deserialize, Serialize};

pub use super::ids::ImageId;
use super::ids::MonumentId;

/// Placeholder shown when a monument is created without an image.
pub const DEFAULT_IMAGE_URL: &str = "/src/assets/pointOfInterestDefaultImage.png";
/// Prefix of the generated title for the placeholder image.
pub const DEFAULT_IMAGE_TITLE_PREFIX: &str = "pointOfInterestDefaultImage";

/// Persisted image.
///
/// `monument_id` is empty between upload and the monument being saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub id: ImageId,
    pub title: String,
    pub url: String,
    pub monument_id: Option<MonumentId>,
}

/// Image fields before persistence assigns an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewImage {
    pub title: String,
    pub url: String,
}

/// A file received from a multipart form.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedFile")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// What the user attached to a monument form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UploadIntent {
    #[default]
    NoFile,
    SingleFile(UploadedFile),
    MultipleFiles(Vec<UploadedFile>),
}

impl UploadIntent {
    /// Build an intent from the files a form carried. Parts with an empty
    /// filename (an untouched file input) are ignored.
    pub fn from_files(mut files: Vec<UploadedFile>) -> Self {
        files.retain(|file| !file.filename.is_empty());
        match files.len() {
            0 => Self::NoFile,
            1 => files.pop().map_or(Self::NoFile, Self::SingleFile),
            _ => Self::MultipleFiles(files),
        }
    }

    /// Files to upload, in submission order.
    pub fn into_files(self) -> Vec<UploadedFile> {
        match self {
            Self::NoFile => Vec::new(),
            Self::SingleFile(file) => vec![file],
            Self::MultipleFiles(files) => files,
        }
    }

    /// Whether no file was attached.
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::NoFile)
    }
}

/// Images produced by one add or edit request, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageBatch {
    pub image_ids: Vec<ImageId>,
    pub image_titles: Vec<String>,
}

impl ImageBatch {
    /// Record a persisted image.
    pub fn push(&mut self, image: &Image) {
        self.image_ids.push(image.id);
        self.image_titles.push(image.title.clone());
    }

    /// Whether the batch holds no images.
    pub fn is_empty(&self) -> bool {
        self.image_ids.is_empty()
    }
}

/// Title and URL pair returned by the monument images endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSummary {
    pub title: String,
    pub url: String,
}

/// Listing of a monument's images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageListing {
    pub number_of_results: usize,
    pub images: Vec<ImageSummary>,
}

impl From<Vec<Image>> for ImageListing {
    fn from(images: Vec<Image>) -> Self {
        let images: Vec<ImageSummary> = images
            .into_iter()
            .map(|image| ImageSummary {
                title: image.title,
                url: image.url,
            })
            .collect();
        Self {
            number_of_results: images.len(),
            images,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn file(name: &str) -> UploadedFile {
        UploadedFile {
            filename: name.to_owned(),
            content_type: Some("image/jpeg".to_owned()),
            bytes: vec![0xff, 0xd8],
        }
    }

    #[rstest]
    fn untouched_file_input_is_no_file() {
        assert_eq!(UploadIntent::from_files(vec![file("")]), UploadIntent::NoFile);
    }

    #[rstest]
    fn one_file_is_single() {
        let intent = UploadIntent::from_files(vec![file("a.jpg")]);
        assert_eq!(intent, UploadIntent::SingleFile(file("a.jpg")));
    }

    #[rstest]
    fn many_files_keep_order() {
        let intent = UploadIntent::from_files(vec![file("a.jpg"), file("b.jpg")]);
        let names: Vec<String> = intent.into_files().into_iter().map(|f| f.filename).collect();
        assert_eq!(names, vec!["a.jpg", "b.jpg"]);
    }

    #[rstest]
    fn listing_counts_images() {
        let listing = ImageListing::from(vec![Image {
            id: ImageId::random(),
            title: "front".to_owned(),
            url: DEFAULT_IMAGE_URL.to_owned(),
            monument_id: None,
        }]);
        assert_eq!(listing.number_of_results, 1);
        assert_eq!(listing.images[0].url, DEFAULT_IMAGE_URL);
    }
}
