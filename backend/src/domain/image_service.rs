//! Image attachment.
//!
//! Images are persisted before their monument exists, then pointed at the
//! monument once it has an id. Uploads run one file at a time, in the order
//! the files arrived.

use std::sync::Arc;

use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{AssetHost, ImageRepository};
use crate::domain::{
    DEFAULT_IMAGE_TITLE_PREFIX, DEFAULT_IMAGE_URL, Error, Image, ImageBatch, ImageListing,
    MonumentId, NewImage, UploadIntent, UploadedFile, format_title_stamp,
};

/// Uploads, records and attaches monument images.
#[derive(Clone)]
pub struct ImageAttachmentService {
    images: Arc<dyn ImageRepository>,
    assets: Arc<dyn AssetHost>,
    clock: Arc<dyn Clock>,
}

impl ImageAttachmentService {
    /// Create a service.
    ///
    /// # Examples
    /// ```
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// # use monuments::domain::ImageAttachmentService;
    /// # use monuments::domain::ports::FixtureAssetHost;
    /// # use monuments::outbound::memory::MemoryStore;
    /// let store = Arc::new(MemoryStore::default());
    /// let service = ImageAttachmentService::new(
    ///     store,
    ///     Arc::new(FixtureAssetHost),
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = service;
    /// ```
    pub fn new(
        images: Arc<dyn ImageRepository>,
        assets: Arc<dyn AssetHost>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            images,
            assets,
            clock,
        }
    }

    /// Persist the images for a new monument.
    ///
    /// With no file a single placeholder image is recorded without touching
    /// the asset host. Otherwise each file is uploaded and recorded under its
    /// original filename.
    pub async fn add_images(&self, intent: UploadIntent) -> Result<ImageBatch, Error> {
        match intent {
            UploadIntent::NoFile => self.add_default_image().await,
            files => self.upload_all(files.into_files()).await,
        }
    }

    /// Persist replacement images for an edited monument.
    ///
    /// With no file, `clear_prior` decides between a placeholder image and an
    /// empty batch; an empty batch tells the caller to keep the existing
    /// images.
    pub async fn edit_images(
        &self,
        intent: UploadIntent,
        clear_prior: bool,
    ) -> Result<ImageBatch, Error> {
        match intent {
            UploadIntent::NoFile if clear_prior => self.add_default_image().await,
            UploadIntent::NoFile => Ok(ImageBatch::default()),
            files => self.upload_all(files.into_files()).await,
        }
    }

    /// Point every image in `batch` at `monument_id`.
    pub async fn attach_to_monument(
        &self,
        batch: &ImageBatch,
        monument_id: &MonumentId,
    ) -> Result<(), Error> {
        if batch.is_empty() {
            return Ok(());
        }
        self.images
            .set_monument(&batch.image_ids, monument_id)
            .await?;
        Ok(())
    }

    /// Remove the images owned by `monument_id`.
    pub async fn delete_images_for_monument(&self, monument_id: &MonumentId) -> Result<u64, Error> {
        let removed = self.images.delete_for_monument(monument_id).await?;
        debug!(%monument_id, removed, "monument images deleted");
        Ok(removed)
    }

    /// Remove every image record.
    pub async fn delete_all_images(&self) -> Result<u64, Error> {
        Ok(self.images.delete_all().await?)
    }

    /// Images owned by `monument_id`.
    pub async fn images_for_monument(&self, monument_id: &MonumentId) -> Result<Vec<Image>, Error> {
        Ok(self.images.list_for_monument(monument_id).await?)
    }

    /// Title and URL listing for the API.
    pub async fn list_images_for_monument(
        &self,
        monument_id: &MonumentId,
    ) -> Result<ImageListing, Error> {
        Ok(ImageListing::from(
            self.images_for_monument(monument_id).await?,
        ))
    }

    async fn add_default_image(&self) -> Result<ImageBatch, Error> {
        let title = format!(
            "{DEFAULT_IMAGE_TITLE_PREFIX} {}",
            format_title_stamp(&self.clock.utc())
        );
        let image = self
            .images
            .insert(&NewImage {
                title,
                url: DEFAULT_IMAGE_URL.to_owned(),
            })
            .await?;
        let mut batch = ImageBatch::default();
        batch.push(&image);
        Ok(batch)
    }

    async fn upload_all(&self, files: Vec<UploadedFile>) -> Result<ImageBatch, Error> {
        let mut batch = ImageBatch::default();
        for file in files {
            let url = self.assets.upload(&file).await?;
            let image = self
                .images
                .insert(&NewImage {
                    title: file.filename,
                    url,
                })
                .await?;
            info!(image_id = %image.id, title = %image.title, "image uploaded");
            batch.push(&image);
        }
        Ok(batch)
    }
}

#[cfg(test)]
#[path = "image_service_tests.rs"]
mod tests;
