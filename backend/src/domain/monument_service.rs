//! Monument create, edit and delete flows.
//!
//! Each flow runs its steps one after another and never rolls back. The
//! ordering matters: images exist before the monument, the monument exists
//! before any category references it, and images are back-filled last.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::ports::{MonumentRepository, UserRepository};
use crate::domain::{
    CategoryId, CategoryReconciliationService, CategorySelection, Error, Image,
    ImageAttachmentService, Monument, MonumentDraft, MonumentFilter, MonumentId, UploadIntent,
    UserId,
};

/// A monument with its images and category titles resolved for display.
#[derive(Debug, Clone, PartialEq)]
pub struct MonumentDetails {
    pub monument: Monument,
    pub images: Vec<Image>,
    pub category_titles: Vec<String>,
}

/// Record counts shown on the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogueCounts {
    pub users: u64,
    pub monuments: u64,
    pub categories: u64,
}

/// Coordinates the monument, category and image writes.
#[derive(Clone)]
pub struct MonumentService {
    monuments: Arc<dyn MonumentRepository>,
    users: Arc<dyn UserRepository>,
    categories: CategoryReconciliationService,
    images: ImageAttachmentService,
}

impl MonumentService {
    pub fn new(
        monuments: Arc<dyn MonumentRepository>,
        users: Arc<dyn UserRepository>,
        categories: CategoryReconciliationService,
        images: ImageAttachmentService,
    ) -> Self {
        Self {
            monuments,
            users,
            categories,
            images,
        }
    }

    /// Category reconciliation used by this service.
    pub fn categories(&self) -> &CategoryReconciliationService {
        &self.categories
    }

    /// Image attachment used by this service.
    pub fn images(&self) -> &ImageAttachmentService {
        &self.images
    }

    /// Create a monument owned by `owner`.
    ///
    /// The returned monument lists its province category first.
    pub async fn create(
        &self,
        draft: MonumentDraft,
        selection: CategorySelection,
        intent: UploadIntent,
        owner: Option<UserId>,
    ) -> Result<Monument, Error> {
        let batch = self.images.add_images(intent).await?;

        let mut monument = Monument {
            id: MonumentId::random(),
            title: draft.title,
            description: draft.description,
            coordinates: draft.coordinates,
            province: draft.province,
            county: draft.county,
            user_id: owner,
            categories: Vec::new(),
            images: batch.image_ids.clone(),
        };
        self.monuments.insert(&monument).await?;

        let province_id = self
            .categories
            .add_province_category(monument.province, &monument.id)
            .await?;
        let additional = self
            .categories
            .add_additional_categories(&selection, &monument.id)
            .await?;
        monument.categories = ordered_categories(province_id, additional);
        self.save(&monument).await?;

        self.images.attach_to_monument(&batch, &monument.id).await?;
        if let Some(owner) = owner {
            self.users.adjust_record_count(&owner, 1).await?;
        }

        info!(
            monument_id = %monument.id,
            province = %monument.province,
            images = monument.images.len(),
            "monument created"
        );
        Ok(monument)
    }

    /// Apply an edit to an existing monument.
    ///
    /// Category membership is rebuilt from `selection`. Images are replaced
    /// only when the edit produced new ones; an empty batch keeps the
    /// existing images.
    pub async fn edit(
        &self,
        id: &MonumentId,
        draft: MonumentDraft,
        selection: CategorySelection,
        intent: UploadIntent,
        clear_prior_images: bool,
    ) -> Result<Monument, Error> {
        let mut monument = self.find(id).await?;
        let batch = self
            .images
            .edit_images(intent, clear_prior_images)
            .await?;

        self.categories.pull_prior_monument_ids(id).await?;
        let province_id = self.categories.edit_province(draft.province, id).await?;
        let additional = self
            .categories
            .edit_additional_categories(&selection, id)
            .await?;

        monument.title = draft.title;
        monument.description = draft.description;
        monument.coordinates = draft.coordinates;
        monument.province = draft.province;
        monument.county = draft.county;
        monument.categories = ordered_categories(province_id, additional);
        if !batch.is_empty() {
            self.images.delete_images_for_monument(id).await?;
            monument.images = batch.image_ids.clone();
        }
        self.save(&monument).await?;

        self.images.attach_to_monument(&batch, id).await?;
        info!(monument_id = %id, replaced_images = !batch.is_empty(), "monument edited");
        Ok(monument)
    }

    /// Delete a monument and everything that points at it.
    pub async fn delete(&self, id: &MonumentId) -> Result<(), Error> {
        let monument = self.find(id).await?;
        if !self.monuments.delete(id).await? {
            return Err(not_found(id));
        }
        self.categories.remove_monument_id(id).await?;
        self.images.delete_images_for_monument(id).await?;
        if let Some(owner) = monument.user_id {
            self.users.adjust_record_count(&owner, -1).await?;
        }
        info!(monument_id = %id, "monument deleted");
        Ok(())
    }

    /// Delete every monument, emptying categories and removing images.
    pub async fn delete_all(&self) -> Result<u64, Error> {
        let monuments = self.monuments.list().await?;
        let removed = self.monuments.delete_all().await?;
        self.categories.clear_memberships().await?;
        self.images.delete_all_images().await?;
        for owner in monuments.iter().filter_map(|monument| monument.user_id) {
            self.users.adjust_record_count(&owner, -1).await?;
        }
        warn!(removed, "all monuments deleted");
        Ok(removed)
    }

    /// Fetch a monument.
    pub async fn find(&self, id: &MonumentId) -> Result<Monument, Error> {
        self.monuments
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Fetch a monument with its images and category titles.
    pub async fn details(&self, id: &MonumentId) -> Result<MonumentDetails, Error> {
        let monument = self.find(id).await?;
        let images = self.images.images_for_monument(id).await?;
        let category_titles = self.categories.titles_for(&monument.categories).await?;
        Ok(MonumentDetails {
            monument,
            images,
            category_titles,
        })
    }

    /// Every monument.
    pub async fn list(&self) -> Result<Vec<Monument>, Error> {
        Ok(self.monuments.list().await?)
    }

    /// Monuments matching `filter`.
    pub async fn filter(&self, filter: &MonumentFilter) -> Result<Vec<Monument>, Error> {
        let monuments = self.monuments.list().await?;
        Ok(monuments
            .into_iter()
            .filter(|monument| filter.matches(monument))
            .collect())
    }

    /// Counts of users, monuments and categories.
    pub async fn counts(&self) -> Result<CatalogueCounts, Error> {
        Ok(CatalogueCounts {
            users: self.users.count().await?,
            monuments: self.monuments.count().await?,
            categories: self.categories.count().await?,
        })
    }

    async fn save(&self, monument: &Monument) -> Result<(), Error> {
        if self.monuments.update(monument).await? {
            Ok(())
        } else {
            Err(not_found(&monument.id))
        }
    }
}

fn ordered_categories(province: CategoryId, additional: Vec<CategoryId>) -> Vec<CategoryId> {
    let mut ids = vec![province];
    for id in additional {
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    ids
}

fn not_found(id: &MonumentId) -> Error {
    Error::not_found(format!("monument {id} not found"))
}

#[cfg(test)]
#[path = "monument_service_tests.rs"]
mod tests;
