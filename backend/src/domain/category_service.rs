//! Category reconciliation.
//!
//! Monuments carry a list of category ids and each category carries the ids
//! of its member monuments. This service keeps the category side in step when
//! monuments are created, edited and deleted. Nothing here is transactional:
//! a failure part way through a sequence leaves the earlier writes in place.

use std::sync::Arc;

use tracing::debug;

use crate::domain::ports::{CategoryRepository, MonumentRepository};
use crate::domain::{
    Category, CategoryId, CategorySelection, CategoryWithMonuments, Error, MonumentId, Province,
};

/// Maintains province and free-form category membership.
#[derive(Clone)]
pub struct CategoryReconciliationService {
    categories: Arc<dyn CategoryRepository>,
    monuments: Arc<dyn MonumentRepository>,
}

impl CategoryReconciliationService {
    /// Create a service over the given repositories.
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        monuments: Arc<dyn MonumentRepository>,
    ) -> Self {
        Self {
            categories,
            monuments,
        }
    }

    /// Province categories with their member monuments expanded.
    pub async fn find_province_categories(&self) -> Result<Vec<CategoryWithMonuments>, Error> {
        self.expand(|category| category.is_province()).await
    }

    /// Free-form categories with their member monuments expanded.
    pub async fn find_other_categories(&self) -> Result<Vec<CategoryWithMonuments>, Error> {
        self.expand(|category| !category.is_province()).await
    }

    async fn expand(
        &self,
        keep: impl Fn(&Category) -> bool,
    ) -> Result<Vec<CategoryWithMonuments>, Error> {
        let categories = self.categories.list().await?;
        let mut expanded = Vec::new();
        for category in categories.into_iter().filter(|category| keep(category)) {
            let monuments = self.monuments.find_by_ids(&category.monuments).await?;
            expanded.push(CategoryWithMonuments {
                category,
                monuments,
            });
        }
        Ok(expanded)
    }

    /// Add `monument_id` to the province's category, creating it if needed.
    ///
    /// Returns the persisted category id.
    pub async fn add_province_category(
        &self,
        province: Province,
        monument_id: &MonumentId,
    ) -> Result<CategoryId, Error> {
        let id = self
            .categories
            .upsert_append(province.as_str(), monument_id)
            .await?;
        debug!(%province, %monument_id, category_id = %id, "monument added to province");
        Ok(id)
    }

    /// Add `monument_id` to every selected free-form category.
    ///
    /// Titles match exactly and case-sensitively. Unknown titles create a new
    /// category seeded with the monument. Province titles are skipped because
    /// province membership is managed by [`Self::add_province_category`].
    /// Returned ids follow selection order with duplicates removed.
    pub async fn add_additional_categories(
        &self,
        selection: &CategorySelection,
        monument_id: &MonumentId,
    ) -> Result<Vec<CategoryId>, Error> {
        let mut ids: Vec<CategoryId> = Vec::new();
        for title in selection.titles() {
            if Province::is_province_title(&title) {
                debug!(%title, "skipping province title in category selection");
                continue;
            }
            let id = self.categories.upsert_append(&title, monument_id).await?;
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        Ok(ids)
    }

    /// Remove `monument_id` from every category ahead of an edit.
    pub async fn pull_prior_monument_ids(&self, monument_id: &MonumentId) -> Result<(), Error> {
        self.categories.pull_monument(monument_id).await?;
        Ok(())
    }

    /// Re-add an edited monument to its (possibly new) province.
    pub async fn edit_province(
        &self,
        province: Province,
        monument_id: &MonumentId,
    ) -> Result<CategoryId, Error> {
        self.add_province_category(province, monument_id).await
    }

    /// Re-add an edited monument to its selected free-form categories.
    ///
    /// Expects [`Self::pull_prior_monument_ids`] to have run first, so the
    /// selection fully replaces the previous membership.
    pub async fn edit_additional_categories(
        &self,
        selection: &CategorySelection,
        monument_id: &MonumentId,
    ) -> Result<Vec<CategoryId>, Error> {
        self.add_additional_categories(selection, monument_id).await
    }

    /// Remove a deleted monument from every category.
    pub async fn remove_monument_id(&self, monument_id: &MonumentId) -> Result<(), Error> {
        self.pull_prior_monument_ids(monument_id).await
    }

    /// Empty every category after a bulk monument delete.
    pub async fn clear_memberships(&self) -> Result<(), Error> {
        self.categories.clear_members().await?;
        Ok(())
    }

    /// Titles of the free-form categories, in creation order.
    pub async fn list_other_category_titles(&self) -> Result<Vec<String>, Error> {
        let categories = self.categories.list().await?;
        Ok(categories
            .into_iter()
            .filter(|category| !category.is_province())
            .map(|category| category.title)
            .collect())
    }

    /// Titles for the given category ids, in the order given.
    pub async fn titles_for(&self, ids: &[CategoryId]) -> Result<Vec<String>, Error> {
        let categories = self.categories.list().await?;
        Ok(ids
            .iter()
            .filter_map(|id| {
                categories
                    .iter()
                    .find(|category| category.id == *id)
                    .map(|category| category.title.clone())
            })
            .collect())
    }

    /// Make sure the four province categories exist.
    pub async fn ensure_provinces(&self) -> Result<(), Error> {
        for province in Province::ALL {
            self.categories.ensure(province.as_str()).await?;
        }
        Ok(())
    }

    /// Number of categories.
    pub async fn count(&self) -> Result<u64, Error> {
        Ok(self.categories.count().await?)
    }
}

#[cfg(test)]
#[path = "category_service_tests.rs"]
mod tests;
