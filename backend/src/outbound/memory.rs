//! In-process store implementing every repository port.
//!
//! Used when no database URL is configured and by the test suites. One mutex
//! guards all four collections, so each call is atomic with respect to the
//! others, including [`CategoryRepository::upsert_append`].

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    CategoryPersistenceError, CategoryRepository, ImagePersistenceError, ImageRepository,
    MonumentPersistenceError, MonumentRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{
    Category, CategoryId, Image, ImageId, Monument, MonumentId, NewImage, User, UserId,
};

#[derive(Debug, Default)]
struct Collections {
    users: Vec<User>,
    monuments: Vec<Monument>,
    categories: Vec<Category>,
    images: Vec<Image>,
}

/// Volatile catalogue store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock<E>(&self, to_error: impl FnOnce(String) -> E) -> Result<MutexGuard<'_, Collections>, E> {
        self.inner
            .lock()
            .map_err(|_| to_error("memory store lock poisoned".to_owned()))
    }
}

fn count(len: usize) -> u64 {
    u64::try_from(len).unwrap_or(u64::MAX)
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut data = self.lock(UserPersistenceError::query)?;
        if data.users.iter().any(|existing| existing.email == user.email) {
            return Err(UserPersistenceError::duplicate_email(user.email.clone()));
        }
        data.users.push(user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<bool, UserPersistenceError> {
        let mut data = self.lock(UserPersistenceError::query)?;
        if data
            .users
            .iter()
            .any(|other| other.id != user.id && other.email == user.email)
        {
            return Err(UserPersistenceError::duplicate_email(user.email.clone()));
        }
        Ok(match data.users.iter_mut().find(|existing| existing.id == user.id) {
            Some(existing) => {
                *existing = user.clone();
                true
            }
            None => false,
        })
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let data = self.lock(UserPersistenceError::query)?;
        Ok(data.users.iter().find(|user| user.id == *id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
        let data = self.lock(UserPersistenceError::query)?;
        Ok(data.users.iter().find(|user| user.email == email).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.lock(UserPersistenceError::query)?.users.clone())
    }

    async fn count(&self) -> Result<u64, UserPersistenceError> {
        Ok(count(self.lock(UserPersistenceError::query)?.users.len()))
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        let mut data = self.lock(UserPersistenceError::query)?;
        let before = data.users.len();
        data.users.retain(|user| user.id != *id);
        Ok(data.users.len() != before)
    }

    async fn delete_all(&self) -> Result<u64, UserPersistenceError> {
        let mut data = self.lock(UserPersistenceError::query)?;
        Ok(count(data.users.drain(..).count()))
    }

    async fn adjust_record_count(
        &self,
        id: &UserId,
        delta: i32,
    ) -> Result<(), UserPersistenceError> {
        let mut data = self.lock(UserPersistenceError::query)?;
        if let Some(user) = data.users.iter_mut().find(|user| user.id == *id) {
            user.record_count = user.record_count.saturating_add_signed(delta);
        }
        Ok(())
    }
}

#[async_trait]
impl MonumentRepository for MemoryStore {
    async fn insert(&self, monument: &Monument) -> Result<(), MonumentPersistenceError> {
        self.lock(MonumentPersistenceError::query)?
            .monuments
            .push(monument.clone());
        Ok(())
    }

    async fn update(&self, monument: &Monument) -> Result<bool, MonumentPersistenceError> {
        let mut data = self.lock(MonumentPersistenceError::query)?;
        Ok(
            match data
                .monuments
                .iter_mut()
                .find(|existing| existing.id == monument.id)
            {
                Some(existing) => {
                    *existing = monument.clone();
                    true
                }
                None => false,
            },
        )
    }

    async fn find_by_id(
        &self,
        id: &MonumentId,
    ) -> Result<Option<Monument>, MonumentPersistenceError> {
        let data = self.lock(MonumentPersistenceError::query)?;
        Ok(data
            .monuments
            .iter()
            .find(|monument| monument.id == *id)
            .cloned())
    }

    async fn find_by_ids(
        &self,
        ids: &[MonumentId],
    ) -> Result<Vec<Monument>, MonumentPersistenceError> {
        let data = self.lock(MonumentPersistenceError::query)?;
        Ok(data
            .monuments
            .iter()
            .filter(|monument| ids.contains(&monument.id))
            .cloned()
            .collect())
    }

    async fn list(&self) -> Result<Vec<Monument>, MonumentPersistenceError> {
        Ok(self.lock(MonumentPersistenceError::query)?.monuments.clone())
    }

    async fn count(&self) -> Result<u64, MonumentPersistenceError> {
        Ok(count(
            self.lock(MonumentPersistenceError::query)?.monuments.len(),
        ))
    }

    async fn delete(&self, id: &MonumentId) -> Result<bool, MonumentPersistenceError> {
        let mut data = self.lock(MonumentPersistenceError::query)?;
        let before = data.monuments.len();
        data.monuments.retain(|monument| monument.id != *id);
        Ok(data.monuments.len() != before)
    }

    async fn delete_all(&self) -> Result<u64, MonumentPersistenceError> {
        let mut data = self.lock(MonumentPersistenceError::query)?;
        Ok(count(data.monuments.drain(..).count()))
    }
}

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn upsert_append(
        &self,
        title: &str,
        monument_id: &MonumentId,
    ) -> Result<CategoryId, CategoryPersistenceError> {
        let mut data = self.lock(CategoryPersistenceError::query)?;
        if let Some(category) = data
            .categories
            .iter_mut()
            .find(|category| category.title == title)
        {
            category.monuments.push(*monument_id);
            return Ok(category.id);
        }
        let category = Category {
            id: CategoryId::random(),
            title: title.to_owned(),
            monuments: vec![*monument_id],
        };
        let id = category.id;
        data.categories.push(category);
        Ok(id)
    }

    async fn ensure(&self, title: &str) -> Result<CategoryId, CategoryPersistenceError> {
        let mut data = self.lock(CategoryPersistenceError::query)?;
        if let Some(category) = data.categories.iter().find(|category| category.title == title) {
            return Ok(category.id);
        }
        let id = CategoryId::random();
        data.categories.push(Category {
            id,
            title: title.to_owned(),
            monuments: Vec::new(),
        });
        Ok(id)
    }

    async fn list(&self) -> Result<Vec<Category>, CategoryPersistenceError> {
        Ok(self.lock(CategoryPersistenceError::query)?.categories.clone())
    }

    async fn count(&self) -> Result<u64, CategoryPersistenceError> {
        Ok(count(
            self.lock(CategoryPersistenceError::query)?.categories.len(),
        ))
    }

    async fn pull_monument(
        &self,
        monument_id: &MonumentId,
    ) -> Result<(), CategoryPersistenceError> {
        let mut data = self.lock(CategoryPersistenceError::query)?;
        for category in &mut data.categories {
            category.monuments.retain(|id| id != monument_id);
        }
        Ok(())
    }

    async fn clear_members(&self) -> Result<(), CategoryPersistenceError> {
        let mut data = self.lock(CategoryPersistenceError::query)?;
        for category in &mut data.categories {
            category.monuments.clear();
        }
        Ok(())
    }
}

#[async_trait]
impl ImageRepository for MemoryStore {
    async fn insert(&self, image: &NewImage) -> Result<Image, ImagePersistenceError> {
        let stored = Image {
            id: ImageId::random(),
            title: image.title.clone(),
            url: image.url.clone(),
            monument_id: None,
        };
        self.lock(ImagePersistenceError::query)?
            .images
            .push(stored.clone());
        Ok(stored)
    }

    async fn set_monument(
        &self,
        ids: &[ImageId],
        monument_id: &MonumentId,
    ) -> Result<(), ImagePersistenceError> {
        let mut data = self.lock(ImagePersistenceError::query)?;
        for image in data.images.iter_mut().filter(|image| ids.contains(&image.id)) {
            image.monument_id = Some(*monument_id);
        }
        Ok(())
    }

    async fn list_for_monument(
        &self,
        monument_id: &MonumentId,
    ) -> Result<Vec<Image>, ImagePersistenceError> {
        let data = self.lock(ImagePersistenceError::query)?;
        Ok(data
            .images
            .iter()
            .filter(|image| image.monument_id.as_ref() == Some(monument_id))
            .cloned()
            .collect())
    }

    async fn find_by_ids(&self, ids: &[ImageId]) -> Result<Vec<Image>, ImagePersistenceError> {
        let data = self.lock(ImagePersistenceError::query)?;
        Ok(ids
            .iter()
            .filter_map(|id| data.images.iter().find(|image| image.id == *id).cloned())
            .collect())
    }

    async fn delete_for_monument(
        &self,
        monument_id: &MonumentId,
    ) -> Result<u64, ImagePersistenceError> {
        let mut data = self.lock(ImagePersistenceError::query)?;
        let before = data.images.len();
        data.images
            .retain(|image| image.monument_id.as_ref() != Some(monument_id));
        Ok(count(before - data.images.len()))
    }

    async fn delete_all(&self) -> Result<u64, ImagePersistenceError> {
        let mut data = self.lock(ImagePersistenceError::query)?;
        Ok(count(data.images.drain(..).count()))
    }
}
