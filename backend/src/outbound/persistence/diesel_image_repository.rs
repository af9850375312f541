//! PostgreSQL-backed `ImageRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{ImagePersistenceError, ImageRepository};
use crate::domain::{Image, ImageId, MonumentId, NewImage};

use super::diesel_basic_error_mapping::{as_count, map_basic_diesel_error, map_basic_pool_error};
use super::models::{ImageRow, NewImageRow};
use super::pool::{DbPool, PoolError};
use super::schema::images;

/// Diesel-backed image records.
#[derive(Clone)]
pub struct DieselImageRepository {
    pool: DbPool,
}

impl DieselImageRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ImagePersistenceError {
    map_basic_pool_error(error, ImagePersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ImagePersistenceError {
    map_basic_diesel_error(
        error,
        ImagePersistenceError::query,
        ImagePersistenceError::connection,
    )
}

/// Arrange `rows` in the order of `ids`, dropping ids with no row.
fn in_request_order(ids: &[ImageId], rows: Vec<ImageRow>) -> Vec<Image> {
    let mut images: Vec<Image> = rows.into_iter().map(Image::from).collect();
    ids.iter()
        .filter_map(|id| {
            images
                .iter()
                .position(|image| image.id == *id)
                .map(|index| images.swap_remove(index))
        })
        .collect()
}

#[async_trait]
impl ImageRepository for DieselImageRepository {
    async fn insert(&self, image: &NewImage) -> Result<Image, ImagePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: ImageRow = diesel::insert_into(images::table)
            .values(NewImageRow {
                id: Uuid::new_v4(),
                title: &image.title,
                url: &image.url,
            })
            .returning(ImageRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(Image::from(row))
    }

    async fn set_monument(
        &self,
        ids: &[ImageId],
        monument_id: &MonumentId,
    ) -> Result<(), ImagePersistenceError> {
        if ids.is_empty() {
            return Ok(());
        }
        let keys: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(images::table)
            .filter(images::id.eq_any(keys))
            .set(images::monument_id.eq(Some(*monument_id.as_uuid())))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list_for_monument(
        &self,
        monument_id: &MonumentId,
    ) -> Result<Vec<Image>, ImagePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ImageRow> = images::table
            .filter(images::monument_id.eq(monument_id.as_uuid()))
            .select(ImageRow::as_select())
            .order_by(images::created_at.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Image::from).collect())
    }

    async fn find_by_ids(&self, ids: &[ImageId]) -> Result<Vec<Image>, ImagePersistenceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let keys: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ImageRow> = images::table
            .filter(images::id.eq_any(keys))
            .select(ImageRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(in_request_order(ids, rows))
    }

    async fn delete_for_monument(
        &self,
        monument_id: &MonumentId,
    ) -> Result<u64, ImagePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(images::table)
            .filter(images::monument_id.eq(monument_id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(as_count(deleted))
    }

    async fn delete_all(&self) -> Result<u64, ImagePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(images::table)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(as_count(deleted))
    }
}
