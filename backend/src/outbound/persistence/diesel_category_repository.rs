//! PostgreSQL-backed `CategoryRepository` implementation using Diesel ORM.
//!
//! Membership changes run as single statements against the `monument_ids`
//! array, so concurrent upserts for the same title cannot create duplicates or
//! drop members.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{CategoryPersistenceError, CategoryRepository};
use crate::domain::{Category, CategoryId, MonumentId};

use super::diesel_basic_error_mapping::{as_count, map_basic_diesel_error, map_basic_pool_error};
use super::models::{CategoryRow, NewCategoryRow};
use super::pool::{DbPool, PoolError};
use super::schema::categories;
use super::sql_functions::{array_append, array_remove};

/// Diesel-backed categories.
#[derive(Clone)]
pub struct DieselCategoryRepository {
    pool: DbPool,
}

impl DieselCategoryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CategoryPersistenceError {
    map_basic_pool_error(error, CategoryPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> CategoryPersistenceError {
    map_basic_diesel_error(
        error,
        CategoryPersistenceError::query,
        CategoryPersistenceError::connection,
    )
}

#[async_trait]
impl CategoryRepository for DieselCategoryRepository {
    async fn upsert_append(
        &self,
        title: &str,
        monument_id: &MonumentId,
    ) -> Result<CategoryId, CategoryPersistenceError> {
        let member = *monument_id.as_uuid();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id: Uuid = diesel::insert_into(categories::table)
            .values(NewCategoryRow {
                id: Uuid::new_v4(),
                title,
                monument_ids: vec![member],
            })
            .on_conflict(categories::title)
            .do_update()
            .set(categories::monument_ids.eq(array_append(categories::monument_ids, member)))
            .returning(categories::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(CategoryId::from_uuid(id))
    }

    async fn ensure(&self, title: &str) -> Result<CategoryId, CategoryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        // The no-op update makes RETURNING yield the existing row.
        let id: Uuid = diesel::insert_into(categories::table)
            .values(NewCategoryRow {
                id: Uuid::new_v4(),
                title,
                monument_ids: Vec::new(),
            })
            .on_conflict(categories::title)
            .do_update()
            .set(categories::title.eq(excluded(categories::title)))
            .returning(categories::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(CategoryId::from_uuid(id))
    }

    async fn list(&self) -> Result<Vec<Category>, CategoryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CategoryRow> = categories::table
            .select(CategoryRow::as_select())
            .order_by(categories::created_at.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn count(&self) -> Result<u64, CategoryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = categories::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(as_count(total))
    }

    async fn pull_monument(
        &self,
        monument_id: &MonumentId,
    ) -> Result<(), CategoryPersistenceError> {
        let member = *monument_id.as_uuid();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(categories::table)
            .filter(categories::monument_ids.contains(vec![member]))
            .set(categories::monument_ids.eq(array_remove(categories::monument_ids, member)))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn clear_members(&self) -> Result<(), CategoryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(categories::table)
            .set(categories::monument_ids.eq(Vec::<Uuid>::new()))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
