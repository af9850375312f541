//! PostgreSQL-backed `MonumentRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{MonumentPersistenceError, MonumentRepository};
use crate::domain::{Monument, MonumentId};

use super::diesel_basic_error_mapping::{
    as_count, collect_rows, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{MonumentRecord, MonumentRow};
use super::pool::{DbPool, PoolError};
use super::schema::monuments;

/// Diesel-backed monument records.
#[derive(Clone)]
pub struct DieselMonumentRepository {
    pool: DbPool,
}

impl DieselMonumentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> MonumentPersistenceError {
    map_basic_pool_error(error, MonumentPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> MonumentPersistenceError {
    map_basic_diesel_error(
        error,
        MonumentPersistenceError::query,
        MonumentPersistenceError::connection,
    )
}

#[async_trait]
impl MonumentRepository for DieselMonumentRepository {
    async fn insert(&self, monument: &Monument) -> Result<(), MonumentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(monuments::table)
            .values(MonumentRecord::from(monument))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn update(&self, monument: &Monument) -> Result<bool, MonumentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(monuments::table.find(monument.id.as_uuid()))
            .set(MonumentRecord::from(monument))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }

    async fn find_by_id(
        &self,
        id: &MonumentId,
    ) -> Result<Option<Monument>, MonumentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<MonumentRow> = monuments::table
            .find(id.as_uuid())
            .select(MonumentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(|row| {
            Monument::try_from(row)
                .map_err(|message| MonumentPersistenceError::query(format!("corrupt row: {message}")))
        })
        .transpose()
    }

    async fn find_by_ids(
        &self,
        ids: &[MonumentId],
    ) -> Result<Vec<Monument>, MonumentPersistenceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let keys: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<MonumentRow> = monuments::table
            .filter(monuments::id.eq_any(keys))
            .select(MonumentRow::as_select())
            .order_by(monuments::created_at.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        collect_rows(rows, MonumentPersistenceError::query)
    }

    async fn list(&self) -> Result<Vec<Monument>, MonumentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<MonumentRow> = monuments::table
            .select(MonumentRow::as_select())
            .order_by(monuments::created_at.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        collect_rows(rows, MonumentPersistenceError::query)
    }

    async fn count(&self) -> Result<u64, MonumentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = monuments::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(as_count(total))
    }

    async fn delete(&self, id: &MonumentId) -> Result<bool, MonumentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(monuments::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn delete_all(&self) -> Result<u64, MonumentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(monuments::table)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(as_count(deleted))
    }
}
