//! Internal Diesel row structs and their conversions to domain types.
//!
//! Rows never leave the persistence layer. Conversions that can fail (an
//! unknown province or user type label) return a message the repositories
//! turn into a query error.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{categories, images, monuments, users};
use crate::domain::{
    Category, CategoryId, Coordinates, Image, ImageId, Monument, MonumentId, PasswordHash,
    Province, User, UserId, UserType,
};

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub user_type: String,
    pub last_login: Option<DateTime<Utc>>,
    pub last_updated: Option<DateTime<Utc>>,
    pub record_count: i32,
}

/// Insert and full-update shape for the users table.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct UserRecord<'a> {
    pub id: Uuid,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub user_type: &'a str,
    pub last_login: Option<DateTime<Utc>>,
    pub last_updated: Option<DateTime<Utc>>,
    pub record_count: i32,
}

impl<'a> From<&'a User> for UserRecord<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            id: *user.id.as_uuid(),
            first_name: &user.first_name,
            last_name: &user.last_name,
            email: &user.email,
            password_hash: user.password_hash.as_str(),
            user_type: user.user_type.as_str(),
            last_login: user.last_login,
            last_updated: user.last_updated,
            record_count: i32::try_from(user.record_count).unwrap_or(i32::MAX),
        }
    }
}

impl TryFrom<UserRow> for User {
    type Error = String;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let user_type: UserType = row.user_type.parse().map_err(|err| format!("{err}"))?;
        Ok(Self {
            id: UserId::from_uuid(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            password_hash: PasswordHash::new(row.password_hash),
            user_type,
            last_login: row.last_login,
            last_updated: row.last_updated,
            record_count: u32::try_from(row.record_count).unwrap_or(0),
        })
    }
}

// ---------------------------------------------------------------------------
// Monuments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = monuments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MonumentRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub province: String,
    pub county: String,
    pub user_id: Option<Uuid>,
    pub category_ids: Vec<Uuid>,
    pub image_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = monuments)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct MonumentRecord<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub description: &'a str,
    pub latitude: f64,
    pub longitude: f64,
    pub province: &'a str,
    pub county: &'a str,
    pub user_id: Option<Uuid>,
    pub category_ids: Vec<Uuid>,
    pub image_ids: Vec<Uuid>,
}

impl<'a> From<&'a Monument> for MonumentRecord<'a> {
    fn from(monument: &'a Monument) -> Self {
        Self {
            id: *monument.id.as_uuid(),
            title: &monument.title,
            description: &monument.description,
            latitude: monument.coordinates.latitude,
            longitude: monument.coordinates.longitude,
            province: monument.province.as_str(),
            county: &monument.county,
            user_id: monument.user_id.as_ref().map(|id| *id.as_uuid()),
            category_ids: monument.categories.iter().map(|id| *id.as_uuid()).collect(),
            image_ids: monument.images.iter().map(|id| *id.as_uuid()).collect(),
        }
    }
}

impl TryFrom<MonumentRow> for Monument {
    type Error = String;

    fn try_from(row: MonumentRow) -> Result<Self, Self::Error> {
        let province: Province = row.province.parse().map_err(|err| format!("{err}"))?;
        Ok(Self {
            id: MonumentId::from_uuid(row.id),
            title: row.title,
            description: row.description,
            coordinates: Coordinates::new(row.latitude, row.longitude),
            province,
            county: row.county,
            user_id: row.user_id.map(UserId::from_uuid),
            categories: row.category_ids.into_iter().map(CategoryId::from_uuid).collect(),
            images: row.image_ids.into_iter().map(ImageId::from_uuid).collect(),
        })
    }
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CategoryRow {
    pub id: Uuid,
    pub title: String,
    pub monument_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = categories)]
pub(crate) struct NewCategoryRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub monument_ids: Vec<Uuid>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: CategoryId::from_uuid(row.id),
            title: row.title,
            monuments: row.monument_ids.into_iter().map(MonumentId::from_uuid).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Images
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = images)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ImageRow {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub monument_id: Option<Uuid>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = images)]
pub(crate) struct NewImageRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub url: &'a str,
}

impl From<ImageRow> for Image {
    fn from(row: ImageRow) -> Self {
        Self {
            id: ImageId::from_uuid(row.id),
            title: row.title,
            url: row.url,
            monument_id: row.monument_id.map(MonumentId::from_uuid),
        }
    }
}
