//! Diesel table definitions for the catalogue schema.
//!
//! These must match `backend/migrations` exactly. Membership lists are
//! PostgreSQL `UUID[]` columns rather than join tables.

diesel::table! {
    /// Registered accounts. `email` is unique.
    users (id) {
        id -> Uuid,
        first_name -> Varchar,
        last_name -> Varchar,
        email -> Varchar,
        password_hash -> Varchar,
        /// `User` or `Admin`.
        user_type -> Varchar,
        last_login -> Nullable<Timestamptz>,
        last_updated -> Nullable<Timestamptz>,
        /// Number of monuments the account has recorded. Never negative.
        record_count -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    monuments (id) {
        id -> Uuid,
        title -> Varchar,
        description -> Text,
        latitude -> Float8,
        longitude -> Float8,
        province -> Varchar,
        county -> Varchar,
        user_id -> Nullable<Uuid>,
        /// Province category first, then additional categories.
        category_ids -> Array<Uuid>,
        image_ids -> Array<Uuid>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Categories with back-references to member monuments. `title` is unique.
    categories (id) {
        id -> Uuid,
        title -> Varchar,
        monument_ids -> Array<Uuid>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    images (id) {
        id -> Uuid,
        title -> Varchar,
        url -> Varchar,
        monument_id -> Nullable<Uuid>,
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, monuments, categories, images);
