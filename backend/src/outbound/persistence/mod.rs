//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories are thin translators between Diesel rows and domain types
//! over a `bb8` pool of `diesel-async` connections. Row structs and table
//! definitions never leave this module. Database failures are mapped onto the
//! `Connection`/`Query` variants of each port's error.
//!
//! ```no_run
//! # async fn wire() -> Result<(), monuments::outbound::persistence::PoolError> {
//! use monuments::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::connect(PoolConfig::new("postgres://localhost/monuments")).await?;
//! let users = DieselUserRepository::new(pool);
//! # let _ = users;
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_category_repository;
mod diesel_image_repository;
mod diesel_monument_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;
mod sql_functions;

pub use diesel_category_repository::DieselCategoryRepository;
pub use diesel_image_repository::DieselImageRepository;
pub use diesel_monument_repository::DieselMonumentRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
