//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL repositories using Diesel ORM
//! - **memory**: in-process repositories used without a database
//! - **asset_host**: signed image uploads
//! - **weather**: One Call weather lookups
//! - **jwt** / **password**: token signing and password hashing
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod asset_host;
pub(crate) mod http_support;
pub mod jwt;
pub mod memory;
pub mod password;
pub mod persistence;
pub mod weather;
