//! HTTP inbound adapter exposing the JSON API under `/api`.

pub mod bearer;
pub mod error;
pub mod health;
pub mod monuments;
pub mod multipart;
pub mod schemas;
pub mod state;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every API endpoint. Mount under `/api`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(users::configure)
        .configure(monuments::configure);
}
