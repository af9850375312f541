//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the JSON API. It registers:
//!
//! - **Paths**: every endpoint under `/api` plus the health probes
//! - **Schemas**: request and response bodies, and wrappers for domain types
//!   ([`ErrorSchema`], [`ErrorCodeSchema`], [`WeatherSummarySchema`],
//!   [`ImageListingSchema`]) so the domain stays free of utoipa
//! - **Security**: the bearer token issued by `POST /api/users/authenticate`
//!
//! The generated document is served by Swagger UI in debug builds and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::monuments::{CategoryResponse, CoordinatesResponse, MonumentResponse};
use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, ImageListingSchema, ImageSummarySchema, WeatherSummarySchema,
};
use crate::inbound::http::users::{
    AccountRequest, AuthenticateRequest, TokenResponse, UserResponse,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token issued by POST /api/users/authenticate."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the JSON API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Historical monuments API",
        description = "Users, monuments, categories, images and weather for the monuments catalogue."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::authenticate,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::replace_user_put,
        crate::inbound::http::users::replace_user_patch,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::users::delete_all_users,
        crate::inbound::http::monuments::list_monuments,
        crate::inbound::http::monuments::list_categories,
        crate::inbound::http::monuments::list_provinces,
        crate::inbound::http::monuments::get_monument,
        crate::inbound::http::monuments::get_monument_weather,
        crate::inbound::http::monuments::get_monument_images,
        crate::inbound::http::monuments::create_monument,
        crate::inbound::http::monuments::replace_monument_put,
        crate::inbound::http::monuments::replace_monument_patch,
        crate::inbound::http::monuments::delete_monument,
        crate::inbound::http::monuments::delete_all_monuments,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserResponse,
        AccountRequest,
        AuthenticateRequest,
        TokenResponse,
        MonumentResponse,
        CoordinatesResponse,
        CategoryResponse,
        ImageSummarySchema,
        ImageListingSchema,
        WeatherSummarySchema,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "users", description = "Accounts and token issue"),
        (name = "monuments", description = "Monuments, their categories, images and weather"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
