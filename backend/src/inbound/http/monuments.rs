//! Monuments API handlers.
//!
//! Reads are public. Creating, editing and deleting monuments needs a bearer
//! token from `POST /api/users/authenticate`; see [`ApiUser`].
//!
//! ```text
//! GET    /api/monuments/{id}/weather
//! POST   /api/monuments            multipart/form-data
//! DELETE /api/monuments/{id}       Authorization: Bearer <token>
//! ```

use actix_multipart::Multipart;
use actix_web::{HttpResponse, delete, get, patch, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::{
    CategoryId, CategoryWithMonuments, Error, ImageId, ImageListing, Monument, MonumentId,
    UserId, WeatherSummary, monument_draft_from_payload,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::ApiUser;
use crate::inbound::http::multipart::read_monument_form;
use crate::inbound::http::schemas::{ErrorSchema, ImageListingSchema, WeatherSummarySchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_path_id;

/// Latitude and longitude in decimal degrees.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CoordinatesResponse {
    pub latitude: f64,
    pub longitude: f64,
}

/// Monument record as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonumentResponse {
    #[schema(value_type = String, format = Uuid)]
    pub id: MonumentId,
    #[schema(example = "Customs House")]
    pub title: String,
    pub description: String,
    #[schema(example = "Leinster")]
    pub province: String,
    #[schema(example = "Dublin")]
    pub county: String,
    pub coordinates: CoordinatesResponse,
    #[schema(value_type = Option<String>, format = Uuid)]
    pub user_id: Option<UserId>,
    /// Province category first, then any additional categories.
    #[schema(value_type = Vec<String>)]
    pub categories: Vec<CategoryId>,
    #[schema(value_type = Vec<String>)]
    pub images: Vec<ImageId>,
}

impl From<Monument> for MonumentResponse {
    fn from(monument: Monument) -> Self {
        Self {
            id: monument.id,
            title: monument.title,
            description: monument.description,
            province: monument.province.as_str().to_owned(),
            county: monument.county,
            coordinates: CoordinatesResponse {
                latitude: monument.coordinates.latitude,
                longitude: monument.coordinates.longitude,
            },
            user_id: monument.user_id,
            categories: monument.categories,
            images: monument.images,
        }
    }
}

/// Category with its member monuments.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CategoryResponse {
    #[schema(value_type = String, format = Uuid)]
    pub id: CategoryId,
    #[schema(example = "Georgian")]
    pub title: String,
    pub monuments: Vec<MonumentResponse>,
}

impl From<CategoryWithMonuments> for CategoryResponse {
    fn from(entry: CategoryWithMonuments) -> Self {
        Self {
            id: entry.category.id,
            title: entry.category.title,
            monuments: entry
                .monuments
                .into_iter()
                .map(MonumentResponse::from)
                .collect(),
        }
    }
}

fn monument_id(raw: &str) -> Result<MonumentId, Error> {
    parse_path_id(raw, "monument")
}

/// List every monument.
#[utoipa::path(
    get,
    path = "/api/monuments",
    responses(
        (status = 200, description = "Monuments", body = [MonumentResponse]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["monuments"],
    operation_id = "listMonuments",
    security([])
)]
#[get("/monuments")]
pub async fn list_monuments(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<MonumentResponse>>> {
    let monuments = state.monuments.list().await?;
    Ok(web::Json(
        monuments.into_iter().map(MonumentResponse::from).collect(),
    ))
}

/// Free-form categories (everything except the four provinces).
#[utoipa::path(
    get,
    path = "/api/monuments/categories",
    responses((status = 200, description = "Categories", body = [CategoryResponse])),
    tags = ["monuments"],
    operation_id = "listCategories",
    security([])
)]
#[get("/monuments/categories")]
pub async fn list_categories(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<CategoryResponse>>> {
    let categories = state.monuments.categories().find_other_categories().await?;
    Ok(web::Json(
        categories.into_iter().map(CategoryResponse::from).collect(),
    ))
}

/// The province categories.
#[utoipa::path(
    get,
    path = "/api/monuments/provinces",
    responses((status = 200, description = "Provinces", body = [CategoryResponse])),
    tags = ["monuments"],
    operation_id = "listProvinces",
    security([])
)]
#[get("/monuments/provinces")]
pub async fn list_provinces(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<CategoryResponse>>> {
    let provinces = state
        .monuments
        .categories()
        .find_province_categories()
        .await?;
    Ok(web::Json(
        provinces.into_iter().map(CategoryResponse::from).collect(),
    ))
}

/// Fetch one monument.
#[utoipa::path(
    get,
    path = "/api/monuments/{id}",
    params(("id" = String, Path, description = "Monument identifier")),
    responses(
        (status = 200, description = "Monument", body = MonumentResponse),
        (status = 404, description = "No such monument", body = ErrorSchema)
    ),
    tags = ["monuments"],
    operation_id = "getMonument",
    security([])
)]
#[get("/monuments/{id}")]
pub async fn get_monument(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MonumentResponse>> {
    let id = monument_id(&path)?;
    Ok(web::Json(state.monuments.find(&id).await?.into()))
}

/// Current weather and forecast at the monument.
///
/// Weather failures are not errors: the body reports
/// `weatherAvailable: false` instead.
#[utoipa::path(
    get,
    path = "/api/monuments/{id}/weather",
    params(("id" = String, Path, description = "Monument identifier")),
    responses(
        (status = 200, description = "Weather, possibly unavailable", body = WeatherSummarySchema),
        (status = 404, description = "No such monument", body = ErrorSchema)
    ),
    tags = ["monuments"],
    operation_id = "getMonumentWeather",
    security([])
)]
#[get("/monuments/{id}/weather")]
pub async fn get_monument_weather(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<WeatherSummary>> {
    let id = monument_id(&path)?;
    let monument = state.monuments.find(&id).await?;
    Ok(web::Json(
        state.weather.summary_for(monument.coordinates).await,
    ))
}

/// Titles and URLs of the monument's images.
#[utoipa::path(
    get,
    path = "/api/monuments/{id}/images",
    params(("id" = String, Path, description = "Monument identifier")),
    responses(
        (status = 200, description = "Images", body = ImageListingSchema),
        (status = 404, description = "No such monument", body = ErrorSchema)
    ),
    tags = ["monuments"],
    operation_id = "getMonumentImages",
    security([])
)]
#[get("/monuments/{id}/images")]
pub async fn get_monument_images(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ImageListing>> {
    let id = monument_id(&path)?;
    state.monuments.find(&id).await?;
    Ok(web::Json(
        state.monuments.images().list_images_for_monument(&id).await?,
    ))
}

/// Record a monument owned by the caller.
#[utoipa::path(
    post,
    path = "/api/monuments",
    request_body(content_type = "multipart/form-data", description = "title, description, province, county, latitude, longitude, category[], imageUpload[]"),
    responses(
        (status = 201, description = "Created", body = MonumentResponse),
        (status = 400, description = "Invalid monument details", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema)
    ),
    tags = ["monuments"],
    operation_id = "createMonument",
    security(("BearerToken" = []))
)]
#[post("/monuments")]
pub async fn create_monument(
    state: web::Data<HttpState>,
    caller: ApiUser,
    multipart: Multipart,
) -> ApiResult<HttpResponse> {
    let mut form = read_monument_form(multipart).await?;
    let intent = form.upload_intent();
    let (draft, selection) = monument_draft_from_payload(form.payload)?;
    let monument = state
        .monuments
        .create(draft, selection, intent, Some(caller.user.id))
        .await?;
    Ok(HttpResponse::Created().json(MonumentResponse::from(monument)))
}

async fn edit_monument(
    state: &HttpState,
    raw_id: &str,
    multipart: Multipart,
) -> ApiResult<web::Json<MonumentResponse>> {
    let id = monument_id(raw_id)?;
    let mut form = read_monument_form(multipart).await?;
    let intent = form.upload_intent();
    let (draft, selection) = monument_draft_from_payload(form.payload)?;
    let monument = state
        .monuments
        .edit(&id, draft, selection, intent, form.images_cleared)
        .await?;
    Ok(web::Json(monument.into()))
}

/// Replace a monument's details, categories and optionally its images.
#[utoipa::path(
    put,
    path = "/api/monuments/{id}",
    params(("id" = String, Path, description = "Monument identifier")),
    request_body(content_type = "multipart/form-data", description = "Monument fields plus an optional imagesCleared flag"),
    responses(
        (status = 200, description = "Updated", body = MonumentResponse),
        (status = 400, description = "Invalid monument details", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 404, description = "No such monument", body = ErrorSchema)
    ),
    tags = ["monuments"],
    operation_id = "replaceMonument",
    security(("BearerToken" = []))
)]
#[put("/monuments/{id}")]
pub async fn replace_monument_put(
    state: web::Data<HttpState>,
    _caller: ApiUser,
    path: web::Path<String>,
    multipart: Multipart,
) -> ApiResult<web::Json<MonumentResponse>> {
    edit_monument(&state, &path, multipart).await
}

/// Same as `PUT`.
#[utoipa::path(
    patch,
    path = "/api/monuments/{id}",
    params(("id" = String, Path, description = "Monument identifier")),
    request_body(content_type = "multipart/form-data", description = "Monument fields plus an optional imagesCleared flag"),
    responses(
        (status = 200, description = "Updated", body = MonumentResponse),
        (status = 400, description = "Invalid monument details", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 404, description = "No such monument", body = ErrorSchema)
    ),
    tags = ["monuments"],
    operation_id = "updateMonument",
    security(("BearerToken" = []))
)]
#[patch("/monuments/{id}")]
pub async fn replace_monument_patch(
    state: web::Data<HttpState>,
    _caller: ApiUser,
    path: web::Path<String>,
    multipart: Multipart,
) -> ApiResult<web::Json<MonumentResponse>> {
    edit_monument(&state, &path, multipart).await
}

/// Delete a monument, its images and its category memberships.
#[utoipa::path(
    delete,
    path = "/api/monuments/{id}",
    params(("id" = String, Path, description = "Monument identifier")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 404, description = "No such monument", body = ErrorSchema)
    ),
    tags = ["monuments"],
    operation_id = "deleteMonument",
    security(("BearerToken" = []))
)]
#[delete("/monuments/{id}")]
pub async fn delete_monument(
    state: web::Data<HttpState>,
    _caller: ApiUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = monument_id(&path)?;
    state.monuments.delete(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete every monument.
#[utoipa::path(
    delete,
    path = "/api/monuments",
    responses(
        (status = 204, description = "All monuments deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema)
    ),
    tags = ["monuments"],
    operation_id = "deleteAllMonuments",
    security(("BearerToken" = []))
)]
#[delete("/monuments")]
pub async fn delete_all_monuments(
    state: web::Data<HttpState>,
    _caller: ApiUser,
) -> ApiResult<HttpResponse> {
    state.monuments.delete_all().await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register the monuments endpoints on an `/api` scope.
///
/// The fixed `categories` and `provinces` paths are registered ahead of
/// `{id}` so they are not captured as identifiers.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_categories)
        .service(list_provinces)
        .service(list_monuments)
        .service(create_monument)
        .service(delete_all_monuments)
        .service(get_monument_weather)
        .service(get_monument_images)
        .service(get_monument)
        .service(replace_monument_put)
        .service(replace_monument_patch)
        .service(delete_monument);
}

#[cfg(test)]
#[path = "monuments_tests.rs"]
mod tests;
