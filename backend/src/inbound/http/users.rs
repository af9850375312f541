//! Users API handlers.
//!
//! ```text
//! GET    /api/users
//! POST   /api/users {"firstName":"Homer","lastName":"Simpson","email":"homer@simpson.com","password":"secret"}
//! POST   /api/users/authenticate {"email":"homer@simpson.com","password":"secret"}
//! DELETE /api/users/{id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{AccountPayload, User, UserId, account_details_from_payload};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{login_credentials, parse_path_id};

/// Account as returned by the API. The password hash never leaves the server.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(value_type = String, format = Uuid)]
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[schema(example = "User")]
    pub user_type: String,
    pub last_login: Option<DateTime<Utc>>,
    pub last_updated: Option<DateTime<Utc>>,
    pub record_count: u32,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            user_type: user.user_type.as_str().to_owned(),
            last_login: user.last_login,
            last_updated: user.last_updated,
            record_count: user.record_count,
        }
    }
}

/// Body for `POST /api/users` and `PUT`/`PATCH /api/users/{id}`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[schema(example = "User")]
    pub user_type: Option<String>,
}

impl From<AccountRequest> for AccountPayload {
    fn from(request: AccountRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            password: request.password,
            user_type: request.user_type,
        }
    }
}

/// Body for `POST /api/users/authenticate`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct AuthenticateRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Successful authentication.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TokenResponse {
    pub success: bool,
    pub token: String,
}

/// Exchange credentials for a bearer token.
#[utoipa::path(
    post,
    path = "/api/users/authenticate",
    request_body = AuthenticateRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Blank email or password", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "authenticate",
    security([])
)]
#[post("/users/authenticate")]
pub async fn authenticate(
    state: web::Data<HttpState>,
    payload: web::Json<AuthenticateRequest>,
) -> ApiResult<web::Json<TokenResponse>> {
    let credentials = login_credentials(&payload.email, &payload.password)?;
    let user = state.accounts.authenticate(&credentials).await?;
    let token = state.tokens.issue(&user)?;
    info!(user_id = %user.id, "api token issued");
    Ok(web::Json(TokenResponse {
        success: true,
        token,
    }))
}

/// List every account.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use monuments::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users", body = [UserResponse]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers",
    security([])
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let users = state.accounts.list().await?;
    Ok(web::Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Fetch one account.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 404, description = "No such user", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser",
    security([])
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    let id: UserId = parse_path_id(&path, "user")?;
    Ok(web::Json(state.accounts.find(&id).await?.into()))
}

/// Register an account.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = AccountRequest,
    responses(
        (status = 201, description = "Created", body = UserResponse),
        (status = 400, description = "Invalid account details", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser",
    security([])
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<AccountRequest>,
) -> ApiResult<HttpResponse> {
    let details = account_details_from_payload(payload.into_inner().into())?;
    let user = state.accounts.signup(details).await?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

async fn replace_user(
    state: &HttpState,
    raw_id: &str,
    payload: AccountRequest,
) -> ApiResult<web::Json<UserResponse>> {
    let id: UserId = parse_path_id(raw_id, "user")?;
    let details = account_details_from_payload(payload.into())?;
    Ok(web::Json(state.accounts.update(&id, details).await?.into()))
}

/// Replace an account's details.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    request_body = AccountRequest,
    responses(
        (status = 200, description = "Updated", body = UserResponse),
        (status = 400, description = "Invalid account details", body = ErrorSchema),
        (status = 404, description = "No such user", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "replaceUser",
    security([])
)]
#[put("/users/{id}")]
pub async fn replace_user_put(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<AccountRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    replace_user(&state, &path, payload.into_inner()).await
}

/// Same as `PUT`: the full set of account fields is required.
#[utoipa::path(
    patch,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    request_body = AccountRequest,
    responses(
        (status = 200, description = "Updated", body = UserResponse),
        (status = 400, description = "Invalid account details", body = ErrorSchema),
        (status = 404, description = "No such user", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser",
    security([])
)]
#[patch("/users/{id}")]
pub async fn replace_user_patch(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<AccountRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    replace_user(&state, &path, payload.into_inner()).await
}

/// Remove one account.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "No such user", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser",
    security([])
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id: UserId = parse_path_id(&path, "user")?;
    state.accounts.delete(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Remove every account.
#[utoipa::path(
    delete,
    path = "/api/users",
    responses((status = 204, description = "All users deleted")),
    tags = ["users"],
    operation_id = "deleteAllUsers",
    security([])
)]
#[delete("/users")]
pub async fn delete_all_users(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    state.accounts.delete_all().await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register the users endpoints on an `/api` scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(authenticate)
        .service(list_users)
        .service(get_user)
        .service(create_user)
        .service(replace_user_put)
        .service(replace_user_patch)
        .service(delete_user)
        .service(delete_all_users);
}
