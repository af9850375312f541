//! Account pages: landing, signup, login, settings and administration.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, post, web};
use chrono::Duration;
use serde::Deserialize;
use tracing::info;

use crate::domain::{AccountPayload, Error, User, UserId, account_details_from_payload};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{login_credentials, parse_path_id};
use crate::inbound::web::error::see_other;
use crate::inbound::web::{
    PageResult, SessionContext, form_rejection, render, signed_in_user, views,
};

/// How long after a settings change the settings page confirms it.
const UPDATE_NOTICE_SECS: i64 = 2;

/// Login form fields.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[get("/")]
pub async fn main_page() -> HttpResponse {
    render(StatusCode::OK, views::main_page())
}

#[get("/signup")]
pub async fn show_signup() -> HttpResponse {
    render(StatusCode::OK, views::signup_page(&[], None))
}

/// Create an account and sign it in.
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<AccountPayload>,
) -> PageResult<HttpResponse> {
    let created = match account_details_from_payload(form.into_inner()) {
        Ok(details) => state.accounts.signup(details).await,
        Err(error) => Err(error),
    };
    match created {
        Ok(user) => {
            session.persist_user(&user.id)?;
            Ok(see_other("/home"))
        }
        Err(error) => {
            let (status, messages) = form_rejection(error)?;
            Ok(render(status, views::signup_page(&messages, None)))
        }
    }
}

#[get("/login")]
pub async fn show_login() -> HttpResponse {
    render(StatusCode::OK, views::login_page(&[]))
}

/// Check credentials, stamp the login time and open a session.
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> PageResult<HttpResponse> {
    let outcome = match login_credentials(&form.email, &form.password) {
        Ok(credentials) => state.accounts.login(&credentials).await,
        Err(error) => Err(error),
    };
    match outcome {
        Ok(user) => {
            session.persist_user(&user.id)?;
            Ok(see_other("/report"))
        }
        Err(error) => {
            let (status, messages) = form_rejection(error)?;
            Ok(render(status, views::login_page(&messages)))
        }
    }
}

#[get("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    see_other("/")
}

fn recently_updated(state: &HttpState, user: &User) -> bool {
    user.last_updated
        .is_some_and(|at| state.clock.utc() - at <= Duration::seconds(UPDATE_NOTICE_SECS))
}

#[get("/settings")]
pub async fn show_settings(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> PageResult<HttpResponse> {
    let user = signed_in_user(&state, &session).await?;
    let just_updated = recently_updated(&state, &user);
    Ok(render(
        StatusCode::OK,
        views::settings_page(&user, &[], just_updated),
    ))
}

/// Replace the signed-in user's details.
#[post("/settings")]
pub async fn update_settings(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<AccountPayload>,
) -> PageResult<HttpResponse> {
    let user = signed_in_user(&state, &session).await?;
    let updated = match account_details_from_payload(form.into_inner()) {
        Ok(details) => state.accounts.update(&user.id, details).await,
        Err(error) => Err(error),
    };
    match updated {
        Ok(_) => Ok(see_other("/settings")),
        Err(error) => {
            let (status, messages) = form_rejection(error)?;
            Ok(render(status, views::settings_page(&user, &messages, false)))
        }
    }
}

/// Every account with the catalogue totals. Admins only.
#[get("/adminDashboard")]
pub async fn admin_dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> PageResult<HttpResponse> {
    let viewer = signed_in_user(&state, &session).await?;
    if !viewer.user_type.is_admin() {
        return Err(Error::forbidden("the admin dashboard is for administrators").into());
    }
    let users = state.accounts.list().await?;
    let counts = state.monuments.counts().await?;
    Ok(render(
        StatusCode::OK,
        views::admin_dashboard(&viewer, &users, counts),
    ))
}

/// Delete an account.
///
/// Users may delete only themselves and are then signed out. Admins may
/// delete anyone; deleting another account returns them to the dashboard.
#[post("/deleteAccount/{id}")]
pub async fn delete_account(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> PageResult<HttpResponse> {
    let viewer = signed_in_user(&state, &session).await?;
    let target: UserId = parse_path_id(&path, "user")?;
    let own_account = target == viewer.id;
    if !own_account && !viewer.user_type.is_admin() {
        return Err(Error::forbidden("only administrators can delete other accounts").into());
    }
    state.accounts.delete(&target).await?;
    info!(deleted = %target, by = %viewer.id, "account deleted from page");
    if own_account {
        Ok(see_other("/accountDeleted"))
    } else {
        Ok(see_other("/adminDashboard"))
    }
}

#[get("/accountDeleted")]
pub async fn account_deleted(session: SessionContext) -> HttpResponse {
    session.purge();
    render(
        StatusCode::OK,
        views::signup_page(&[], Some("Your account has been deleted.")),
    )
}

/// Register the account pages.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(main_page)
        .service(show_signup)
        .service(signup)
        .service(show_login)
        .service(login)
        .service(logout)
        .service(show_settings)
        .service(update_settings)
        .service(admin_dashboard)
        .service(delete_account)
        .service(account_deleted);
}

#[cfg(test)]
#[path = "accounts_tests.rs"]
mod tests;
