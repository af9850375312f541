//! Monument pages: the add form, the report and its filters, the detail
//! view and the edit form.

use actix_multipart::Multipart;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, post, web};

use crate::domain::{
    CategorySelection, Error, Monument, MonumentDraft, MonumentFilter, MonumentId, UploadIntent,
    User, monument_draft_from_payload,
};
use crate::inbound::http::multipart::read_monument_form;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_path_id;
use crate::inbound::web::error::see_other;
use crate::inbound::web::views::{self, ReportView};
use crate::inbound::web::{PageResult, SessionContext, form_rejection, render, signed_in_user};

fn monument_id(raw: &str) -> Result<MonumentId, Error> {
    parse_path_id(raw, "monument")
}

/// Read and validate a posted monument form.
async fn monument_submission(
    multipart: Multipart,
) -> Result<(MonumentDraft, CategorySelection, UploadIntent, bool), Error> {
    let mut form = read_monument_form(multipart).await?;
    let intent = form.upload_intent();
    let (draft, selection) = monument_draft_from_payload(form.payload)?;
    Ok((draft, selection, intent, form.images_cleared))
}

async fn other_category_titles(state: &HttpState) -> Result<Vec<String>, Error> {
    state.monuments.categories().list_other_category_titles().await
}

async fn render_home(
    state: &HttpState,
    viewer: &User,
    status: StatusCode,
    errors: &[String],
) -> PageResult<HttpResponse> {
    let categories = other_category_titles(state).await?;
    Ok(render(status, views::home_page(viewer, &categories, errors)))
}

async fn render_edit(
    state: &HttpState,
    viewer: &User,
    monument: &Monument,
    status: StatusCode,
    errors: &[String],
) -> PageResult<HttpResponse> {
    let categories = other_category_titles(state).await?;
    let selected = state
        .monuments
        .categories()
        .titles_for(&monument.categories)
        .await?;
    Ok(render(
        status,
        views::edit_page(viewer, monument, &categories, &selected, errors),
    ))
}

/// Monuments matching `filter`, rendered as the report.
async fn render_report(
    state: &HttpState,
    viewer: &User,
    heading: &str,
    filter: MonumentFilter,
) -> PageResult<HttpResponse> {
    let filtered = !matches!(filter, MonumentFilter::All);
    let monuments = state.monuments.filter(&filter).await?;
    let provinces = state
        .monuments
        .categories()
        .find_province_categories()
        .await?;
    let others = state.monuments.categories().find_other_categories().await?;
    let result_count = (filtered && !monuments.is_empty()).then_some(monuments.len());
    Ok(render(
        StatusCode::OK,
        views::report_page(
            viewer,
            &ReportView {
                heading,
                monuments: &monuments,
                provinces: &provinces,
                others: &others,
                result_count,
            },
        ),
    ))
}

/// Add-monument form.
#[get("/home")]
pub async fn home(state: web::Data<HttpState>, session: SessionContext) -> PageResult<HttpResponse> {
    let viewer = signed_in_user(&state, &session).await?;
    render_home(&state, &viewer, StatusCode::OK, &[]).await
}

/// Every monument.
#[get("/report")]
pub async fn report(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> PageResult<HttpResponse> {
    let viewer = signed_in_user(&state, &session).await?;
    render_report(&state, &viewer, "Monuments added to date", MonumentFilter::All).await
}

/// Monuments in one county.
#[get("/getCountyMonuments/{county}")]
pub async fn county_monuments(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> PageResult<HttpResponse> {
    let viewer = signed_in_user(&state, &session).await?;
    let county = path.into_inner();
    let heading = format!("Monuments in {county}");
    render_report(&state, &viewer, &heading, MonumentFilter::County(county)).await
}

/// Monuments with exactly this title.
#[get("/getMonumentByTitle/{title}")]
pub async fn monument_by_title(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> PageResult<HttpResponse> {
    let viewer = signed_in_user(&state, &session).await?;
    let title = path.into_inner();
    let heading = format!("Monuments titled {title}");
    render_report(&state, &viewer, &heading, MonumentFilter::Title(title)).await
}

/// Monuments whose title contains the term.
#[get("/searchMonuments/{title}")]
pub async fn search_monuments(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> PageResult<HttpResponse> {
    let viewer = signed_in_user(&state, &session).await?;
    let term = path.into_inner();
    let heading = format!("Search results for {term}");
    render_report(&state, &viewer, &heading, MonumentFilter::TitleContains(term)).await
}

/// One monument with its weather.
#[get("/viewMonument/{id}")]
pub async fn view_monument(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> PageResult<HttpResponse> {
    let viewer = signed_in_user(&state, &session).await?;
    let details = state.monuments.details(&monument_id(&path)?).await?;
    let weather = state
        .weather
        .summary_for(details.monument.coordinates)
        .await;
    Ok(render(
        StatusCode::OK,
        views::monument_page(&viewer, &details, &weather),
    ))
}

/// Edit form for one monument.
#[get("/editMonumentView/{id}")]
pub async fn edit_monument_view(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> PageResult<HttpResponse> {
    let viewer = signed_in_user(&state, &session).await?;
    let monument = state.monuments.find(&monument_id(&path)?).await?;
    render_edit(&state, &viewer, &monument, StatusCode::OK, &[]).await
}

/// Record a monument owned by the signed-in user.
#[post("/addMonument")]
pub async fn add_monument(
    state: web::Data<HttpState>,
    session: SessionContext,
    multipart: Multipart,
) -> PageResult<HttpResponse> {
    let viewer = signed_in_user(&state, &session).await?;
    let created = match monument_submission(multipart).await {
        Ok((draft, selection, intent, _)) => {
            state
                .monuments
                .create(draft, selection, intent, Some(viewer.id))
                .await
        }
        Err(error) => Err(error),
    };
    match created {
        Ok(_) => Ok(see_other("/report")),
        Err(error) => {
            let (status, messages) = form_rejection(error)?;
            render_home(&state, &viewer, status, &messages).await
        }
    }
}

/// Apply the edit form.
#[post("/editMonument/{id}")]
pub async fn edit_monument(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    multipart: Multipart,
) -> PageResult<HttpResponse> {
    let viewer = signed_in_user(&state, &session).await?;
    let id = monument_id(&path)?;
    let edited = match monument_submission(multipart).await {
        Ok((draft, selection, intent, images_cleared)) => {
            state
                .monuments
                .edit(&id, draft, selection, intent, images_cleared)
                .await
        }
        Err(error) => Err(error),
    };
    match edited {
        Ok(_) => Ok(see_other("/report")),
        Err(error) => {
            let (status, messages) = form_rejection(error)?;
            let monument = state.monuments.find(&id).await?;
            render_edit(&state, &viewer, &monument, status, &messages).await
        }
    }
}

#[post("/deleteMonument/{id}")]
pub async fn delete_monument(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> PageResult<HttpResponse> {
    signed_in_user(&state, &session).await?;
    state.monuments.delete(&monument_id(&path)?).await?;
    Ok(see_other("/report"))
}

/// Register the monument pages.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(home)
        .service(report)
        .service(county_monuments)
        .service(monument_by_title)
        .service(search_monuments)
        .service(view_monument)
        .service(edit_monument_view)
        .service(add_monument)
        .service(edit_monument)
        .service(delete_monument);
}

#[cfg(test)]
#[path = "monuments_tests.rs"]
mod tests;
