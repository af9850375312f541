//! Error responses for the page routes.
//!
//! Pages answer with HTML rather than the JSON error body. A missing or
//! stale session sends the browser to the login page.

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, ResponseError};
use tracing::{error, warn};

use crate::domain::Error;
use crate::inbound::http::error::{client_view, status_for};
use crate::inbound::web::views;

/// Failure while serving a page.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("login required")]
    SignInRequired,
    #[error(transparent)]
    Domain(#[from] Error),
}

/// Result alias for page handlers.
pub type PageResult<T> = Result<T, PageError>;

/// `303 See Other` to `location`.
pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.to_owned()))
        .finish()
}

impl ResponseError for PageError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::SignInRequired => StatusCode::SEE_OTHER,
            Self::Domain(error) => status_for(error.code()),
        }
    }

    fn error_response(&self) -> HttpResponse {
        let Self::Domain(domain) = self else {
            return see_other("/login");
        };
        let status = self.status_code();
        if status.is_server_error() {
            error!(
                code = ?domain.code(),
                trace_id = domain.trace_id().unwrap_or("-"),
                message = domain.message(),
                "page request failed"
            );
        } else {
            warn!(code = ?domain.code(), message = domain.message(), "page request rejected");
        }
        let shown = client_view(domain);
        HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(views::error_page(status, shown.message()).into_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use rstest::rstest;

    #[rstest]
    #[actix_web::test]
    async fn sign_in_required_redirects_to_login() {
        let response = PageError::SignInRequired.error_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response
                .headers()
                .get(header::LOCATION)
                .and_then(|value| value.to_str().ok()),
            Some("/login")
        );
    }

    #[rstest]
    #[case(Error::not_found("monument 42 not found"), StatusCode::NOT_FOUND, "monument 42 not found")]
    #[case(Error::internal("pool exhausted at db:5432"), StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")]
    #[actix_web::test]
    async fn domain_errors_render_html(
        #[case] error: Error,
        #[case] status: StatusCode,
        #[case] shown: &str,
    ) {
        let response = PageError::from(error).error_response();
        assert_eq!(response.status(), status);
        let body = to_bytes(response.into_body()).await.expect("body");
        let html = String::from_utf8(body.to_vec()).expect("utf-8");
        assert!(html.contains(shown));
        assert!(!html.contains("db:5432"));
    }
}
