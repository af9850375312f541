//! A cookie-carrying client for page handler tests.

use actix_http::Request;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use serde::Serialize;

use crate::test_support::multipart::{Part, content_type, encode};
use crate::inbound::http::state::HttpState;
use crate::inbound::web::configure;
use crate::test_support::test_session_middleware;

/// What the browser saw.
#[derive(Debug)]
pub(crate) struct Page {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

/// Replays the session cookie across requests like a browser would.
pub(crate) struct Browser<S> {
    app: S,
    cookie: Option<Cookie<'static>>,
}

/// A browser talking to the page routes over `state`.
pub(crate) async fn browser(
    state: HttpState,
) -> Browser<impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>> {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(test_session_middleware())
            .configure(configure),
    )
    .await;
    Browser { app, cookie: None }
}

impl<S> Browser<S>
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    pub(crate) fn signed_in(&self) -> bool {
        self.cookie.is_some()
    }

    pub(crate) async fn send(&mut self, request: test::TestRequest) -> Page {
        let request = match &self.cookie {
            Some(cookie) => request.cookie(cookie.clone()),
            None => request,
        };
        let response = test::call_service(&self.app, request.to_request()).await;
        let fresh = response
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .map(Cookie::into_owned);
        if let Some(cookie) = fresh {
            self.cookie = (!cookie.value().is_empty()).then_some(cookie);
        }
        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = test::read_body(response).await;
        Page {
            status,
            location,
            body: String::from_utf8_lossy(&body).into_owned(),
        }
    }

    pub(crate) async fn get(&mut self, uri: &str) -> Page {
        self.send(test::TestRequest::get().uri(uri)).await
    }

    pub(crate) async fn post_form(&mut self, uri: &str, form: &impl Serialize) -> Page {
        self.send(test::TestRequest::post().uri(uri).set_form(form))
            .await
    }

    pub(crate) async fn post_multipart(&mut self, uri: &str, parts: &[Part<'_>]) -> Page {
        self.send(
            test::TestRequest::post()
                .uri(uri)
                .insert_header(("content-type", content_type()))
                .set_payload(encode(parts)),
        )
        .await
    }

    /// Sign up through the page and keep the session.
    pub(crate) async fn sign_up(&mut self, first_name: &str, email: &str, user_type: &str) -> Page {
        self.post_form(
            "/signup",
            &[
                ("firstName", first_name),
                ("lastName", "Simpson"),
                ("email", email),
                ("password", "secret"),
                ("userType", user_type),
            ],
        )
        .await
    }
}
