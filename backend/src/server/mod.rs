//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_files::Files;
use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::Key;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use std::path::PathBuf;
use tracing::info;

use monuments::Trace;
#[cfg(debug_assertions)]
use monuments::doc::ApiDoc;
use monuments::inbound::http::health::{HealthState, live, ready};
use monuments::inbound::http::state::HttpState;
use monuments::inbound::web::session_config::SessionSettings;
use monuments::inbound::{http, web as pages};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    session: SessionCookie,
    public_dir: PathBuf,
}

#[derive(Clone, Copy)]
struct SessionCookie {
    secure: bool,
    same_site: actix_web::cookie::SameSite,
}

impl From<&SessionSettings> for SessionCookie {
    fn from(settings: &SessionSettings) -> Self {
        Self {
            secure: settings.cookie_secure,
            same_site: settings.same_site,
        }
    }
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        session,
        public_dir,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(session.secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(session.same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let api = web::scope("/api").configure(http::configure);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(session)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // Static files come last so they never shadow a page route.
    app.configure(pages::configure)
        .service(Files::new("/", public_dir))
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// The province categories are seeded before the listener starts; the
/// readiness probe flips once that succeeds.
///
/// # Errors
/// Propagates [`std::io::Error`] when an adapter cannot be built, seeding
/// fails, or binding the socket fails.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config)?;
    http_state
        .monuments
        .categories()
        .ensure_provinces()
        .await
        .map_err(|err| std::io::Error::other(format!("seeding provinces failed: {err}")))?;
    info!("province categories seeded");

    let session = SessionCookie::from(&config.session);
    let ServerConfig {
        session: SessionSettings { key, .. },
        bind_addr,
        public_dir,
        ..
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            session,
            public_dir: public_dir.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    info!(%bind_addr, "listening");
    Ok(server)
}
