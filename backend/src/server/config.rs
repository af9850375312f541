//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::path::PathBuf;

use actix_web::cookie::Key;
use monuments::inbound::web::session_config::SessionSettings;
use monuments::outbound::persistence::DbPool;
use monuments::settings::AppSettings;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) settings: AppSettings,
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) public_dir: PathBuf,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration from loaded settings and the session
    /// cookie configuration.
    #[must_use]
    pub fn new(settings: AppSettings, session: SessionSettings, bind_addr: SocketAddr) -> Self {
        let public_dir = settings.public_dir();
        Self {
            settings,
            session,
            bind_addr,
            public_dir,
            db_pool: None,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// Without one the repositories are served from the in-memory store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    pub(crate) fn session_key(&self) -> &Key {
        &self.session.key
    }
}
