//! Application settings loaded via OrthoConfig.
//!
//! Values come from `MONUMENTS_*` environment variables, command-line flags
//! or a configuration file. Every field is optional; accessors supply the
//! defaults used for local development.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::asset_host::DEFAULT_ASSET_HOST_ORIGIN;
use crate::outbound::jwt::DEFAULT_TOKEN_TTL_SECS;
use crate::outbound::weather::DEFAULT_WEATHER_ENDPOINT;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_PUBLIC_DIR: &str = "./public";
const DEFAULT_CLOUD_NAME: &str = "monuments";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Server, persistence and third-party settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MONUMENTS")]
pub struct AppSettings {
    /// Socket address to bind, for example `127.0.0.1:8080`.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL. The in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Directory served for static assets.
    pub public_dir: Option<PathBuf>,
    /// Secret used to sign API tokens.
    pub jwt_secret: Option<String>,
    /// Lifetime of issued API tokens in seconds.
    pub jwt_ttl_secs: Option<i64>,
    /// Asset host account name.
    pub cloud_name: Option<String>,
    pub cloud_api_key: Option<String>,
    pub cloud_api_secret: Option<String>,
    /// Asset host API origin.
    pub asset_host_origin: Option<String>,
    /// Weather API key. Lookups report "unavailable" when absent.
    pub weather_api_key: Option<String>,
    pub weather_endpoint: Option<String>,
    /// Timeout applied to outbound HTTP calls, in seconds.
    pub http_timeout_secs: Option<u64>,
}

impl AppSettings {
    /// Parsed bind address.
    ///
    /// # Errors
    ///
    /// Returns an error when the configured address is not `host:port`.
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR).parse()
    }

    pub fn public_dir(&self) -> PathBuf {
        self.public_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PUBLIC_DIR))
    }

    pub fn jwt_ttl_secs(&self) -> i64 {
        self.jwt_ttl_secs
            .filter(|ttl| *ttl > 0)
            .unwrap_or(DEFAULT_TOKEN_TTL_SECS)
    }

    pub fn cloud_name(&self) -> &str {
        self.cloud_name.as_deref().unwrap_or(DEFAULT_CLOUD_NAME)
    }

    pub fn asset_host_origin(&self) -> &str {
        self.asset_host_origin
            .as_deref()
            .unwrap_or(DEFAULT_ASSET_HOST_ORIGIN)
    }

    pub fn weather_endpoint(&self) -> &str {
        self.weather_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_WEATHER_ENDPOINT)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs.unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS))
    }

    /// Asset host credentials, present only when both key and secret are set.
    pub fn asset_host_credentials(&self) -> Option<(&str, &str)> {
        match (&self.cloud_api_key, &self.cloud_api_secret) {
            (Some(key), Some(secret)) => Some((key.as_str(), secret.as_str())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing and defaults.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 6] = [
        "MONUMENTS_BIND_ADDR",
        "MONUMENTS_DATABASE_URL",
        "MONUMENTS_JWT_TTL_SECS",
        "MONUMENTS_CLOUD_NAME",
        "MONUMENTS_CLOUD_API_KEY",
        "MONUMENTS_CLOUD_API_SECRET",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("monuments")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default address parses"),
            SocketAddr::from(([0, 0, 0, 0], 8080))
        );
        assert!(settings.database_url.is_none());
        assert_eq!(settings.jwt_ttl_secs(), DEFAULT_TOKEN_TTL_SECS);
        assert_eq!(settings.cloud_name(), DEFAULT_CLOUD_NAME);
        assert_eq!(settings.public_dir(), PathBuf::from(DEFAULT_PUBLIC_DIR));
        assert!(settings.asset_host_credentials().is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("MONUMENTS_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "MONUMENTS_DATABASE_URL",
                Some("postgres://localhost/monuments".to_owned()),
            ),
            ("MONUMENTS_JWT_TTL_SECS", Some("120".to_owned())),
            ("MONUMENTS_CLOUD_NAME", Some("heritage".to_owned())),
            ("MONUMENTS_CLOUD_API_KEY", Some("key".to_owned())),
            ("MONUMENTS_CLOUD_API_SECRET", Some("secret".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("address parses"),
            SocketAddr::from(([127, 0, 0, 1], 9000))
        );
        assert_eq!(
            settings.database_url.as_deref(),
            Some("postgres://localhost/monuments")
        );
        assert_eq!(settings.jwt_ttl_secs(), 120);
        assert_eq!(settings.cloud_name(), "heritage");
        assert_eq!(settings.asset_host_credentials(), Some(("key", "secret")));
    }

    #[rstest]
    fn non_positive_token_lifetime_falls_back_to_default() {
        let _guard = lock_env([("MONUMENTS_JWT_TTL_SECS", Some("0".to_owned()))]);

        assert_eq!(load_from_empty_args().jwt_ttl_secs(), DEFAULT_TOKEN_TTL_SECS);
    }
}
