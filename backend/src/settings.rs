//! Service configuration loaded via OrthoConfig.
//!
//! Values are layered from configuration files, `CATALOGUE_*` environment
//! variables and command-line flags.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::PoolConfig;

const DEFAULT_HOST: &str = "0.0.0.0";

/// Configuration values for the catalogue server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CATALOGUE")]
pub struct CatalogueSettings {
    /// Interface to bind. Defaults to every interface.
    pub host: Option<String>,
    /// TCP port to bind.
    #[ortho_config(default = 8080)]
    pub port: u16,
    /// PostgreSQL URL. Without one the in-memory store is used.
    pub database_url: Option<String>,
    /// Maximum number of pooled connections.
    #[ortho_config(default = 10)]
    pub pool_max_size: u32,
    /// Idle connections the pool keeps open.
    #[ortho_config(default = 2)]
    pub pool_min_idle: u32,
    /// Seconds to wait for a pooled connection.
    #[ortho_config(default = 30)]
    pub pool_timeout_secs: u64,
    /// Cache assembled course details in process.
    #[ortho_config(default = true)]
    pub cache_enabled: bool,
    /// Maximum number of cached course details.
    #[ortho_config(default = 1024)]
    pub cache_capacity: usize,
}

/// Raised when the configured host and port do not form a socket address.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid bind address {address}: {message}")]
pub struct BindAddrError {
    pub address: String,
    pub message: String,
}

impl CatalogueSettings {
    /// Return the configured host, falling back to every interface.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Socket address the HTTP server binds to.
    pub fn bind_addr(&self) -> Result<SocketAddr, BindAddrError> {
        let address = format!("{}:{}", self.host(), self.port);
        address.parse().map_err(|err: std::net::AddrParseError| BindAddrError {
            message: err.to_string(),
            address,
        })
    }

    /// Pool configuration for the configured database, if any.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        self.database_url.as_ref().map(|url| {
            PoolConfig::new(url.clone())
                .with_max_size(self.pool_max_size)
                .with_min_idle(Some(self.pool_min_idle))
                .with_connection_timeout(Duration::from_secs(self.pool_timeout_secs))
        })
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for catalogue configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 8] = [
        "CATALOGUE_HOST",
        "CATALOGUE_PORT",
        "CATALOGUE_DATABASE_URL",
        "CATALOGUE_POOL_MAX_SIZE",
        "CATALOGUE_POOL_MIN_IDLE",
        "CATALOGUE_POOL_TIMEOUT_SECS",
        "CATALOGUE_CACHE_ENABLED",
        "CATALOGUE_CACHE_CAPACITY",
    ];

    fn load_from_empty_args() -> CatalogueSettings {
        CatalogueSettings::load_from_iter([OsString::from("backend")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(settings.host(), DEFAULT_HOST);
        assert_eq!(settings.port, 8080);
        assert!(settings.database_url.is_none());
        assert!(settings.pool_config().is_none());
        assert_eq!(settings.pool_max_size, 10);
        assert_eq!(settings.pool_min_idle, 2);
        assert_eq!(settings.pool_timeout_secs, 30);
        assert!(settings.cache_enabled);
        assert_eq!(settings.cache_capacity, 1024);
        assert_eq!(
            settings.bind_addr().expect("default address parses"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("literal address")
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("CATALOGUE_HOST", Some("127.0.0.1".to_owned())),
            ("CATALOGUE_PORT", Some("9090".to_owned())),
            (
                "CATALOGUE_DATABASE_URL",
                Some("postgres://localhost/catalogue".to_owned()),
            ),
            ("CATALOGUE_POOL_MAX_SIZE", Some("4".to_owned())),
            ("CATALOGUE_POOL_MIN_IDLE", Some("1".to_owned())),
            ("CATALOGUE_POOL_TIMEOUT_SECS", Some("5".to_owned())),
            ("CATALOGUE_CACHE_ENABLED", Some("false".to_owned())),
            ("CATALOGUE_CACHE_CAPACITY", Some("16".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("address parses").to_string(),
            "127.0.0.1:9090"
        );
        assert!(!settings.cache_enabled);
        assert_eq!(settings.cache_capacity, 16);

        let pool = settings.pool_config().expect("database configured");
        assert_eq!(pool.database_url(), "postgres://localhost/catalogue");
        assert_eq!(pool.max_size(), 4);
        assert_eq!(pool.min_idle(), Some(1));
        assert_eq!(pool.connection_timeout(), Duration::from_secs(5));
    }

    #[rstest]
    fn unparseable_host_is_reported() {
        let _guard = lock_env([
            ("CATALOGUE_HOST", Some("not a host".to_owned())),
            ("CATALOGUE_PORT", None::<String>),
        ]);

        let err = load_from_empty_args()
            .bind_addr()
            .expect_err("host should not parse");
        assert_eq!(err.address, "not a host:8080");
    }
}
