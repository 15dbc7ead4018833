//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Dashboard server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// SQLite database URL.
    pub database_url: String,
    /// Download service base URL.
    pub download_url: String,
    /// Directory holding the built dashboard SPA.
    pub static_dir: PathBuf,
    /// Secret for signing login tokens.
    pub jwt_secret: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `DASHBOARD_ADDR` | Server bind address | `0.0.0.0:$PORT` |
    /// | `PORT` | Port used when `DASHBOARD_ADDR` is unset | `5000` |
    /// | `SQLITE_PATH` | SQLite database URL | `sqlite:rospin.db?mode=rwc` |
    /// | `DL_API_URL` | Download service URL | `http://download:8010` |
    /// | `DOWNLOAD_BASE_URL` | Fallback for `DL_API_URL` | |
    /// | `STATIC_DIR` | SPA assets directory | `static` |
    /// | `JWT_SECRET` | Login token signing secret | development secret |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let addr = match var("DASHBOARD_ADDR") {
            Some(addr) => addr.parse().map_err(|_| ConfigError::InvalidAddr(addr))?,
            None => {
                let port: u16 = match var("PORT") {
                    Some(port) => port.parse().map_err(|_| ConfigError::InvalidPort(port))?,
                    None => 5000,
                };
                SocketAddr::from(([0, 0, 0, 0], port))
            }
        };

        let database_url =
            var("SQLITE_PATH").unwrap_or_else(|| "sqlite:rospin.db?mode=rwc".to_string());

        let download_url = var("DL_API_URL")
            .or_else(|| var("DOWNLOAD_BASE_URL"))
            .unwrap_or_else(|| "http://download:8010".to_string());

        let static_dir = PathBuf::from(var("STATIC_DIR").unwrap_or_else(|| "static".to_string()));

        Ok(Self {
            addr,
            database_url,
            download_url,
            static_dir,
            jwt_secret: var("JWT_SECRET"),
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid DASHBOARD_ADDR format: {0}")]
    InvalidAddr(String),

    #[error("Invalid PORT: {0}")]
    InvalidPort(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.addr, "0.0.0.0:5000".parse().unwrap());
        assert_eq!(config.database_url, "sqlite:rospin.db?mode=rwc");
        assert_eq!(config.download_url, "http://download:8010");
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert!(config.jwt_secret.is_none());

        let config = load(&[("JWT_SECRET", "s3cret")]).unwrap();
        assert_eq!(config.jwt_secret.as_deref(), Some("s3cret"));
    }

    #[test]
    fn test_port_and_addr() {
        let config = load(&[("PORT", "8080")]).unwrap();
        assert_eq!(config.addr.port(), 8080);

        let config = load(&[("PORT", "8080"), ("DASHBOARD_ADDR", "127.0.0.1:9000")]).unwrap();
        assert_eq!(config.addr, "127.0.0.1:9000".parse().unwrap());

        assert!(matches!(load(&[("PORT", "http")]), Err(ConfigError::InvalidPort(_))));
        assert!(matches!(
            load(&[("DASHBOARD_ADDR", "localhost")]),
            Err(ConfigError::InvalidAddr(_))
        ));
    }

    #[test]
    fn test_download_url_precedence() {
        let config = load(&[("DOWNLOAD_BASE_URL", "http://localhost:8010")]).unwrap();
        assert_eq!(config.download_url, "http://localhost:8010");

        let config = load(&[
            ("DL_API_URL", "http://dl:9999"),
            ("DOWNLOAD_BASE_URL", "http://localhost:8010"),
        ])
        .unwrap();
        assert_eq!(config.download_url, "http://dl:9999");

        // blank values fall through to the next source
        let config = load(&[("DL_API_URL", " "), ("DOWNLOAD_BASE_URL", "http://b")]).unwrap();
        assert_eq!(config.download_url, "http://b");
    }
}
