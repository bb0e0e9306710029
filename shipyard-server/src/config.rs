//! Server configuration loaded from the environment.

use std::str::FromStr;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_UI_ORIGINS: &str = "http://127.0.0.1:4200,http://localhost:4200";

/// Runtime settings for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Listen address.
    pub host: String,
    /// Listen port.
    pub port: u16,
    /// Origins allowed by CORS.
    pub allowed_origins: Vec<String>,
    /// PostgreSQL connection string; in-memory storage is used when absent.
    pub database_url: Option<String>,
}

impl ServerConfig {
    /// Build config from environment variables.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("SHIPYARD_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup("SHIPYARD_PORT") {
            Some(raw) => u16::from_str(raw.trim())
                .map_err(|_| format!("SHIPYARD_PORT must be a u16 number, got {raw:?}"))?,
            None => DEFAULT_PORT,
        };
        let origins = lookup("SHIPYARD_UI_ORIGINS").unwrap_or_else(|| DEFAULT_UI_ORIGINS.to_string());
        let allowed_origins = origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();
        let database_url = lookup("DATABASE_URL")
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        Ok(Self {
            host,
            port,
            allowed_origins,
            database_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::ServerConfig;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = ServerConfig::from_lookup(lookup(&[])).expect("config");
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(
            config.allowed_origins,
            vec!["http://127.0.0.1:4200", "http://localhost:4200"]
        );
        assert!(config.database_url.is_none());
    }

    #[test]
    fn reads_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("SHIPYARD_HOST", "0.0.0.0"),
            ("SHIPYARD_PORT", "9090"),
            ("SHIPYARD_UI_ORIGINS", " https://a.example , ,https://b.example"),
            ("DATABASE_URL", "postgres://localhost/shipyard"),
        ]))
        .expect("config");

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9090);
        assert_eq!(
            config.allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/shipyard")
        );
    }

    #[test]
    fn rejects_bad_port_and_blank_database_url() {
        assert!(ServerConfig::from_lookup(lookup(&[("SHIPYARD_PORT", "http")])).is_err());

        let config = ServerConfig::from_lookup(lookup(&[("DATABASE_URL", "  ")])).expect("config");
        assert!(config.database_url.is_none());
    }
}
