// Server configuration loaded from environment variables
// Decision: No database settings means in-memory dev mode
// Decision: DATABASE_URL wins over the DB_* parts

use axum::http::HeaderValue;

/// Default route prefix for every API endpoint
pub const DEFAULT_API_PREFIX: &str = "/api/taksa";

/// Default listen address
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

const DEFAULT_DB_PORT: &str = "5432";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// PostgreSQL URL; `None` selects the in-memory backend
    pub database_url: Option<String>,
    pub api_prefix: String,
    pub cors_origins: Vec<HeaderValue>,
    pub bind_addr: String,
    /// Seed drivers and houses into empty PostgreSQL tables
    pub seed_reference_data: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `DATABASE_URL`, or `DB_HOST`/`DB_PORT`/`DB_NAME`/`DB_USER`/`DB_PASS`
    /// - `API_PREFIX`: route prefix (default: /api/taksa, empty disables it)
    /// - `CORS_ALLOWED_ORIGINS`: comma-separated origins
    /// - `BIND_ADDR`: listen address (default: 0.0.0.0:8000)
    /// - `SEED_REFERENCE_DATA`: "true" or "1" to seed PostgreSQL
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let database_url = var("DATABASE_URL")
            .filter(|s| !s.is_empty())
            .or_else(|| database_url_from_parts(&var));

        let api_prefix = var("API_PREFIX")
            .map(|p| normalize_prefix(&p))
            .unwrap_or_else(|| DEFAULT_API_PREFIX.to_string());

        let cors_origins = var("CORS_ALLOWED_ORIGINS")
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.split(',')
                    .filter_map(|s| s.trim().parse().ok())
                    .collect()
            })
            .unwrap_or_default();

        let seed_reference_data = var("SEED_REFERENCE_DATA")
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "true" | "1"))
            .unwrap_or(false);

        Self {
            database_url,
            api_prefix,
            cors_origins,
            bind_addr: var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            seed_reference_data,
        }
    }
}

/// "" stays empty; anything else gets one leading slash and no trailing one
fn normalize_prefix(prefix: &str) -> String {
    match prefix.trim().trim_matches('/') {
        "" => String::new(),
        p => format!("/{p}"),
    }
}

fn database_url_from_parts(var: &impl Fn(&str) -> Option<String>) -> Option<String> {
    let host = var("DB_HOST")?;
    let name = var("DB_NAME")?;
    let user = var("DB_USER")?;
    let pass = var("DB_PASS")?;
    let port = var("DB_PORT").unwrap_or_else(|| DEFAULT_DB_PORT.to_string());
    Some(format!("postgres://{user}:{pass}@{host}:{port}/{name}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]);
        assert!(config.database_url.is_none());
        assert_eq!(config.api_prefix, "/api/taksa");
        assert_eq!(config.bind_addr, "0.0.0.0:8000");
        assert!(config.cors_origins.is_empty());
        assert!(!config.seed_reference_data);
    }

    #[test]
    fn test_database_url_from_parts() {
        let config = config(&[
            ("DB_HOST", "db"),
            ("DB_NAME", "taksa"),
            ("DB_USER", "rider"),
            ("DB_PASS", "secret"),
        ]);
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://rider:secret@db:5432/taksa")
        );
    }

    #[test]
    fn test_incomplete_parts_mean_dev_mode() {
        let config = config(&[("DB_HOST", "db"), ("DB_NAME", "taksa")]);
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_database_url_wins() {
        let config = config(&[
            ("DATABASE_URL", "postgres://a:b@c/d"),
            ("DB_HOST", "db"),
            ("DB_NAME", "taksa"),
            ("DB_USER", "rider"),
            ("DB_PASS", "secret"),
        ]);
        assert_eq!(config.database_url.as_deref(), Some("postgres://a:b@c/d"));
    }

    #[test]
    fn test_prefix_cors_and_seed() {
        let config = config(&[
            ("API_PREFIX", "v2/"),
            ("CORS_ALLOWED_ORIGINS", "https://a.example, https://b.example"),
            ("SEED_REFERENCE_DATA", "TRUE"),
        ]);
        assert_eq!(config.api_prefix, "/v2");
        assert_eq!(config.cors_origins.len(), 2);
        assert!(config.seed_reference_data);
    }

    #[test]
    fn test_empty_prefix_allowed() {
        assert_eq!(config(&[("API_PREFIX", "")]).api_prefix, "");
    }
}
