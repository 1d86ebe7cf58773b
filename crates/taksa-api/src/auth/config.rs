// Authentication configuration loaded from environment variables.
// Decision: A random signing secret is generated only in dev mode (in-memory storage)
// Decision: Only the HMAC family is accepted; the secret is symmetric

use anyhow::{bail, Result};
use jsonwebtoken::Algorithm;
use std::time::Duration;

/// Default access token lifetime (15 minutes)
pub const DEFAULT_ACCESS_TOKEN_LIFETIME: Duration = Duration::from_secs(15 * 60);

/// Default minimum password length
pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 8;

/// Hard upper bound on password length
pub const MAX_PASSWORD_LENGTH: usize = 50;

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for signing JWTs
    pub secret: String,
    /// Signing algorithm (HS256, HS384 or HS512)
    pub algorithm: Algorithm,
    /// Access token lifetime
    pub access_token_lifetime: Duration,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            algorithm: Algorithm::HS256,
            access_token_lifetime: DEFAULT_ACCESS_TOKEN_LIFETIME,
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt: JwtConfig,
    /// Minimum accepted password length at registration
    pub min_password_length: usize,
}

impl AuthConfig {
    pub fn new(jwt: JwtConfig) -> Self {
        Self {
            jwt,
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
        }
    }

    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `JWT_SECRET_KEY`: signing secret (required unless `dev_mode`)
    /// - `ALGORITHM`: HS256 (default), HS384 or HS512
    /// - `ACCESS_TOKEN_EXPIRE_MINUTES`: token lifetime in minutes (default: 15)
    /// - `MIN_PASSWORD_LENGTH`: minimum password length (default: 8)
    pub fn from_env(dev_mode: bool) -> Result<Self> {
        let secret = match std::env::var("JWT_SECRET_KEY").ok().filter(|s| !s.is_empty()) {
            Some(secret) => secret,
            None if dev_mode => {
                tracing::warn!("JWT_SECRET_KEY not set, using a random secret for this process");
                generate_secret()
            }
            None => bail!("JWT_SECRET_KEY environment variable required"),
        };

        let algorithm = match std::env::var("ALGORITHM") {
            Ok(value) => parse_algorithm(&value)?,
            Err(_) => Algorithm::HS256,
        };

        let access_token_lifetime = std::env::var("ACCESS_TOKEN_EXPIRE_MINUTES")
            .ok()
            .and_then(|s| parse_lifetime_minutes(&s))
            .unwrap_or(DEFAULT_ACCESS_TOKEN_LIFETIME);

        let min_password_length = std::env::var("MIN_PASSWORD_LENGTH")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .filter(|len| (1..=MAX_PASSWORD_LENGTH).contains(len))
            .unwrap_or(DEFAULT_MIN_PASSWORD_LENGTH);

        Ok(Self {
            jwt: JwtConfig {
                secret,
                algorithm,
                access_token_lifetime,
            },
            min_password_length,
        })
    }
}

/// Positive whole minutes; zero, garbage and overflow are rejected
fn parse_lifetime_minutes(value: &str) -> Option<Duration> {
    value
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|minutes| *minutes > 0)
        .and_then(|minutes| minutes.checked_mul(60))
        .map(Duration::from_secs)
}

/// Parse an HMAC algorithm name
pub fn parse_algorithm(value: &str) -> Result<Algorithm> {
    match value.trim().to_ascii_uppercase().as_str() {
        "HS256" => Ok(Algorithm::HS256),
        "HS384" => Ok(Algorithm::HS384),
        "HS512" => Ok(Algorithm::HS512),
        other => bail!("Unsupported ALGORITHM {other:?}, expected HS256, HS384 or HS512"),
    }
}

fn generate_secret() -> String {
    use rand::Rng;
    let bytes: [u8; 32] = rand::thread_rng().gen();
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_algorithm() {
        assert_eq!(parse_algorithm("HS256").unwrap(), Algorithm::HS256);
        assert_eq!(parse_algorithm("hs384").unwrap(), Algorithm::HS384);
        assert_eq!(parse_algorithm(" HS512 ").unwrap(), Algorithm::HS512);
    }

    #[test]
    fn test_asymmetric_algorithms_rejected() {
        assert!(parse_algorithm("RS256").is_err());
        assert!(parse_algorithm("none").is_err());
    }

    #[test]
    fn test_generated_secrets_are_unique() {
        let a = generate_secret();
        let b = generate_secret();
        assert_eq!(a.len(), 64);
        assert_ne!(a, b);
    }

    #[test]
    fn test_jwt_config_defaults() {
        let config = JwtConfig::new("secret");
        assert_eq!(config.algorithm, Algorithm::HS256);
        assert_eq!(config.access_token_lifetime, Duration::from_secs(900));
    }

    #[test]
    fn test_lifetime_minutes() {
        assert_eq!(parse_lifetime_minutes("30"), Some(Duration::from_secs(1800)));
        assert_eq!(parse_lifetime_minutes("0"), None);
        assert_eq!(parse_lifetime_minutes("soon"), None);
        // u64::MAX minutes does not fit in seconds
        assert_eq!(parse_lifetime_minutes(&u64::MAX.to_string()), None);
    }
}
