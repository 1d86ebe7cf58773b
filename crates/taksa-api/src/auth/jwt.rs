// JWT token codec for access tokens
// Decision: Claims are only {sub, exp}; nothing about the user is cached in the token
// Decision: Expiry is checked against an injectable clock with zero leeway

use anyhow::{Context, Result};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use super::config::JwtConfig;

/// Source of the current time in Unix seconds
pub trait Clock: Send + Sync {
    fn now(&self) -> i64;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// Clock that only moves when told to. Used by tests.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<i64>,
}

impl ManualClock {
    pub fn new(now: i64) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock() += by.as_secs() as i64;
    }

    pub fn set(&self, now: i64) {
        *self.now.lock() = now;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> i64 {
        *self.now.lock()
    }
}

/// JWT claims carried by access tokens
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Any reason a token cannot be trusted: malformed, bad signature,
/// unexpected algorithm or expired. Callers never learn which.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid token")]
pub struct InvalidToken;

/// Issues and verifies signed access tokens
#[derive(Clone)]
pub struct TokenCodec {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    clock: Arc<dyn Clock>,
}

impl TokenCodec {
    pub fn new(config: JwtConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: JwtConfig, clock: Arc<dyn Clock>) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
            clock,
        }
    }

    pub fn access_token_lifetime(&self) -> Duration {
        self.config.access_token_lifetime
    }

    /// Sign a token for `subject` that expires `lifetime` from now
    pub fn issue(&self, subject: &str, lifetime: Duration) -> Result<String> {
        let lifetime = i64::try_from(lifetime.as_secs()).context("Token lifetime too large")?;
        let exp = self
            .clock
            .now()
            .checked_add(lifetime)
            .context("Token expiry overflows")?;

        let claims = TokenClaims {
            sub: subject.to_string(),
            exp,
        };

        encode(
            &Header::new(self.config.algorithm),
            &claims,
            &self.encoding_key,
        )
        .context("Failed to encode access token")
    }

    /// Issue a token with the configured access token lifetime
    pub fn issue_access_token(&self, subject: &str) -> Result<String> {
        self.issue(subject, self.config.access_token_lifetime)
    }

    /// Verify signature, algorithm and expiry, returning the claims
    pub fn parse(&self, token: &str) -> Result<TokenClaims, InvalidToken> {
        let mut validation = Validation::new(self.config.algorithm);
        // Expiry is checked below against our own clock
        validation.validate_exp = false;
        validation.leeway = 0;

        let claims = decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| {
                tracing::debug!("JWT validation failed: {}", e);
                InvalidToken
            })?
            .claims;

        if claims.exp <= self.clock.now() {
            tracing::debug!("JWT expired");
            return Err(InvalidToken);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::Algorithm;

    const START: i64 = 1_700_000_000;

    fn codec_at(clock: Arc<ManualClock>) -> TokenCodec {
        TokenCodec::with_clock(JwtConfig::new("test-secret-key"), clock)
    }

    #[test]
    fn test_issue_and_parse() {
        let clock = Arc::new(ManualClock::new(START));
        let codec = codec_at(clock);

        let token = codec.issue("42", Duration::from_secs(60)).unwrap();
        let claims = codec.parse(&token).unwrap();

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.exp, START + 60);
    }

    #[test]
    fn test_token_expires_after_lifetime() {
        let clock = Arc::new(ManualClock::new(START));
        let codec = codec_at(clock.clone());
        let token = codec.issue("42", Duration::from_secs(15 * 60)).unwrap();

        clock.advance(Duration::from_secs(15 * 60 - 1));
        assert!(codec.parse(&token).is_ok());

        // exp == now counts as expired
        clock.advance(Duration::from_secs(1));
        assert_eq!(codec.parse(&token), Err(InvalidToken));
    }

    #[test]
    fn test_access_token_uses_configured_lifetime() {
        let clock = Arc::new(ManualClock::new(START));
        let codec = codec_at(clock);

        let token = codec.issue_access_token("7").unwrap();
        let claims = codec.parse(&token).unwrap();
        assert_eq!(claims.exp - START, 15 * 60);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let clock = Arc::new(ManualClock::new(START));
        let issuer = codec_at(clock.clone());
        let other = TokenCodec::with_clock(JwtConfig::new("another-secret"), clock);

        let token = issuer.issue_access_token("42").unwrap();
        assert_eq!(other.parse(&token), Err(InvalidToken));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let clock = Arc::new(ManualClock::new(START));
        let codec = codec_at(clock);
        let token = codec.issue_access_token("42").unwrap();

        // Any change to the signed payload must break verification
        let mut parts: Vec<&str> = token.split('.').collect();
        let payload = format!("f{}", &parts[1][1..]);
        parts[1] = &payload;
        let tampered = parts.join(".");

        assert_ne!(tampered, token);
        assert_eq!(codec.parse(&tampered), Err(InvalidToken));
    }

    #[test]
    fn test_algorithm_mismatch_rejected() {
        let clock = Arc::new(ManualClock::new(START));
        let hs512 = TokenCodec::with_clock(
            JwtConfig {
                algorithm: Algorithm::HS512,
                ..JwtConfig::new("test-secret-key")
            },
            clock.clone(),
        );
        let hs256 = codec_at(clock);

        let token = hs512.issue_access_token("42").unwrap();
        assert!(hs512.parse(&token).is_ok());
        assert_eq!(hs256.parse(&token), Err(InvalidToken));
    }

    #[test]
    fn test_garbage_rejected() {
        let codec = TokenCodec::new(JwtConfig::new("test-secret-key"));
        assert_eq!(codec.parse(""), Err(InvalidToken));
        assert_eq!(codec.parse("not.a.jwt"), Err(InvalidToken));
    }

    #[test]
    fn test_system_clock_tokens_are_valid_now() {
        let codec = TokenCodec::new(JwtConfig::new("test-secret-key"));
        let token = codec.issue_access_token("1").unwrap();
        assert_eq!(codec.parse(&token).unwrap().sub, "1");
    }
}
