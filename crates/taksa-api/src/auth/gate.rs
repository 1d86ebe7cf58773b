// Authorization gate in front of every protected endpoint
// Decision: The revocation list is consulted before the token is decoded
// Decision: Denials carry a reason for logs, never for clients

use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use super::jwt::TokenCodec;
use super::revocation::{RevocationStore, StoreFailure};

/// Why a token was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// Token is on the revocation list
    Revoked,
    /// Token failed signature, algorithm, expiry or subject checks
    Invalid,
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenyReason::Revoked => write!(f, "token revoked"),
            DenyReason::Invalid => write!(f, "token invalid"),
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("unauthorized: {0}")]
    Unauthorized(DenyReason),
    #[error("store failure: {0}")]
    StoreFailure(anyhow::Error),
}

impl AuthError {
    pub fn deny_reason(&self) -> Option<DenyReason> {
        match self {
            AuthError::Unauthorized(reason) => Some(*reason),
            AuthError::StoreFailure(_) => None,
        }
    }
}

impl From<StoreFailure> for AuthError {
    fn from(failure: StoreFailure) -> Self {
        AuthError::StoreFailure(failure.0)
    }
}

/// Identity established by a valid token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub sub: String,
}

impl Subject {
    /// Numeric user id carried in `sub`
    pub fn user_id(&self) -> Result<i64, AuthError> {
        self.sub
            .parse()
            .map_err(|_| AuthError::Unauthorized(DenyReason::Invalid))
    }
}

#[derive(Clone)]
pub struct AuthGate {
    codec: Arc<TokenCodec>,
    revocations: RevocationStore,
}

impl AuthGate {
    pub fn new(codec: Arc<TokenCodec>, revocations: RevocationStore) -> Self {
        Self { codec, revocations }
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// Accept a raw bearer token or say why not
    pub async fn authenticate(&self, token: &str) -> Result<Subject, AuthError> {
        if self.revocations.is_revoked(token).await? {
            return Err(AuthError::Unauthorized(DenyReason::Revoked));
        }

        let claims = self
            .codec
            .parse(token)
            .map_err(|_| AuthError::Unauthorized(DenyReason::Invalid))?;

        Ok(Subject { sub: claims.sub })
    }

    /// Put a token on the revocation list
    pub async fn revoke(&self, token: &str) -> Result<(), AuthError> {
        self.revocations.record(token).await?;
        Ok(())
    }
}
