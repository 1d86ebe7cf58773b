// Revocation list of logged-out access tokens
// Decision: Exact-string membership; entries are never pruned
// Decision: Write failures are surfaced to the caller, never swallowed

use taksa_storage::StorageBackend;
use thiserror::Error;

/// The revocation list could not be read or written
#[derive(Debug, Error)]
#[error("revocation store failure: {0}")]
pub struct StoreFailure(pub anyhow::Error);

/// Persisted set of revoked tokens
#[derive(Clone)]
pub struct RevocationStore {
    storage: StorageBackend,
}

impl RevocationStore {
    pub fn new(storage: StorageBackend) -> Self {
        Self { storage }
    }

    /// Add a token to the list. Recording the same token again is a no-op.
    pub async fn record(&self, token: &str) -> Result<(), StoreFailure> {
        self.storage.revoke_token(token).await.map_err(|e| {
            tracing::error!("Failed to record revoked token: {}", e);
            StoreFailure(e)
        })
    }

    pub async fn is_revoked(&self, token: &str) -> Result<bool, StoreFailure> {
        self.storage.is_token_revoked(token).await.map_err(|e| {
            tracing::error!("Failed to query revocation list: {}", e);
            StoreFailure(e)
        })
    }
}
