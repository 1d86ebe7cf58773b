// Authentication extractor and HTTP error mapping
// Decision: Bearer header only; the gate sees the raw token string
// Decision: Every denial looks the same to the client ("Access denied")

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use taksa_storage::StorageBackend;

use super::{
    config::AuthConfig,
    gate::{AuthError, AuthGate},
    jwt::{Clock, SystemClock, TokenCodec},
    revocation::RevocationStore,
};

pub const ACCESS_DENIED: &str = "Access denied";
pub const INTERNAL_ERROR: &str = "Internal server error";

/// HTTP error with a JSON `{"error": ...}` body
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    pub error: String,
    #[serde(skip)]
    pub status: StatusCode,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            status,
        }
    }

    pub fn access_denied() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, ACCESS_DENIED)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthorized(reason) => {
                tracing::warn!(%reason, "Access denied");
                Self::access_denied()
            }
            AuthError::StoreFailure(e) => {
                tracing::error!("Authentication store failure: {}", e);
                Self::internal()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Authenticated caller extracted from the request
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// User ID from the token subject
    pub id: i64,
    /// The bearer token as presented, needed for logout
    pub token: String,
}

/// Auth state shared across routes
#[derive(Clone)]
pub struct AuthState {
    pub config: AuthConfig,
    pub gate: AuthGate,
    pub storage: StorageBackend,
}

impl AuthState {
    pub fn new(config: AuthConfig, storage: StorageBackend) -> Self {
        Self::with_clock(config, storage, Arc::new(SystemClock))
    }

    pub fn with_clock(config: AuthConfig, storage: StorageBackend, clock: Arc<dyn Clock>) -> Self {
        let codec = Arc::new(TokenCodec::with_clock(config.jwt.clone(), clock));
        let gate = AuthGate::new(codec, RevocationStore::new(storage.clone()));
        Self {
            config,
            gate,
            storage,
        }
    }

    pub fn codec(&self) -> &TokenCodec {
        self.gate.codec()
    }
}

/// Extractor for authenticated user
/// This is required - returns 401 if not authenticated
#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);
        extract_auth_user(parts, &auth_state).await
    }
}

/// Helper trait for extracting AuthState from application state
pub trait FromRef<T> {
    fn from_ref(input: &T) -> Self;
}

impl FromRef<AuthState> for AuthState {
    fn from_ref(input: &AuthState) -> Self {
        input.clone()
    }
}

/// Token from `Authorization: Bearer <token>`; the scheme is case-insensitive
fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

async fn extract_auth_user(parts: &Parts, auth_state: &AuthState) -> Result<AuthUser, ApiError> {
    let Some(token) = bearer_token(parts) else {
        tracing::warn!("Access denied: missing or malformed bearer token");
        return Err(ApiError::access_denied());
    };

    let subject = auth_state.gate.authenticate(token).await?;
    let id = subject.user_id()?;

    Ok(AuthUser {
        id,
        token: token.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::config::JwtConfig;
    use axum::{body::Body, http::Request, routing::get, Router};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_state() -> AuthState {
        AuthState::new(
            AuthConfig::new(JwtConfig::new("middleware-test-secret")),
            StorageBackend::in_memory(),
        )
    }

    fn app(state: AuthState) -> Router {
        Router::new()
            .route(
                "/whoami",
                get(|user: AuthUser| async move { user.id.to_string() }),
            )
            .with_state(state)
    }

    async fn call(app: Router, authorization: Option<&str>) -> (StatusCode, String) {
        let mut request = Request::builder().uri("/whoami");
        if let Some(value) = authorization {
            request = request.header(header::AUTHORIZATION, value);
        }
        let response = app
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_valid_token_accepted() {
        let state = test_state();
        let token = state.codec().issue_access_token("42").unwrap();

        let (status, body) = call(app(state), Some(&format!("Bearer {token}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "42");
    }

    #[tokio::test]
    async fn test_lowercase_scheme_accepted() {
        let state = test_state();
        let token = state.codec().issue_access_token("7").unwrap();

        let (status, _) = call(app(state), Some(&format!("bearer {token}"))).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_every_denial_has_same_body() {
        let state = test_state();
        let token = state.codec().issue_access_token("42").unwrap();
        state.gate.revoke(&token).await.unwrap();

        let missing = call(app(state.clone()), None).await;
        let garbage = call(app(state.clone()), Some("Bearer garbage")).await;
        let revoked = call(app(state.clone()), Some(&format!("Bearer {token}"))).await;
        let basic = call(app(state), Some("Basic dXNlcjpwYXNz")).await;

        for (status, body) in [&missing, &garbage, &revoked, &basic] {
            assert_eq!(*status, StatusCode::UNAUTHORIZED);
            assert_eq!(body, r#"{"error":"Access denied"}"#);
        }
    }

    #[tokio::test]
    async fn test_non_numeric_subject_denied() {
        let state = test_state();
        let token = state.codec().issue_access_token("not-a-number").unwrap();

        let (status, _) = call(app(state), Some(&format!("Bearer {token}"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_store_failure_maps_to_500() {
        let err: ApiError = AuthError::StoreFailure(anyhow::anyhow!("db down")).into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error, INTERNAL_ERROR);
    }
}
