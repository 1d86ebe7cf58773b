// User account HTTP routes
// Decision: All account routes live under /user, the prefix is applied by the router
// Decision: Login failures never say whether the email exists

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use taksa_core::User;
use taksa_storage::{
    is_unique_violation,
    models::{CreateUserRow, UpdateUser},
    password::{hash_password, verify_password},
};
use utoipa::ToSchema;

use super::middleware::{ApiError, AuthState, AuthUser};
use crate::api::common::{ErrorResponse, MessageResponse};
use crate::api::validation::{
    validate_email, validate_password, validate_profile_update, validate_registration,
};

const INVALID_CREDENTIALS: &str = "Invalid credentials";
const USER_EXISTS: &str = "User already exists";
const EMAIL_IN_USE: &str = "Email already in use";

/// Register request
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "Anna Ivanova")]
    pub name: String,
    #[schema(example = "+7 (910) 123 45-67")]
    pub phone: String,
    #[schema(example = "anna@example.com")]
    pub email: String,
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Lifetime in seconds
    pub expires_in: u64,
}

/// Profile update; omitted fields are left unchanged
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Create user account routes
pub fn routes(state: AuthState) -> Router {
    Router::new()
        .route("/user/register", post(register))
        .route("/user/login", post(login))
        .route("/user/logout", post(logout))
        .route("/user", get(get_profile).put(update_profile))
        .with_state(state)
}

fn internal_failure(context: &str, err: anyhow::Error) -> ApiError {
    tracing::error!("{}: {}", context, err);
    ApiError::internal()
}

/// A duplicate email that slipped past the lookup is still a client error
fn user_write_failure(context: &str, err: anyhow::Error, conflict: &str) -> ApiError {
    if is_unique_violation(&err) {
        tracing::warn!("{}: email already registered", context);
        return ApiError::bad_request(conflict);
    }
    internal_failure(context, err)
}

/// POST /user/register - Create an account
#[utoipa::path(
    post,
    path = "/user/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = MessageResponse),
        (status = 400, description = "Validation failed or email taken", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "user"
)]
pub async fn register(
    State(state): State<AuthState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    validate_registration(
        &req.name,
        &req.phone,
        &req.email,
        &req.password,
        state.config.min_password_length,
    )?;

    let existing = state
        .storage
        .get_user_by_email(&req.email)
        .await
        .map_err(|e| internal_failure("Failed to look up user", e))?;
    if existing.is_some() {
        tracing::warn!("Registration rejected: email already registered");
        return Err(ApiError::bad_request(USER_EXISTS));
    }

    let password_hash =
        hash_password(&req.password).map_err(|e| internal_failure("Failed to hash password", e))?;

    let user = state
        .storage
        .create_user(CreateUserRow {
            name: req.name,
            phone: req.phone,
            email: req.email,
            password_hash,
        })
        .await
        .map_err(|e| user_write_failure("Failed to create user", e, USER_EXISTS))?;

    tracing::info!(user_id = user.id, "User registered");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::created(user.id).with_description("User registered successfully")),
    ))
}

/// POST /user/login - Exchange credentials for an access token
#[utoipa::path(
    post,
    path = "/user/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Access token issued", body = TokenResponse),
        (status = 400, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "user"
)]
pub async fn login(
    State(state): State<AuthState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    // Malformed input gets the same answer as a wrong password
    if validate_email(&req.email).is_err()
        || validate_password(&req.password, state.config.min_password_length).is_err()
    {
        tracing::warn!("Failed login: malformed credentials");
        return Err(ApiError::bad_request(INVALID_CREDENTIALS));
    }

    let user = state
        .storage
        .get_user_by_email(&req.email)
        .await
        .map_err(|e| internal_failure("Failed to look up user", e))?
        .ok_or_else(|| {
            tracing::warn!("Failed login: unknown email");
            ApiError::bad_request(INVALID_CREDENTIALS)
        })?;

    let verified = verify_password(&req.password, &user.password_hash)
        .map_err(|e| internal_failure("Failed to verify password", e))?;
    if !verified {
        tracing::warn!(user_id = user.id, "Failed login: wrong password");
        return Err(ApiError::bad_request(INVALID_CREDENTIALS));
    }

    let access_token = state
        .codec()
        .issue_access_token(&user.id.to_string())
        .map_err(|e| internal_failure("Failed to issue access token", e))?;

    tracing::info!(user_id = user.id, "Login successful");
    Ok(Json(TokenResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: state.codec().access_token_lifetime().as_secs(),
    }))
}

/// GET /user - Current user's profile
#[utoipa::path(
    get,
    path = "/user",
    responses(
        (status = 200, description = "Profile", body = User),
        (status = 401, description = "Access denied", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "user"
)]
pub async fn get_profile(
    State(state): State<AuthState>,
    auth: AuthUser,
) -> Result<Json<User>, ApiError> {
    let user = state
        .storage
        .get_user(auth.id)
        .await
        .map_err(|e| internal_failure("Failed to get user", e))?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(user.into()))
}

/// PUT /user - Update the current user's profile
#[utoipa::path(
    put,
    path = "/user",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = User),
        (status = 400, description = "Validation failed or email taken", body = ErrorResponse),
        (status = 401, description = "Access denied", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "user"
)]
pub async fn update_profile(
    State(state): State<AuthState>,
    auth: AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<User>, ApiError> {
    validate_profile_update(
        req.name.as_deref(),
        req.phone.as_deref(),
        req.email.as_deref(),
    )?;

    if let Some(email) = &req.email {
        let holder = state
            .storage
            .get_user_by_email(email)
            .await
            .map_err(|e| internal_failure("Failed to look up user", e))?;
        if holder.is_some_and(|u| u.id != auth.id) {
            return Err(ApiError::bad_request(EMAIL_IN_USE));
        }
    }

    let user = state
        .storage
        .update_user(
            auth.id,
            UpdateUser {
                name: req.name,
                phone: req.phone,
                email: req.email,
            },
        )
        .await
        .map_err(|e| user_write_failure("Failed to update user", e, EMAIL_IN_USE))?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    tracing::info!(user_id = user.id, "Profile updated");
    Ok(Json(user.into()))
}

/// POST /user/logout - Revoke the presented access token
#[utoipa::path(
    post,
    path = "/user/logout",
    responses(
        (status = 200, description = "Token revoked", body = MessageResponse),
        (status = 401, description = "Access denied", body = ErrorResponse),
        (status = 500, description = "Revocation could not be recorded", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "user"
)]
pub async fn logout(
    State(state): State<AuthState>,
    auth: AuthUser,
) -> Result<Json<MessageResponse>, ApiError> {
    state.gate.revoke(&auth.token).await?;

    tracing::info!(user_id = auth.id, "Access token revoked");
    Ok(Json(MessageResponse::description(
        "Token was successfully revoked",
    )))
}
