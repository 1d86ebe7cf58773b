// Houses API routes
// Decision: The house directory is read-only over HTTP; rows come from seeding

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use taksa_core::House;
use taksa_storage::StorageBackend;

use super::common::{internal_error, not_found, ErrorResponse, HandlerError, ListResponse};
use crate::auth::middleware::{AuthState, AuthUser, FromRef};

/// App state for house routes
#[derive(Clone)]
pub struct HousesState {
    pub storage: StorageBackend,
    pub auth: AuthState,
}

impl FromRef<HousesState> for AuthState {
    fn from_ref(input: &HousesState) -> Self {
        input.auth.clone()
    }
}

/// Create house routes
pub fn routes(state: HousesState) -> Router {
    Router::new()
        .route("/house", get(list_houses))
        .route("/house/:house_id", get(get_house))
        .route("/house/street/:street", get(list_houses_by_street))
        .with_state(state)
}

/// GET /house - List all houses
#[utoipa::path(
    get,
    path = "/house",
    responses(
        (status = 200, description = "All houses", body = ListResponse<House>),
        (status = 401, description = "Access denied", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "house"
)]
pub async fn list_houses(
    State(state): State<HousesState>,
    _auth: AuthUser,
) -> Result<Json<ListResponse<House>>, HandlerError> {
    let rows = state
        .storage
        .list_houses()
        .await
        .map_err(|e| internal_error("Failed to list houses", e))?;

    Ok(Json(ListResponse::new(
        rows.into_iter().map(House::from).collect(),
    )))
}

/// GET /house/:house_id - Get a house
#[utoipa::path(
    get,
    path = "/house/{house_id}",
    params(("house_id" = i64, Path, description = "House ID")),
    responses(
        (status = 200, description = "House", body = House),
        (status = 401, description = "Access denied", body = ErrorResponse),
        (status = 404, description = "House not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "house"
)]
pub async fn get_house(
    State(state): State<HousesState>,
    _auth: AuthUser,
    Path(house_id): Path<i64>,
) -> Result<Json<House>, HandlerError> {
    let row = state
        .storage
        .get_house(house_id)
        .await
        .map_err(|e| internal_error("Failed to get house", e))?
        .ok_or_else(|| not_found("House not found"))?;

    Ok(Json(row.into()))
}

/// GET /house/street/:street - Houses on one street
#[utoipa::path(
    get,
    path = "/house/street/{street}",
    params(("street" = String, Path, description = "Street name, exact match")),
    responses(
        (status = 200, description = "Houses on the street", body = ListResponse<House>),
        (status = 401, description = "Access denied", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "house"
)]
pub async fn list_houses_by_street(
    State(state): State<HousesState>,
    _auth: AuthUser,
    Path(street): Path<String>,
) -> Result<Json<ListResponse<House>>, HandlerError> {
    let rows = state
        .storage
        .list_houses_by_street(&street)
        .await
        .map_err(|e| internal_error("Failed to list houses by street", e))?;

    Ok(Json(ListResponse::new(
        rows.into_iter().map(House::from).collect(),
    )))
}
