// Drivers API routes
// Decision: The fleet is readable by any authenticated user

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use taksa_core::{Driver, DriverClass};
use taksa_storage::{models::CreateDriverRow, DriverRow, StorageBackend};
use utoipa::ToSchema;

use super::common::{
    internal_error, not_found, ErrorResponse, HandlerError, ListResponse, MessageResponse,
};
use super::validation::validate_driver;
use crate::auth::middleware::{AuthState, AuthUser, FromRef};

/// App state for driver routes
#[derive(Clone)]
pub struct DriversState {
    pub storage: StorageBackend,
    pub auth: AuthState,
}

impl FromRef<DriversState> for AuthState {
    fn from_ref(input: &DriversState) -> Self {
        input.auth.clone()
    }
}

/// Request to add a driver to the fleet
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateDriverRequest {
    #[schema(example = "Ivanov Ivan")]
    pub name: String,
    #[schema(example = "+7 (910) 123 45-67")]
    pub phone: String,
    #[schema(example = "Toyota Camry")]
    pub car: String,
    pub driver_class: DriverClass,
}

/// Create driver routes
pub fn routes(state: DriversState) -> Router {
    Router::new()
        .route("/driver", get(list_drivers).post(create_driver))
        .route("/driver/:driver_id", get(get_driver))
        .route("/driver/class/:driver_class", get(list_drivers_by_class))
        .route("/driver/car/:car", get(list_drivers_by_car))
        .with_state(state)
}

fn rows_to_drivers(rows: Vec<DriverRow>) -> Result<Vec<Driver>, HandlerError> {
    rows.into_iter()
        .map(Driver::try_from)
        .collect::<Result<_, _>>()
        .map_err(|e| internal_error("Corrupt driver row", e))
}

/// POST /driver - Add a driver
#[utoipa::path(
    post,
    path = "/driver",
    request_body = CreateDriverRequest,
    responses(
        (status = 201, description = "Driver created", body = MessageResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Access denied", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "driver"
)]
pub async fn create_driver(
    State(state): State<DriversState>,
    _auth: AuthUser,
    Json(req): Json<CreateDriverRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), HandlerError> {
    validate_driver(&req.name, &req.phone, &req.car)?;

    let row = state
        .storage
        .create_driver(CreateDriverRow {
            name: req.name,
            phone: req.phone,
            car: req.car,
            driver_class: req.driver_class,
        })
        .await
        .map_err(|e| internal_error("Failed to create driver", e))?;

    tracing::info!(driver_id = row.id, driver_class = %row.driver_class, "Driver created");
    Ok((StatusCode::CREATED, Json(MessageResponse::created(row.id))))
}

/// GET /driver - List all drivers
#[utoipa::path(
    get,
    path = "/driver",
    responses(
        (status = 200, description = "All drivers", body = ListResponse<Driver>),
        (status = 401, description = "Access denied", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "driver"
)]
pub async fn list_drivers(
    State(state): State<DriversState>,
    _auth: AuthUser,
) -> Result<Json<ListResponse<Driver>>, HandlerError> {
    let rows = state
        .storage
        .list_drivers()
        .await
        .map_err(|e| internal_error("Failed to list drivers", e))?;

    Ok(Json(ListResponse::new(rows_to_drivers(rows)?)))
}

/// GET /driver/:driver_id - Get a driver
#[utoipa::path(
    get,
    path = "/driver/{driver_id}",
    params(("driver_id" = i64, Path, description = "Driver ID")),
    responses(
        (status = 200, description = "Driver", body = Driver),
        (status = 401, description = "Access denied", body = ErrorResponse),
        (status = 404, description = "Driver not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "driver"
)]
pub async fn get_driver(
    State(state): State<DriversState>,
    _auth: AuthUser,
    Path(driver_id): Path<i64>,
) -> Result<Json<Driver>, HandlerError> {
    let row = state
        .storage
        .get_driver(driver_id)
        .await
        .map_err(|e| internal_error("Failed to get driver", e))?
        .ok_or_else(|| not_found("Driver not found"))?;

    let driver = Driver::try_from(row).map_err(|e| internal_error("Corrupt driver row", e))?;
    Ok(Json(driver))
}

/// GET /driver/class/:driver_class - Drivers of one service class
#[utoipa::path(
    get,
    path = "/driver/class/{driver_class}",
    params(("driver_class" = String, Path, description = "econom, comfortable or business")),
    responses(
        (status = 200, description = "Drivers of the class", body = ListResponse<Driver>),
        (status = 400, description = "Unknown driver class", body = ErrorResponse),
        (status = 401, description = "Access denied", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "driver"
)]
pub async fn list_drivers_by_class(
    State(state): State<DriversState>,
    _auth: AuthUser,
    Path(driver_class): Path<String>,
) -> Result<Json<ListResponse<Driver>>, HandlerError> {
    let driver_class: DriverClass = driver_class
        .parse()
        .map_err(|e: taksa_core::UnknownDriverClass| {
            ErrorResponse::new(e.to_string()).into_response(StatusCode::BAD_REQUEST)
        })?;

    let rows = state
        .storage
        .list_drivers_by_class(driver_class.as_str())
        .await
        .map_err(|e| internal_error("Failed to list drivers by class", e))?;

    Ok(Json(ListResponse::new(rows_to_drivers(rows)?)))
}

/// GET /driver/car/:car - Drivers of one car model
#[utoipa::path(
    get,
    path = "/driver/car/{car}",
    params(("car" = String, Path, description = "Car model, exact match")),
    responses(
        (status = 200, description = "Drivers with the car", body = ListResponse<Driver>),
        (status = 401, description = "Access denied", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "driver"
)]
pub async fn list_drivers_by_car(
    State(state): State<DriversState>,
    _auth: AuthUser,
    Path(car): Path<String>,
) -> Result<Json<ListResponse<Driver>>, HandlerError> {
    let rows = state
        .storage
        .list_drivers_by_car(&car)
        .await
        .map_err(|e| internal_error("Failed to list drivers by car", e))?;

    Ok(Json(ListResponse::new(rows_to_drivers(rows)?)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_driver_request_deserialize() {
        let req: CreateDriverRequest = serde_json::from_str(
            r#"{"name":"Ivanov Ivan","phone":"+7 (910) 123 45-67","car":"Toyota Camry","driver_class":"comfortable"}"#,
        )
        .unwrap();
        assert_eq!(req.driver_class, DriverClass::Comfortable);
    }

    #[test]
    fn test_create_driver_request_rejects_unknown_class() {
        let result: Result<CreateDriverRequest, _> = serde_json::from_str(
            r#"{"name":"Ivanov Ivan","phone":"+7 (910) 123 45-67","car":"Toyota Camry","driver_class":"luxury"}"#,
        );
        assert!(result.is_err());
    }
}
