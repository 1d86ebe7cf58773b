// Orders API routes
// Decision: Creating an order matches a random driver of the requested class

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use taksa_core::{Address, DriverClass, Order};
use utoipa::ToSchema;

use super::common::{
    internal_error, not_found, ErrorResponse, HandlerError, ListResponse, MessageResponse,
};
use crate::auth::middleware::{AuthState, AuthUser, FromRef};
use crate::services::{OrderError, OrderService};

/// App state for order routes
#[derive(Clone)]
pub struct OrdersState {
    pub service: OrderService,
    pub auth: AuthState,
}

impl FromRef<OrdersState> for AuthState {
    fn from_ref(input: &OrdersState) -> Self {
        input.auth.clone()
    }
}

/// Request to book a ride
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    /// Pickup address; must exist in the house directory
    pub house_from: Address,
    /// Drop-off address; must exist in the house directory
    pub house_to: Address,
    pub driver_class: DriverClass,
}

/// Create order routes
pub fn routes(state: OrdersState) -> Router {
    Router::new()
        .route("/order", post(create_order).get(list_orders))
        .route("/order/:order_id", get(get_order))
        .route("/user/:user_id/orders", get(list_user_orders))
        .route("/driver/:driver_id/orders", get(list_driver_orders))
        .with_state(state)
}

/// POST /order - Book a ride for the caller
#[utoipa::path(
    post,
    path = "/order",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = MessageResponse),
        (status = 400, description = "Invalid departure or arrival location", body = ErrorResponse),
        (status = 401, description = "Access denied", body = ErrorResponse),
        (status = 404, description = "User not found or no drivers available for the selected class", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "order"
)]
pub async fn create_order(
    State(state): State<OrdersState>,
    auth: AuthUser,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), HandlerError> {
    let order = state
        .service
        .create(auth.id, req)
        .await
        .map_err(|e| match e {
            OrderError::UserNotFound(user_id) => {
                tracing::warn!(user_id, "Order rejected: unknown user");
                not_found("User not found")
            }
            OrderError::NoDriversAvailable(class) => {
                tracing::warn!(driver_class = %class, "No drivers available");
                not_found(&OrderError::NoDriversAvailable(class).to_string())
            }
            OrderError::InvalidLocation(which) => {
                tracing::warn!(which, "Unknown order address");
                ErrorResponse::new("Invalid departure or arrival location")
                    .into_response(StatusCode::BAD_REQUEST)
            }
            OrderError::Storage(e) => internal_error("Failed to create order", e),
        })?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::created(order.id).with_description("Order successfully created")),
    ))
}

/// GET /order - List all orders
#[utoipa::path(
    get,
    path = "/order",
    responses(
        (status = 200, description = "All orders", body = ListResponse<Order>),
        (status = 401, description = "Access denied", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "order"
)]
pub async fn list_orders(
    State(state): State<OrdersState>,
    _auth: AuthUser,
) -> Result<Json<ListResponse<Order>>, HandlerError> {
    let orders = state
        .service
        .list()
        .await
        .map_err(|e| internal_error("Failed to list orders", e))?;

    Ok(Json(ListResponse::new(orders)))
}

/// GET /order/:order_id - Get an order
#[utoipa::path(
    get,
    path = "/order/{order_id}",
    params(("order_id" = i64, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order", body = Order),
        (status = 401, description = "Access denied", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "order"
)]
pub async fn get_order(
    State(state): State<OrdersState>,
    _auth: AuthUser,
    Path(order_id): Path<i64>,
) -> Result<Json<Order>, HandlerError> {
    let order = state
        .service
        .get(order_id)
        .await
        .map_err(|e| internal_error("Failed to get order", e))?
        .ok_or_else(|| not_found("Order not found"))?;

    Ok(Json(order))
}

/// GET /user/:user_id/orders - Ride history of a user
#[utoipa::path(
    get,
    path = "/user/{user_id}/orders",
    params(("user_id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "Orders of the user", body = ListResponse<Order>),
        (status = 401, description = "Access denied", body = ErrorResponse),
        (status = 404, description = "User has no orders", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "order"
)]
pub async fn list_user_orders(
    State(state): State<OrdersState>,
    _auth: AuthUser,
    Path(user_id): Path<i64>,
) -> Result<Json<ListResponse<Order>>, HandlerError> {
    let orders = state
        .service
        .list_for_user(user_id)
        .await
        .map_err(|e| internal_error("Failed to list user orders", e))?;

    if orders.is_empty() {
        return Err(not_found("Orders not found"));
    }
    Ok(Json(ListResponse::new(orders)))
}

/// GET /driver/:driver_id/orders - Ride history of a driver
#[utoipa::path(
    get,
    path = "/driver/{driver_id}/orders",
    params(("driver_id" = i64, Path, description = "Driver ID")),
    responses(
        (status = 200, description = "Orders of the driver", body = ListResponse<Order>),
        (status = 401, description = "Access denied", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "order"
)]
pub async fn list_driver_orders(
    State(state): State<OrdersState>,
    _auth: AuthUser,
    Path(driver_id): Path<i64>,
) -> Result<Json<ListResponse<Order>>, HandlerError> {
    let orders = state
        .service
        .list_for_driver(driver_id)
        .await
        .map_err(|e| internal_error("Failed to list driver orders", e))?;

    Ok(Json(ListResponse::new(orders)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_order_request_building_optional() {
        let req: CreateOrderRequest = serde_json::from_str(
            r#"{
                "house_from": {"street": "ул. Ленина", "building": "1", "number": "12A"},
                "house_to": {"street": "ул. Пушкина", "number": "3"},
                "driver_class": "econom"
            }"#,
        )
        .unwrap();

        assert_eq!(req.house_from.building.as_deref(), Some("1"));
        assert_eq!(req.house_to.building, None);
        assert_eq!(req.driver_class, DriverClass::Econom);
    }
}
