// OpenAPI document for the whole HTTP surface
// Decision: Protected operations reference a single "bearer_auth" HTTP scheme

use taksa_core::{Address, Driver, DriverClass, House, Order, User};
use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};

use crate::api::{
    common::{ErrorResponse, ListResponse, MessageResponse},
    drivers, houses, orders,
};
use crate::auth::routes as user;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        user::register,
        user::login,
        user::get_profile,
        user::update_profile,
        user::logout,
        drivers::create_driver,
        drivers::list_drivers,
        drivers::get_driver,
        drivers::list_drivers_by_class,
        drivers::list_drivers_by_car,
        houses::list_houses,
        houses::get_house,
        houses::list_houses_by_street,
        orders::create_order,
        orders::list_orders,
        orders::get_order,
        orders::list_user_orders,
        orders::list_driver_orders,
    ),
    components(
        schemas(
            User, Driver, DriverClass, House, Address, Order,
            user::RegisterRequest, user::LoginRequest,
            user::TokenResponse, user::UpdateProfileRequest,
            drivers::CreateDriverRequest,
            orders::CreateOrderRequest,
            ErrorResponse, MessageResponse,
            ListResponse<Driver>,
            ListResponse<House>,
            ListResponse<Order>,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "user", description = "Registration, login, profile and logout"),
        (name = "driver", description = "Driver fleet endpoints"),
        (name = "house", description = "Address directory endpoints"),
        (name = "order", description = "Ride booking endpoints")
    ),
    info(
        title = "Taksa API",
        version = "0.1.0",
        description = "Taxi booking backend: accounts, drivers, addresses and orders",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}
