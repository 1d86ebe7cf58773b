// Resource APIs: drivers, houses and orders
// Account routes live in crate::auth::routes

pub mod common;
pub mod drivers;
pub mod houses;
pub mod orders;
pub mod validation;

pub use common::{ErrorResponse, ListResponse, MessageResponse};
