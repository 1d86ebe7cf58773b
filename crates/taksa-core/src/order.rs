// Order domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::driver::DriverClass;
use crate::house::Address;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// A ride matched to a driver
///
/// Addresses are copied into the order at creation time so later edits to
/// the house directory do not rewrite ride history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub driver_id: i64,
    pub driver_class: DriverClass,
    pub car: String,
    pub house_from_id: i64,
    pub house_from: Address,
    pub house_to_id: i64,
    pub house_to: Address,
    pub created_at: DateTime<Utc>,
}
