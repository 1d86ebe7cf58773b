// User domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Rider profile as exposed by the API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct User {
    pub id: i64,
    pub name: String,
    /// Phone in "+7 (xxx) xxx xx-xx" form
    pub phone: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}
