// House (address) domain types

use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Street address as entered by a rider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Address {
    #[cfg_attr(feature = "openapi", schema(example = "ул. Ленина"))]
    pub street: String,
    /// Building (corpus) within the house number, if any
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(example = "1"))]
    pub building: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "12A"))]
    pub number: String,
}

/// A known house that orders can start or end at
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct House {
    pub id: i64,
    pub street: String,
    pub building: Option<String>,
    pub number: String,
}

impl House {
    pub fn address(&self) -> Address {
        Address {
            street: self.street.clone(),
            building: self.building.clone(),
            number: self.number.clone(),
        }
    }
}
