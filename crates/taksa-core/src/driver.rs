// Driver domain types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Service class a driver operates in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum DriverClass {
    Econom,
    Comfortable,
    Business,
}

impl DriverClass {
    pub const ALL: [DriverClass; 3] = [
        DriverClass::Econom,
        DriverClass::Comfortable,
        DriverClass::Business,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DriverClass::Econom => "econom",
            DriverClass::Comfortable => "comfortable",
            DriverClass::Business => "business",
        }
    }
}

impl fmt::Display for DriverClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a known driver class
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown driver class: {0}")]
pub struct UnknownDriverClass(pub String);

impl FromStr for DriverClass {
    type Err = UnknownDriverClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "econom" => Ok(DriverClass::Econom),
            "comfortable" => Ok(DriverClass::Comfortable),
            "business" => Ok(DriverClass::Business),
            other => Err(UnknownDriverClass(other.to_string())),
        }
    }
}

/// A driver available for matching
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Driver {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub car: String,
    pub driver_class: DriverClass,
}
