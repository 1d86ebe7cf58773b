// Database models (internal, may differ from public DTOs)

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use taksa_core::{Address, Driver, DriverClass, House, Order, UnknownDriverClass, User};
use uuid::Uuid;

// ============================================
// Users
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateUserRow {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub password_hash: String,
}

/// Partial profile update; `None` leaves the column untouched
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            phone: row.phone,
            email: row.email,
            created_at: row.created_at,
        }
    }
}

// ============================================
// Drivers
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct DriverRow {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub car: String,
    pub driver_class: String,
}

#[derive(Debug, Clone)]
pub struct CreateDriverRow {
    pub name: String,
    pub phone: String,
    pub car: String,
    pub driver_class: DriverClass,
}

impl TryFrom<DriverRow> for Driver {
    type Error = UnknownDriverClass;

    fn try_from(row: DriverRow) -> Result<Self, Self::Error> {
        Ok(Driver {
            id: row.id,
            name: row.name,
            phone: row.phone,
            car: row.car,
            driver_class: row.driver_class.parse()?,
        })
    }
}

// ============================================
// Houses
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct HouseRow {
    pub id: i64,
    pub street: String,
    pub building: Option<String>,
    pub number: String,
}

#[derive(Debug, Clone)]
pub struct CreateHouseRow {
    pub street: String,
    pub building: Option<String>,
    pub number: String,
}

impl From<HouseRow> for House {
    fn from(row: HouseRow) -> Self {
        House {
            id: row.id,
            street: row.street,
            building: row.building,
            number: row.number,
        }
    }
}

// ============================================
// Orders
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct OrderRow {
    pub id: i64,
    pub user_id: i64,
    pub driver_id: i64,
    pub driver_class: String,
    pub car: String,
    pub house_from_id: i64,
    pub house_from_street: String,
    pub house_from_building: Option<String>,
    pub house_from_number: String,
    pub house_to_id: i64,
    pub house_to_street: String,
    pub house_to_building: Option<String>,
    pub house_to_number: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateOrderRow {
    pub user_id: i64,
    pub driver_id: i64,
    pub driver_class: DriverClass,
    pub car: String,
    pub house_from_id: i64,
    pub house_from: Address,
    pub house_to_id: i64,
    pub house_to: Address,
}

impl TryFrom<OrderRow> for Order {
    type Error = UnknownDriverClass;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        Ok(Order {
            id: row.id,
            user_id: row.user_id,
            driver_id: row.driver_id,
            driver_class: row.driver_class.parse()?,
            car: row.car,
            house_from_id: row.house_from_id,
            house_from: Address {
                street: row.house_from_street,
                building: row.house_from_building,
                number: row.house_from_number,
            },
            house_to_id: row.house_to_id,
            house_to: Address {
                street: row.house_to_street,
                building: row.house_to_building,
                number: row.house_to_number,
            },
            created_at: row.created_at,
        })
    }
}

// ============================================
// Revocation list
// ============================================

/// One revoked access token. Never updated, never deleted.
#[derive(Debug, Clone, FromRow)]
pub struct RevokedTokenRow {
    pub id: Uuid,
    pub token: String,
}
