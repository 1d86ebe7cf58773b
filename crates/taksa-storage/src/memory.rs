// In-memory storage implementation for dev mode and tests
// Decision: Use parking_lot for thread-safe access
// Decision: Sequential i64 ids per table, like BIGSERIAL
//
// Mirrors the PostgreSQL repository closely enough that handlers cannot tell
// the two apart, including the unique email and unique revoked token.

use anyhow::Result;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicI64, Ordering};
use uuid::Uuid;

use crate::errors::UniqueViolation;
use crate::models::*;

/// In-memory database
/// All data is stored in memory and lost on restart
#[derive(Default)]
pub struct InMemoryDatabase {
    users: RwLock<BTreeMap<i64, UserRow>>,
    drivers: RwLock<BTreeMap<i64, DriverRow>>,
    houses: RwLock<BTreeMap<i64, HouseRow>>,
    orders: RwLock<BTreeMap<i64, OrderRow>>,
    // keyed by token string
    crl: RwLock<HashMap<String, RevokedTokenRow>>,
    user_seq: AtomicI64,
    driver_seq: AtomicI64,
    house_seq: AtomicI64,
    order_seq: AtomicI64,
}

fn next_id(seq: &AtomicI64) -> i64 {
    seq.fetch_add(1, Ordering::SeqCst) + 1
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    // ============================================
    // Users
    // ============================================

    pub async fn create_user(&self, input: CreateUserRow) -> Result<UserRow> {
        let mut users = self.users.write();
        if users.values().any(|u| u.email == input.email) {
            return Err(UniqueViolation::USER_EMAIL.into());
        }

        let row = UserRow {
            id: next_id(&self.user_seq),
            name: input.name,
            phone: input.phone,
            email: input.email,
            password_hash: input.password_hash,
            created_at: Utc::now(),
        };
        users.insert(row.id, row.clone());
        Ok(row)
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        Ok(self
            .users
            .read()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    pub async fn get_user(&self, id: i64) -> Result<Option<UserRow>> {
        Ok(self.users.read().get(&id).cloned())
    }

    pub async fn update_user(&self, id: i64, input: UpdateUser) -> Result<Option<UserRow>> {
        let mut users = self.users.write();
        if let Some(email) = &input.email {
            if users.values().any(|u| u.id != id && &u.email == email) {
                return Err(UniqueViolation::USER_EMAIL.into());
            }
        }

        let Some(row) = users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = input.name {
            row.name = name;
        }
        if let Some(phone) = input.phone {
            row.phone = phone;
        }
        if let Some(email) = input.email {
            row.email = email;
        }
        Ok(Some(row.clone()))
    }

    // ============================================
    // Drivers
    // ============================================

    pub async fn create_driver(&self, input: CreateDriverRow) -> Result<DriverRow> {
        let row = DriverRow {
            id: next_id(&self.driver_seq),
            name: input.name,
            phone: input.phone,
            car: input.car,
            driver_class: input.driver_class.to_string(),
        };
        self.drivers.write().insert(row.id, row.clone());
        Ok(row)
    }

    pub async fn get_driver(&self, id: i64) -> Result<Option<DriverRow>> {
        Ok(self.drivers.read().get(&id).cloned())
    }

    pub async fn list_drivers(&self) -> Result<Vec<DriverRow>> {
        Ok(self.drivers.read().values().cloned().collect())
    }

    pub async fn list_drivers_by_class(&self, driver_class: &str) -> Result<Vec<DriverRow>> {
        Ok(self
            .drivers
            .read()
            .values()
            .filter(|d| d.driver_class == driver_class)
            .cloned()
            .collect())
    }

    pub async fn list_drivers_by_car(&self, car: &str) -> Result<Vec<DriverRow>> {
        Ok(self
            .drivers
            .read()
            .values()
            .filter(|d| d.car == car)
            .cloned()
            .collect())
    }

    pub async fn count_drivers(&self) -> Result<i64> {
        Ok(self.drivers.read().len() as i64)
    }

    // ============================================
    // Houses
    // ============================================

    pub async fn create_house(&self, input: CreateHouseRow) -> Result<HouseRow> {
        let row = HouseRow {
            id: next_id(&self.house_seq),
            street: input.street,
            building: input.building,
            number: input.number,
        };
        self.houses.write().insert(row.id, row.clone());
        Ok(row)
    }

    pub async fn get_house(&self, id: i64) -> Result<Option<HouseRow>> {
        Ok(self.houses.read().get(&id).cloned())
    }

    pub async fn list_houses(&self) -> Result<Vec<HouseRow>> {
        Ok(self.houses.read().values().cloned().collect())
    }

    pub async fn list_houses_by_street(&self, street: &str) -> Result<Vec<HouseRow>> {
        Ok(self
            .houses
            .read()
            .values()
            .filter(|h| h.street == street)
            .cloned()
            .collect())
    }

    pub async fn find_house_id(
        &self,
        street: &str,
        building: Option<&str>,
        number: &str,
    ) -> Result<Option<i64>> {
        Ok(self
            .houses
            .read()
            .values()
            .find(|h| h.street == street && h.building.as_deref() == building && h.number == number)
            .map(|h| h.id))
    }

    pub async fn count_houses(&self) -> Result<i64> {
        Ok(self.houses.read().len() as i64)
    }

    // ============================================
    // Orders
    // ============================================

    pub async fn create_order(&self, input: CreateOrderRow) -> Result<OrderRow> {
        let row = OrderRow {
            id: next_id(&self.order_seq),
            user_id: input.user_id,
            driver_id: input.driver_id,
            driver_class: input.driver_class.to_string(),
            car: input.car,
            house_from_id: input.house_from_id,
            house_from_street: input.house_from.street,
            house_from_building: input.house_from.building,
            house_from_number: input.house_from.number,
            house_to_id: input.house_to_id,
            house_to_street: input.house_to.street,
            house_to_building: input.house_to.building,
            house_to_number: input.house_to.number,
            created_at: Utc::now(),
        };
        self.orders.write().insert(row.id, row.clone());
        Ok(row)
    }

    pub async fn get_order(&self, id: i64) -> Result<Option<OrderRow>> {
        Ok(self.orders.read().get(&id).cloned())
    }

    pub async fn list_orders(&self) -> Result<Vec<OrderRow>> {
        Ok(self.orders.read().values().cloned().collect())
    }

    pub async fn list_user_orders(&self, user_id: i64) -> Result<Vec<OrderRow>> {
        Ok(self
            .orders
            .read()
            .values()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect())
    }

    pub async fn list_driver_orders(&self, driver_id: i64) -> Result<Vec<OrderRow>> {
        Ok(self
            .orders
            .read()
            .values()
            .filter(|o| o.driver_id == driver_id)
            .cloned()
            .collect())
    }

    // ============================================
    // Revocation list
    // ============================================

    pub async fn revoke_token(&self, token: &str) -> Result<()> {
        self.crl
            .write()
            .entry(token.to_string())
            .or_insert_with(|| RevokedTokenRow {
                id: Uuid::now_v7(),
                token: token.to_string(),
            });
        Ok(())
    }

    pub async fn is_token_revoked(&self, token: &str) -> Result<bool> {
        Ok(self.crl.read().contains_key(token))
    }

    pub async fn list_revoked_tokens(&self) -> Result<Vec<RevokedTokenRow>> {
        let mut rows: Vec<_> = self.crl.read().values().cloned().collect();
        rows.sort_by_key(|r| r.id);
        Ok(rows)
    }
}
