// Storage backend abstraction
// Decision: Use enum dispatch for simplicity over trait objects
//
// Handlers and services hold a StorageBackend and never know whether
// PostgreSQL or the in-memory store sits behind it.

use anyhow::Result;
use std::sync::Arc;

use crate::memory::InMemoryDatabase;
use crate::models::*;
use crate::repositories::Database;
use crate::seed;

/// Storage backend that can be either PostgreSQL or in-memory
#[derive(Clone)]
pub enum StorageBackend {
    /// PostgreSQL database (production)
    Postgres(Database),
    /// In-memory database (dev mode, tests)
    InMemory(Arc<InMemoryDatabase>),
}

/// Rows inserted by `seed_reference_data`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub drivers: usize,
    pub houses: usize,
}

impl StorageBackend {
    /// Connect to PostgreSQL and apply migrations
    pub async fn postgres(database_url: &str) -> Result<Self> {
        let db = Database::from_url(database_url).await?;
        db.migrate().await?;
        Ok(Self::Postgres(db))
    }

    /// Create an empty in-memory storage backend
    pub fn in_memory() -> Self {
        Self::InMemory(Arc::new(InMemoryDatabase::new()))
    }

    /// Check if this is dev mode (in-memory)
    pub fn is_dev_mode(&self) -> bool {
        matches!(self, Self::InMemory(_))
    }

    // ============================================
    // Users
    // ============================================

    pub async fn create_user(&self, input: CreateUserRow) -> Result<UserRow> {
        match self {
            Self::Postgres(db) => db.create_user(input).await,
            Self::InMemory(db) => db.create_user(input).await,
        }
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        match self {
            Self::Postgres(db) => db.get_user_by_email(email).await,
            Self::InMemory(db) => db.get_user_by_email(email).await,
        }
    }

    pub async fn get_user(&self, id: i64) -> Result<Option<UserRow>> {
        match self {
            Self::Postgres(db) => db.get_user(id).await,
            Self::InMemory(db) => db.get_user(id).await,
        }
    }

    pub async fn update_user(&self, id: i64, input: UpdateUser) -> Result<Option<UserRow>> {
        match self {
            Self::Postgres(db) => db.update_user(id, input).await,
            Self::InMemory(db) => db.update_user(id, input).await,
        }
    }

    // ============================================
    // Drivers
    // ============================================

    pub async fn create_driver(&self, input: CreateDriverRow) -> Result<DriverRow> {
        match self {
            Self::Postgres(db) => db.create_driver(input).await,
            Self::InMemory(db) => db.create_driver(input).await,
        }
    }

    pub async fn get_driver(&self, id: i64) -> Result<Option<DriverRow>> {
        match self {
            Self::Postgres(db) => db.get_driver(id).await,
            Self::InMemory(db) => db.get_driver(id).await,
        }
    }

    pub async fn list_drivers(&self) -> Result<Vec<DriverRow>> {
        match self {
            Self::Postgres(db) => db.list_drivers().await,
            Self::InMemory(db) => db.list_drivers().await,
        }
    }

    pub async fn list_drivers_by_class(&self, driver_class: &str) -> Result<Vec<DriverRow>> {
        match self {
            Self::Postgres(db) => db.list_drivers_by_class(driver_class).await,
            Self::InMemory(db) => db.list_drivers_by_class(driver_class).await,
        }
    }

    pub async fn list_drivers_by_car(&self, car: &str) -> Result<Vec<DriverRow>> {
        match self {
            Self::Postgres(db) => db.list_drivers_by_car(car).await,
            Self::InMemory(db) => db.list_drivers_by_car(car).await,
        }
    }

    // ============================================
    // Houses
    // ============================================

    pub async fn create_house(&self, input: CreateHouseRow) -> Result<HouseRow> {
        match self {
            Self::Postgres(db) => db.create_house(input).await,
            Self::InMemory(db) => db.create_house(input).await,
        }
    }

    pub async fn get_house(&self, id: i64) -> Result<Option<HouseRow>> {
        match self {
            Self::Postgres(db) => db.get_house(id).await,
            Self::InMemory(db) => db.get_house(id).await,
        }
    }

    pub async fn list_houses(&self) -> Result<Vec<HouseRow>> {
        match self {
            Self::Postgres(db) => db.list_houses().await,
            Self::InMemory(db) => db.list_houses().await,
        }
    }

    pub async fn list_houses_by_street(&self, street: &str) -> Result<Vec<HouseRow>> {
        match self {
            Self::Postgres(db) => db.list_houses_by_street(street).await,
            Self::InMemory(db) => db.list_houses_by_street(street).await,
        }
    }

    pub async fn find_house_id(
        &self,
        street: &str,
        building: Option<&str>,
        number: &str,
    ) -> Result<Option<i64>> {
        match self {
            Self::Postgres(db) => db.find_house_id(street, building, number).await,
            Self::InMemory(db) => db.find_house_id(street, building, number).await,
        }
    }

    // ============================================
    // Orders
    // ============================================

    pub async fn create_order(&self, input: CreateOrderRow) -> Result<OrderRow> {
        match self {
            Self::Postgres(db) => db.create_order(input).await,
            Self::InMemory(db) => db.create_order(input).await,
        }
    }

    pub async fn get_order(&self, id: i64) -> Result<Option<OrderRow>> {
        match self {
            Self::Postgres(db) => db.get_order(id).await,
            Self::InMemory(db) => db.get_order(id).await,
        }
    }

    pub async fn list_orders(&self) -> Result<Vec<OrderRow>> {
        match self {
            Self::Postgres(db) => db.list_orders().await,
            Self::InMemory(db) => db.list_orders().await,
        }
    }

    pub async fn list_user_orders(&self, user_id: i64) -> Result<Vec<OrderRow>> {
        match self {
            Self::Postgres(db) => db.list_user_orders(user_id).await,
            Self::InMemory(db) => db.list_user_orders(user_id).await,
        }
    }

    pub async fn list_driver_orders(&self, driver_id: i64) -> Result<Vec<OrderRow>> {
        match self {
            Self::Postgres(db) => db.list_driver_orders(driver_id).await,
            Self::InMemory(db) => db.list_driver_orders(driver_id).await,
        }
    }

    // ============================================
    // Revocation list
    // ============================================

    pub async fn revoke_token(&self, token: &str) -> Result<()> {
        match self {
            Self::Postgres(db) => db.revoke_token(token).await,
            Self::InMemory(db) => db.revoke_token(token).await,
        }
    }

    pub async fn is_token_revoked(&self, token: &str) -> Result<bool> {
        match self {
            Self::Postgres(db) => db.is_token_revoked(token).await,
            Self::InMemory(db) => db.is_token_revoked(token).await,
        }
    }

    pub async fn list_revoked_tokens(&self) -> Result<Vec<RevokedTokenRow>> {
        match self {
            Self::Postgres(db) => db.list_revoked_tokens().await,
            Self::InMemory(db) => db.list_revoked_tokens().await,
        }
    }

    // ============================================
    // Reference data
    // ============================================

    async fn count_drivers(&self) -> Result<i64> {
        match self {
            Self::Postgres(db) => db.count_drivers().await,
            Self::InMemory(db) => db.count_drivers().await,
        }
    }

    async fn count_houses(&self) -> Result<i64> {
        match self {
            Self::Postgres(db) => db.count_houses().await,
            Self::InMemory(db) => db.count_houses().await,
        }
    }

    /// Insert the bundled drivers and houses into tables that are still empty
    pub async fn seed_reference_data(&self) -> Result<SeedReport> {
        let mut report = SeedReport::default();

        if self.count_drivers().await? == 0 {
            for driver in seed::drivers() {
                self.create_driver(driver).await?;
                report.drivers += 1;
            }
        }

        if self.count_houses().await? == 0 {
            for house in seed::houses() {
                self.create_house(house).await?;
                report.houses += 1;
            }
        }

        tracing::info!(
            drivers = report.drivers,
            houses = report.houses,
            "Reference data seeded"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seed_fills_empty_tables_once() {
        let storage = StorageBackend::in_memory();

        let first = storage.seed_reference_data().await.unwrap();
        assert!(first.drivers > 0);
        assert!(first.houses > 0);

        let second = storage.seed_reference_data().await.unwrap();
        assert_eq!(second, SeedReport::default());
        assert_eq!(storage.list_drivers().await.unwrap().len(), first.drivers);
    }

    #[tokio::test]
    async fn test_seeded_addresses_resolve() {
        let storage = StorageBackend::in_memory();
        storage.seed_reference_data().await.unwrap();

        assert!(storage
            .find_house_id("ул. Пушкина", None, "3")
            .await
            .unwrap()
            .is_some());
        assert!(storage
            .find_house_id("ул. Ленина", Some("1"), "12A")
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_drivers_by_class() {
        let storage = StorageBackend::in_memory();
        storage.seed_reference_data().await.unwrap();

        let business = storage.list_drivers_by_class("business").await.unwrap();
        assert!(!business.is_empty());
        assert!(business.iter().all(|d| d.driver_class == "business"));
    }

    #[test]
    fn test_in_memory_is_dev_mode() {
        assert!(StorageBackend::in_memory().is_dev_mode());
    }
}
