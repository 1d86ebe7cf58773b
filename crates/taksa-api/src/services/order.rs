// Order service: driver matching and ride history
// Decision: A driver is picked uniformly at random from the requested class
// Decision: Both addresses must already exist in the house directory
// Decision: The rider must still exist; a token alone is not enough

use anyhow::Result;
use rand::seq::SliceRandom;
use taksa_core::{Driver, DriverClass, Order};
use taksa_storage::{models::CreateOrderRow, OrderRow, StorageBackend};
use thiserror::Error;

use crate::api::orders::CreateOrderRequest;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("User not found")]
    UserNotFound(i64),
    #[error("No drivers available for the selected class")]
    NoDriversAvailable(DriverClass),
    #[error("Unknown {0} address")]
    InvalidLocation(&'static str),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

#[derive(Clone)]
pub struct OrderService {
    storage: StorageBackend,
}

impl OrderService {
    pub fn new(storage: StorageBackend) -> Self {
        Self { storage }
    }

    /// Match a driver and book a ride for `user_id`
    pub async fn create(&self, user_id: i64, req: CreateOrderRequest) -> Result<Order, OrderError> {
        if self.storage.get_user(user_id).await?.is_none() {
            return Err(OrderError::UserNotFound(user_id));
        }

        let drivers = self
            .storage
            .list_drivers_by_class(req.driver_class.as_str())
            .await?;

        let driver_row = drivers
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or(OrderError::NoDriversAvailable(req.driver_class))?;
        let driver = Driver::try_from(driver_row).map_err(anyhow::Error::from)?;

        let house_from_id = self
            .storage
            .find_house_id(
                &req.house_from.street,
                req.house_from.building.as_deref(),
                &req.house_from.number,
            )
            .await?
            .ok_or(OrderError::InvalidLocation("departure"))?;
        let house_to_id = self
            .storage
            .find_house_id(
                &req.house_to.street,
                req.house_to.building.as_deref(),
                &req.house_to.number,
            )
            .await?
            .ok_or(OrderError::InvalidLocation("arrival"))?;

        let row = self
            .storage
            .create_order(CreateOrderRow {
                user_id,
                driver_id: driver.id,
                driver_class: driver.driver_class,
                car: driver.car,
                house_from_id,
                house_from: req.house_from,
                house_to_id,
                house_to: req.house_to,
            })
            .await?;

        tracing::info!(
            order_id = row.id,
            user_id,
            driver_id = row.driver_id,
            "Order created"
        );
        Ok(Self::row_to_order(row)?)
    }

    pub async fn get(&self, id: i64) -> Result<Option<Order>> {
        self.storage
            .get_order(id)
            .await?
            .map(Self::row_to_order)
            .transpose()
    }

    pub async fn list(&self) -> Result<Vec<Order>> {
        Self::rows_to_orders(self.storage.list_orders().await?)
    }

    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<Order>> {
        Self::rows_to_orders(self.storage.list_user_orders(user_id).await?)
    }

    pub async fn list_for_driver(&self, driver_id: i64) -> Result<Vec<Order>> {
        Self::rows_to_orders(self.storage.list_driver_orders(driver_id).await?)
    }

    fn row_to_order(row: OrderRow) -> Result<Order> {
        Ok(Order::try_from(row)?)
    }

    fn rows_to_orders(rows: Vec<OrderRow>) -> Result<Vec<Order>> {
        rows.into_iter().map(Self::row_to_order).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taksa_core::Address;
    use taksa_storage::models::{CreateDriverRow, CreateHouseRow, CreateUserRow};

    fn address(street: &str, building: Option<&str>, number: &str) -> Address {
        Address {
            street: street.to_string(),
            building: building.map(str::to_string),
            number: number.to_string(),
        }
    }

    async fn storage_with_fixtures() -> StorageBackend {
        let storage = StorageBackend::in_memory();
        // riders 1..=6
        for n in 1..=6 {
            storage
                .create_user(CreateUserRow {
                    name: format!("Rider {n}"),
                    phone: "+7 (900) 000 00-00".to_string(),
                    email: format!("rider{n}@example.com"),
                    password_hash: "unused".to_string(),
                })
                .await
                .unwrap();
        }
        for (name, car, class) in [
            ("Econom One", "Kia Rio", DriverClass::Econom),
            ("Econom Two", "Lada Vesta", DriverClass::Econom),
            ("Business One", "BMW 5", DriverClass::Business),
        ] {
            storage
                .create_driver(CreateDriverRow {
                    name: name.to_string(),
                    phone: "+7 (900) 000 00-00".to_string(),
                    car: car.to_string(),
                    driver_class: class,
                })
                .await
                .unwrap();
        }
        for (street, building, number) in [("Lenina", Some("1"), "12A"), ("Pushkina", None, "3")] {
            storage
                .create_house(CreateHouseRow {
                    street: street.to_string(),
                    building: building.map(str::to_string),
                    number: number.to_string(),
                })
                .await
                .unwrap();
        }
        storage
    }

    fn request(driver_class: DriverClass) -> CreateOrderRequest {
        CreateOrderRequest {
            house_from: address("Lenina", Some("1"), "12A"),
            house_to: address("Pushkina", None, "3"),
            driver_class,
        }
    }

    #[tokio::test]
    async fn test_create_matches_driver_of_class() {
        let service = OrderService::new(storage_with_fixtures().await);

        for _ in 0..10 {
            let order = service.create(1, request(DriverClass::Econom)).await.unwrap();
            assert_eq!(order.driver_class, DriverClass::Econom);
            assert!(order.car == "Kia Rio" || order.car == "Lada Vesta");
            assert_eq!(order.house_from_id, 1);
            assert_eq!(order.house_to_id, 2);
        }
    }

    #[tokio::test]
    async fn test_create_without_drivers_of_class() {
        let service = OrderService::new(storage_with_fixtures().await);

        let err = service
            .create(1, request(DriverClass::Comfortable))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            OrderError::NoDriversAvailable(DriverClass::Comfortable)
        ));
    }

    #[tokio::test]
    async fn test_create_with_unknown_address() {
        let service = OrderService::new(storage_with_fixtures().await);
        let mut req = request(DriverClass::Business);
        // Pushkina 3 has no building
        req.house_to.building = Some("2".to_string());

        let err = service.create(1, req).await.unwrap_err();
        assert!(matches!(err, OrderError::InvalidLocation("arrival")));
    }

    #[tokio::test]
    async fn test_history_by_user_and_driver() {
        let service = OrderService::new(storage_with_fixtures().await);
        let order = service.create(5, request(DriverClass::Business)).await.unwrap();
        service.create(6, request(DriverClass::Business)).await.unwrap();

        assert_eq!(service.list_for_user(5).await.unwrap().len(), 1);
        assert_eq!(service.list_for_driver(order.driver_id).await.unwrap().len(), 2);
        assert_eq!(service.list().await.unwrap().len(), 2);
        assert_eq!(service.get(order.id).await.unwrap().unwrap().user_id, 5);
        assert!(service.get(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_for_unknown_user() {
        let service = OrderService::new(storage_with_fixtures().await);

        let err = service
            .create(999, request(DriverClass::Econom))
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::UserNotFound(999)));
        assert!(service.list().await.unwrap().is_empty());
    }
}
