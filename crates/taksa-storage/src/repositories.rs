// PostgreSQL repository
// Decision: Runtime-checked query_as so the crate builds without DATABASE_URL

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::UniqueViolation;
use crate::models::*;

const USER_COLUMNS: &str = "id, name, phone, email, password_hash, created_at";
const DRIVER_COLUMNS: &str = "id, name, phone, car, driver_class";
const HOUSE_COLUMNS: &str = "id, street, building, number";
const ORDER_COLUMNS: &str = "id, user_id, driver_id, driver_class, car, \
     house_from_id, house_from_street, house_from_building, house_from_number, \
     house_to_id, house_to_street, house_to_building, house_to_number, created_at";

/// A unique-index hit on users.email becomes a typed UniqueViolation
fn email_conflict(err: sqlx::Error, context: &'static str) -> anyhow::Error {
    match err.as_database_error() {
        Some(db_err) if db_err.is_unique_violation() => UniqueViolation::USER_EMAIL.into(),
        _ => anyhow::Error::new(err).context(context),
    }
}

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create database connection from URL
    pub async fn from_url(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .context("Failed to connect to PostgreSQL")?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply embedded migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    // ============================================
    // Users
    // ============================================

    pub async fn create_user(&self, input: CreateUserRow) -> Result<UserRow> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users (name, phone, email, password_hash) \
             VALUES ($1, $2, $3, $4) RETURNING {USER_COLUMNS}"
        ))
        .bind(&input.name)
        .bind(&input.phone)
        .bind(&input.email)
        .bind(&input.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| email_conflict(e, "Failed to create user"))?;

        Ok(row)
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_user(&self, id: i64) -> Result<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn update_user(&self, id: i64, input: UpdateUser) -> Result<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users
            SET
                name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                email = COALESCE($4, email)
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&input.name)
        .bind(&input.phone)
        .bind(&input.email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| email_conflict(e, "Failed to update user"))?;

        Ok(row)
    }

    // ============================================
    // Drivers
    // ============================================

    pub async fn create_driver(&self, input: CreateDriverRow) -> Result<DriverRow> {
        let row = sqlx::query_as::<_, DriverRow>(&format!(
            "INSERT INTO drivers (name, phone, car, driver_class) \
             VALUES ($1, $2, $3, $4) RETURNING {DRIVER_COLUMNS}"
        ))
        .bind(&input.name)
        .bind(&input.phone)
        .bind(&input.car)
        .bind(input.driver_class.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_driver(&self, id: i64) -> Result<Option<DriverRow>> {
        let row = sqlx::query_as::<_, DriverRow>(&format!(
            "SELECT {DRIVER_COLUMNS} FROM drivers WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn list_drivers(&self) -> Result<Vec<DriverRow>> {
        let rows = sqlx::query_as::<_, DriverRow>(&format!(
            "SELECT {DRIVER_COLUMNS} FROM drivers ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn list_drivers_by_class(&self, driver_class: &str) -> Result<Vec<DriverRow>> {
        let rows = sqlx::query_as::<_, DriverRow>(&format!(
            "SELECT {DRIVER_COLUMNS} FROM drivers WHERE driver_class = $1 ORDER BY id"
        ))
        .bind(driver_class)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn list_drivers_by_car(&self, car: &str) -> Result<Vec<DriverRow>> {
        let rows = sqlx::query_as::<_, DriverRow>(&format!(
            "SELECT {DRIVER_COLUMNS} FROM drivers WHERE car = $1 ORDER BY id"
        ))
        .bind(car)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    // ============================================
    // Houses
    // ============================================

    pub async fn create_house(&self, input: CreateHouseRow) -> Result<HouseRow> {
        let row = sqlx::query_as::<_, HouseRow>(&format!(
            "INSERT INTO houses (street, building, number) \
             VALUES ($1, $2, $3) RETURNING {HOUSE_COLUMNS}"
        ))
        .bind(&input.street)
        .bind(&input.building)
        .bind(&input.number)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_house(&self, id: i64) -> Result<Option<HouseRow>> {
        let row = sqlx::query_as::<_, HouseRow>(&format!(
            "SELECT {HOUSE_COLUMNS} FROM houses WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn list_houses(&self) -> Result<Vec<HouseRow>> {
        let rows = sqlx::query_as::<_, HouseRow>(&format!(
            "SELECT {HOUSE_COLUMNS} FROM houses ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn list_houses_by_street(&self, street: &str) -> Result<Vec<HouseRow>> {
        let rows = sqlx::query_as::<_, HouseRow>(&format!(
            "SELECT {HOUSE_COLUMNS} FROM houses WHERE street = $1 ORDER BY id"
        ))
        .bind(street)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// `building = None` matches only houses stored without a building
    pub async fn find_house_id(
        &self,
        street: &str,
        building: Option<&str>,
        number: &str,
    ) -> Result<Option<i64>> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT id FROM houses
            WHERE street = $1 AND building IS NOT DISTINCT FROM $2 AND number = $3
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(street)
        .bind(building)
        .bind(number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(id)
    }

    // ============================================
    // Orders
    // ============================================

    pub async fn create_order(&self, input: CreateOrderRow) -> Result<OrderRow> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            r#"
            INSERT INTO orders (
                user_id, driver_id, driver_class, car,
                house_from_id, house_from_street, house_from_building, house_from_number,
                house_to_id, house_to_street, house_to_building, house_to_number
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(input.user_id)
        .bind(input.driver_id)
        .bind(input.driver_class.as_str())
        .bind(&input.car)
        .bind(input.house_from_id)
        .bind(&input.house_from.street)
        .bind(&input.house_from.building)
        .bind(&input.house_from.number)
        .bind(input.house_to_id)
        .bind(&input.house_to.street)
        .bind(&input.house_to.building)
        .bind(&input.house_to.number)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_order(&self, id: i64) -> Result<Option<OrderRow>> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn list_orders(&self) -> Result<Vec<OrderRow>> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn list_user_orders(&self, user_id: i64) -> Result<Vec<OrderRow>> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = $1 ORDER BY id"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn list_driver_orders(&self, driver_id: i64) -> Result<Vec<OrderRow>> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE driver_id = $1 ORDER BY id"
        ))
        .bind(driver_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    // ============================================
    // Revocation list
    // ============================================

    /// Idempotent: a token already on the list is left as is
    pub async fn revoke_token(&self, token: &str) -> Result<()> {
        sqlx::query("INSERT INTO crl (id, token) VALUES ($1, $2) ON CONFLICT (token) DO NOTHING")
            .bind(Uuid::now_v7())
            .bind(token)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn is_token_revoked(&self, token: &str) -> Result<bool> {
        let revoked =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM crl WHERE token = $1)")
                .bind(token)
                .fetch_one(&self.pool)
                .await?;

        Ok(revoked)
    }

    pub async fn list_revoked_tokens(&self) -> Result<Vec<RevokedTokenRow>> {
        let rows = sqlx::query_as::<_, RevokedTokenRow>("SELECT id, token FROM crl ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    // ============================================
    // Reference data
    // ============================================

    pub async fn count_drivers(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM drivers")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn count_houses(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM houses")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
