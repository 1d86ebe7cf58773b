// Storage for the taxi booking backend
//
// - Database: PostgreSQL repository (sqlx)
// - InMemoryDatabase: dev mode and tests
// - StorageBackend: enum dispatch over both
// - password: Argon2id credential hashing

pub mod backend;
pub mod errors;
pub mod memory;
pub mod models;
pub mod password;
pub mod repositories;
pub mod seed;

pub use backend::{SeedReport, StorageBackend};
pub use errors::{is_unique_violation, UniqueViolation};
pub use memory::InMemoryDatabase;
pub use models::*;
pub use password::{hash_password, verify_password};
pub use repositories::Database;
