// Taksa core domain types
//
// DB-agnostic entity types shared by the storage and API crates:
// - User: rider profile (never carries the password hash)
// - Driver / DriverClass: fleet members and their service class
// - House / Address: known pickup and drop-off points
// - Order: a ride matched to a driver

pub mod driver;
pub mod house;
pub mod order;
pub mod telemetry;
pub mod user;

pub use driver::{Driver, DriverClass, UnknownDriverClass};
pub use house::{Address, House};
pub use order::Order;
pub use user::User;
