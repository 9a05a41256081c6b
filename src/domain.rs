//! Record types decoded from fixture documents.
//!
//! Each record mirrors the JSON document layout of one collection. Optional
//! document keys map to `Option`, embedded lists to owned `Vec`s.

pub mod course;
pub mod driver;
pub mod group;
pub mod inventory;

pub use self::course::{Course, Professor};
pub use self::driver::{Driver, DriverContainer, Vehicle};
pub use self::group::{Group, User};
pub use self::inventory::InventoryVehicle;
