//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod check;
pub mod item;
pub mod locker;
pub mod session;
pub mod station;
pub mod truck;
pub mod user;
pub mod user_station;
