//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod check_repo;
pub mod item_repo;
pub mod locker_repo;
pub mod session_repo;
pub mod station_repo;
pub mod truck_repo;
pub mod user_repo;
pub mod user_station_repo;

pub use check_repo::CheckRepo;
pub use item_repo::ItemRepo;
pub use locker_repo::LockerRepo;
pub use session_repo::SessionRepo;
pub use station_repo::StationRepo;
pub use truck_repo::TruckRepo;
pub use user_repo::UserRepo;
pub use user_station_repo::UserStationRepo;
