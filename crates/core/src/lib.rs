//! Shared domain types for the TruckChecks backend.

pub mod error;
pub mod roles;
pub mod types;
