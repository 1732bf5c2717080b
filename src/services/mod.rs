//! Application services orchestrating repositories and the listing engine.

pub mod car_model;
pub mod errors;
pub mod listing;
pub mod maintenance_record;
pub mod vehicle;
pub mod vehicle_note;

pub use errors::{ServiceError, ServiceResult};
