//! Database models and configuration shared across the fleet repository.

pub mod car_model;
pub mod config;
pub mod maintenance_record;
pub mod vehicle;
pub mod vehicle_note;
