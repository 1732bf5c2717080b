//! Domain aggregates exposed by the fleet service layer.

pub mod car_model;
pub mod maintenance_record;
pub mod types;
pub mod vehicle;
pub mod vehicle_note;
