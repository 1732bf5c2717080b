use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::types::CarModelId;

/// Catalogue entry describing a rentable car model.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CarModel {
    pub id: CarModelId,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub segment: String,
    pub doors: i32,
    pub seats: i32,
    pub fuel_type: String,
    pub transmission: String,
    pub price_per_day: f64,
}

/// Payload used both to create and to fully replace a car model.
#[derive(Clone, Debug, Deserialize, Validate)]
pub struct NewCarModel {
    #[validate(length(min = 1, max = 64))]
    pub brand: String,
    #[validate(length(min = 1, max = 64))]
    pub model: String,
    #[validate(range(min = 1900, max = 2100))]
    pub year: i32,
    #[validate(length(min = 1, max = 32))]
    pub segment: String,
    #[validate(range(min = 1, max = 9))]
    pub doors: i32,
    #[validate(range(min = 1, max = 60))]
    pub seats: i32,
    #[validate(length(min = 1, max = 32))]
    pub fuel_type: String,
    #[validate(length(min = 1, max = 32))]
    pub transmission: String,
    #[validate(range(min = 0.0))]
    pub price_per_day: f64,
}
