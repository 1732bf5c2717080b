use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::types::{CarModelId, HubId, VehicleId, VehicleStatus};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Vehicle {
    pub id: VehicleId,
    pub hub_id: HubId,
    pub car_model_id: CarModelId,
    pub license_plate: String,
    pub vin: String,
    pub status: VehicleStatus,
    pub kilometers_travelled: i32,
    pub pending_cleaning: bool,
    pub pending_repairs: bool,
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct NewVehicle {
    pub hub_id: HubId,
    pub car_model_id: CarModelId,
    #[validate(length(min = 1, max = 16))]
    pub license_plate: String,
    #[validate(length(min = 11, max = 17))]
    pub vin: String,
    pub status: VehicleStatus,
    #[validate(range(min = 0))]
    pub kilometers_travelled: i32,
    #[serde(default)]
    pub pending_cleaning: bool,
    #[serde(default)]
    pub pending_repairs: bool,
}

/// Full replacement of a vehicle's mutable attributes.
#[derive(Clone, Debug, Deserialize, Validate)]
pub struct UpdateVehicle {
    pub car_model_id: CarModelId,
    #[validate(length(min = 1, max = 16))]
    pub license_plate: String,
    #[validate(length(min = 11, max = 17))]
    pub vin: String,
    pub status: VehicleStatus,
    #[validate(range(min = 0))]
    pub kilometers_travelled: i32,
    #[serde(default)]
    pub pending_cleaning: bool,
    #[serde(default)]
    pub pending_repairs: bool,
}

impl NewVehicle {
    /// Normalizes identifiers so lookups and uniqueness are case-insensitive.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.license_plate = self.license_plate.trim().to_uppercase();
        self.vin = self.vin.trim().to_uppercase();
        self
    }
}

impl UpdateVehicle {
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.license_plate = self.license_plate.trim().to_uppercase();
        self.vin = self.vin.trim().to_uppercase();
        self
    }
}
