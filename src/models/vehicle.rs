use diesel::prelude::*;

use crate::domain::types::{CarModelId, HubId, TypeConstraintError, VehicleId};
use crate::domain::vehicle::{
    NewVehicle as DomainNewVehicle, UpdateVehicle as DomainUpdateVehicle, Vehicle as DomainVehicle,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::vehicles)]
/// Diesel model for [`crate::domain::vehicle::Vehicle`].
pub struct Vehicle {
    pub id: i32,
    pub hub_id: i32,
    pub car_model_id: i32,
    pub license_plate: String,
    pub vin: String,
    pub status: String,
    pub kilometers_travelled: i32,
    pub pending_cleaning: bool,
    pub pending_repairs: bool,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::vehicles)]
pub struct NewVehicle<'a> {
    pub hub_id: i32,
    pub car_model_id: i32,
    pub license_plate: &'a str,
    pub vin: &'a str,
    pub status: &'static str,
    pub kilometers_travelled: i32,
    pub pending_cleaning: bool,
    pub pending_repairs: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::vehicles)]
pub struct UpdateVehicle<'a> {
    pub car_model_id: i32,
    pub license_plate: &'a str,
    pub vin: &'a str,
    pub status: &'static str,
    pub kilometers_travelled: i32,
    pub pending_cleaning: bool,
    pub pending_repairs: bool,
}

impl TryFrom<Vehicle> for DomainVehicle {
    type Error = TypeConstraintError;

    fn try_from(db: Vehicle) -> Result<Self, Self::Error> {
        Ok(Self {
            id: VehicleId::new(db.id)?,
            hub_id: HubId::new(db.hub_id)?,
            car_model_id: CarModelId::new(db.car_model_id)?,
            license_plate: db.license_plate,
            vin: db.vin,
            status: db.status.parse()?,
            kilometers_travelled: db.kilometers_travelled,
            pending_cleaning: db.pending_cleaning,
            pending_repairs: db.pending_repairs,
        })
    }
}

impl<'a> From<&'a DomainNewVehicle> for NewVehicle<'a> {
    fn from(vehicle: &'a DomainNewVehicle) -> Self {
        Self {
            hub_id: vehicle.hub_id.get(),
            car_model_id: vehicle.car_model_id.get(),
            license_plate: &vehicle.license_plate,
            vin: &vehicle.vin,
            status: vehicle.status.as_str(),
            kilometers_travelled: vehicle.kilometers_travelled,
            pending_cleaning: vehicle.pending_cleaning,
            pending_repairs: vehicle.pending_repairs,
        }
    }
}

impl<'a> From<&'a DomainUpdateVehicle> for UpdateVehicle<'a> {
    fn from(vehicle: &'a DomainUpdateVehicle) -> Self {
        Self {
            car_model_id: vehicle.car_model_id.get(),
            license_plate: &vehicle.license_plate,
            vin: &vehicle.vin,
            status: vehicle.status.as_str(),
            kilometers_travelled: vehicle.kilometers_travelled,
            pending_cleaning: vehicle.pending_cleaning,
            pending_repairs: vehicle.pending_repairs,
        }
    }
}
