use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::car_model::{CarModel, NewCarModel};
use crate::domain::maintenance_record::{
    MaintenanceRecord, NewMaintenanceRecord, UpdateMaintenanceRecord,
};
use crate::domain::types::{CarModelId, MaintenanceRecordId, VehicleId, VehicleNoteId};
use crate::domain::vehicle::{NewVehicle, UpdateVehicle, Vehicle};
use crate::domain::vehicle_note::{NewVehicleNote, UpdateVehicleNote, VehicleNote};
use crate::repository::errors::RepositoryResult;

pub mod car_model;
pub mod errors;
pub mod maintenance_record;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
mod sql;
pub mod vehicle;
pub mod vehicle_note;

/// Diesel-backed repository implementing every reader, writer and
/// [`crate::query::PageSource`] of the crate.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        get_connection(&self.pool)
    }
}

pub trait CarModelReader {
    fn get_car_model_by_id(&self, id: CarModelId) -> RepositoryResult<Option<CarModel>>;
    fn list_car_models(&self) -> RepositoryResult<Vec<CarModel>>;
}

pub trait CarModelWriter {
    fn create_car_model(&self, new_model: &NewCarModel) -> RepositoryResult<CarModel>;
    fn update_car_model(&self, id: CarModelId, updates: &NewCarModel) -> RepositoryResult<CarModel>;
    fn delete_car_model(&self, id: CarModelId) -> RepositoryResult<()>;
}

pub trait VehicleReader {
    fn get_vehicle_by_id(&self, id: VehicleId) -> RepositoryResult<Option<Vehicle>>;
}

pub trait VehicleWriter {
    fn create_vehicle(&self, new_vehicle: &NewVehicle) -> RepositoryResult<Vehicle>;
    fn update_vehicle(&self, id: VehicleId, updates: &UpdateVehicle) -> RepositoryResult<Vehicle>;
    fn delete_vehicle(&self, id: VehicleId) -> RepositoryResult<()>;
}

pub trait MaintenanceRecordReader {
    fn get_maintenance_record_by_id(
        &self,
        id: MaintenanceRecordId,
    ) -> RepositoryResult<Option<MaintenanceRecord>>;
}

pub trait MaintenanceRecordWriter {
    fn create_maintenance_record(
        &self,
        record: &NewMaintenanceRecord,
    ) -> RepositoryResult<MaintenanceRecord>;
    fn update_maintenance_record(
        &self,
        id: MaintenanceRecordId,
        updates: &UpdateMaintenanceRecord,
    ) -> RepositoryResult<MaintenanceRecord>;
    fn delete_maintenance_record(&self, id: MaintenanceRecordId) -> RepositoryResult<()>;
}

pub trait VehicleNoteReader {
    fn get_vehicle_note_by_id(&self, id: VehicleNoteId) -> RepositoryResult<Option<VehicleNote>>;
}

pub trait VehicleNoteWriter {
    fn create_vehicle_note(&self, note: &NewVehicleNote) -> RepositoryResult<VehicleNote>;
    fn update_vehicle_note(
        &self,
        id: VehicleNoteId,
        updates: &UpdateVehicleNote,
    ) -> RepositoryResult<VehicleNote>;
    fn delete_vehicle_note(&self, id: VehicleNoteId) -> RepositoryResult<()>;
}
