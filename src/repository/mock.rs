//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::car_model::{CarModel, NewCarModel};
use crate::domain::maintenance_record::{
    MaintenanceRecord, NewMaintenanceRecord, UpdateMaintenanceRecord,
};
use crate::domain::types::{CarModelId, MaintenanceRecordId, VehicleId, VehicleNoteId};
use crate::domain::vehicle::{NewVehicle, UpdateVehicle, Vehicle};
use crate::domain::vehicle_note::{NewVehicleNote, UpdateVehicleNote, VehicleNote};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    CarModelReader, CarModelWriter, MaintenanceRecordReader, MaintenanceRecordWriter,
    VehicleNoteReader, VehicleNoteWriter, VehicleReader, VehicleWriter,
};

mock! {
    pub Repository {}

    impl CarModelReader for Repository {
        fn get_car_model_by_id(&self, id: CarModelId) -> RepositoryResult<Option<CarModel>>;
        fn list_car_models(&self) -> RepositoryResult<Vec<CarModel>>;
    }

    impl CarModelWriter for Repository {
        fn create_car_model(&self, new_model: &NewCarModel) -> RepositoryResult<CarModel>;
        fn update_car_model(
            &self,
            id: CarModelId,
            updates: &NewCarModel,
        ) -> RepositoryResult<CarModel>;
        fn delete_car_model(&self, id: CarModelId) -> RepositoryResult<()>;
    }

    impl VehicleReader for Repository {
        fn get_vehicle_by_id(&self, id: VehicleId) -> RepositoryResult<Option<Vehicle>>;
    }

    impl VehicleWriter for Repository {
        fn create_vehicle(&self, new_vehicle: &NewVehicle) -> RepositoryResult<Vehicle>;
        fn update_vehicle(
            &self,
            id: VehicleId,
            updates: &UpdateVehicle,
        ) -> RepositoryResult<Vehicle>;
        fn delete_vehicle(&self, id: VehicleId) -> RepositoryResult<()>;
    }

    impl MaintenanceRecordReader for Repository {
        fn get_maintenance_record_by_id(
            &self,
            id: MaintenanceRecordId,
        ) -> RepositoryResult<Option<MaintenanceRecord>>;
    }

    impl MaintenanceRecordWriter for Repository {
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

    impl VehicleNoteReader for Repository {
        fn get_vehicle_note_by_id(
            &self,
            id: VehicleNoteId,
        ) -> RepositoryResult<Option<VehicleNote>>;
    }

    impl VehicleNoteWriter for Repository {
        fn create_vehicle_note(&self, note: &NewVehicleNote) -> RepositoryResult<VehicleNote>;
        fn update_vehicle_note(
            &self,
            id: VehicleNoteId,
            updates: &UpdateVehicleNote,
        ) -> RepositoryResult<VehicleNote>;
        fn delete_vehicle_note(&self, id: VehicleNoteId) -> RepositoryResult<()>;
    }
}
