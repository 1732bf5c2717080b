//! Services managing a hub's vehicles.

use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{CarModelId, HubId, VehicleId};
use crate::domain::vehicle::{NewVehicle, UpdateVehicle, Vehicle};
use crate::models::config::PagingConfig;
use crate::query::{FilterSpec, PageResult, PageSource, VEHICLES, list_filtered};
use crate::repository::{CarModelReader, VehicleReader, VehicleWriter};
use crate::services::listing::{page_request, sort_spec};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters of the vehicles listing.
#[derive(Debug, Default, Deserialize)]
pub struct VehicleListParams {
    pub status: Option<String>,
    pub car_model_id: Option<String>,
    pub page: Option<u64>,
    pub size: Option<u32>,
    pub sort: Option<String>,
}

pub fn list_vehicles<R>(
    repo: &R,
    hub_id: HubId,
    params: &VehicleListParams,
    paging: &PagingConfig,
) -> ServiceResult<PageResult<Vehicle>>
where
    R: PageSource<Vehicle> + ?Sized,
{
    let filters = FilterSpec::from_pairs(
        &VEHICLES,
        hub_id.get(),
        [
            ("status", params.status.as_deref()),
            ("car_model_id", params.car_model_id.as_deref()),
        ],
    )?;
    let sort = sort_spec(&VEHICLES, params.sort.as_deref())?;
    let page = page_request(params.page, params.size, paging)?;

    list_filtered(repo, &filters, &sort, &page, paging.max_page_size).map_err(|err| {
        if err.is_client_error() {
            log::debug!("Failed to list vehicles of hub {hub_id}: {err}");
        } else {
            log::error!("Failed to list vehicles of hub {hub_id}: {err}");
        }
        ServiceError::from(err)
    })
}

/// Fetches a vehicle of the hub; vehicles of other hubs are reported missing.
pub fn get_vehicle<R>(repo: &R, hub_id: HubId, vehicle_id: VehicleId) -> ServiceResult<Vehicle>
where
    R: VehicleReader + ?Sized,
{
    repo.get_vehicle_by_id(vehicle_id)
        .map_err(|err| {
            log::error!("Failed to load vehicle {vehicle_id}: {err}");
            err
        })?
        .filter(|vehicle| vehicle.hub_id == hub_id)
        .ok_or(ServiceError::NotFound)
}

fn ensure_car_model<R>(repo: &R, car_model_id: CarModelId) -> ServiceResult<()>
where
    R: CarModelReader + ?Sized,
{
    match repo.get_car_model_by_id(car_model_id)? {
        Some(_) => Ok(()),
        None => Err(ServiceError::InvalidInput(format!(
            "car model {car_model_id} does not exist"
        ))),
    }
}

/// Registers a vehicle. Plate and VIN are stored upper-cased.
pub fn create_vehicle<R>(repo: &R, new_vehicle: NewVehicle) -> ServiceResult<Vehicle>
where
    R: CarModelReader + VehicleWriter + ?Sized,
{
    let new_vehicle = new_vehicle.normalized();
    new_vehicle.validate()?;
    ensure_car_model(repo, new_vehicle.car_model_id)?;

    repo.create_vehicle(&new_vehicle).map_err(|err| {
        log::error!(
            "Failed to create vehicle {} in hub {}: {err}",
            new_vehicle.license_plate,
            new_vehicle.hub_id
        );
        ServiceError::from(err)
    })
}

pub fn update_vehicle<R>(
    repo: &R,
    hub_id: HubId,
    vehicle_id: VehicleId,
    updates: UpdateVehicle,
) -> ServiceResult<Vehicle>
where
    R: CarModelReader + VehicleReader + VehicleWriter + ?Sized,
{
    let updates = updates.normalized();
    updates.validate()?;
    get_vehicle(repo, hub_id, vehicle_id)?;
    ensure_car_model(repo, updates.car_model_id)?;

    repo.update_vehicle(vehicle_id, &updates).map_err(|err| {
        log::error!("Failed to update vehicle {vehicle_id}: {err}");
        ServiceError::from(err)
    })
}

/// Deletes a vehicle together with its maintenance history and notes.
pub fn delete_vehicle<R>(repo: &R, hub_id: HubId, vehicle_id: VehicleId) -> ServiceResult<()>
where
    R: VehicleReader + VehicleWriter + ?Sized,
{
    get_vehicle(repo, hub_id, vehicle_id)?;

    repo.delete_vehicle(vehicle_id).map_err(|err| {
        log::error!("Failed to delete vehicle {vehicle_id}: {err}");
        ServiceError::from(err)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::car_model::CarModel;
    use crate::domain::types::VehicleStatus;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    fn hub(id: i32) -> HubId {
        HubId::new(id).expect("valid hub id")
    }

    fn vehicle(id: i32, hub_id: i32) -> Vehicle {
        Vehicle {
            id: VehicleId::new(id).unwrap(),
            hub_id: hub(hub_id),
            car_model_id: CarModelId::new(4).unwrap(),
            license_plate: "AB123CD".into(),
            vin: "WVWZZZ1JZXW000001".into(),
            status: VehicleStatus::Available,
            kilometers_travelled: 0,
            pending_cleaning: false,
            pending_repairs: false,
        }
    }

    fn car_model(id: i32) -> CarModel {
        CarModel {
            id: CarModelId::new(id).unwrap(),
            brand: "Volkswagen".into(),
            model: "Golf".into(),
            year: 2022,
            segment: "C".into(),
            doors: 5,
            seats: 5,
            fuel_type: "PETROL".into(),
            transmission: "MANUAL".into(),
            price_per_day: 45.0,
        }
    }

    fn new_vehicle() -> NewVehicle {
        NewVehicle {
            hub_id: hub(1),
            car_model_id: CarModelId::new(4).unwrap(),
            license_plate: " ab123cd ".into(),
            vin: "wvwzzz1jzxw000001".into(),
            status: VehicleStatus::Available,
            kilometers_travelled: 0,
            pending_cleaning: false,
            pending_repairs: false,
        }
    }

    #[test]
    fn create_normalizes_identifiers() {
        let mut repo = MockRepository::new();
        repo.expect_get_car_model_by_id()
            .returning(|id| Ok(Some(car_model(id.get()))));
        repo.expect_create_vehicle()
            .withf(|v| v.license_plate == "AB123CD" && v.vin == "WVWZZZ1JZXW000001")
            .times(1)
            .returning(|_| Ok(vehicle(1, 1)));

        create_vehicle(&repo, new_vehicle()).expect("vehicle is created");
    }

    #[test]
    fn create_with_unknown_car_model_is_rejected() {
        let mut repo = MockRepository::new();
        repo.expect_get_car_model_by_id().returning(|_| Ok(None));
        repo.expect_create_vehicle().times(0);

        let result = create_vehicle(&repo, new_vehicle());

        assert!(matches!(result, Err(ServiceError::InvalidInput(_))));
    }

    #[test]
    fn duplicate_plate_is_a_conflict() {
        let mut repo = MockRepository::new();
        repo.expect_get_car_model_by_id()
            .returning(|id| Ok(Some(car_model(id.get()))));
        repo.expect_create_vehicle().returning(|_| {
            Err(RepositoryError::ConstraintViolation(
                "Unique constraint violation".into(),
            ))
        });

        let result = create_vehicle(&repo, new_vehicle());

        assert!(matches!(result, Err(ServiceError::Conflict(_))));
    }

    #[test]
    fn vehicle_of_another_hub_cannot_be_deleted() {
        let mut repo = MockRepository::new();
        repo.expect_get_vehicle_by_id()
            .returning(|id| Ok(Some(vehicle(id.get(), 2))));
        repo.expect_delete_vehicle().times(0);

        let result = delete_vehicle(&repo, hub(1), VehicleId::new(9).unwrap());

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn update_checks_hub_then_car_model() {
        let mut repo = MockRepository::new();
        repo.expect_get_vehicle_by_id()
            .returning(|id| Ok(Some(vehicle(id.get(), 1))));
        repo.expect_get_car_model_by_id()
            .returning(|id| Ok(Some(car_model(id.get()))));
        repo.expect_update_vehicle()
            .withf(|id, updates| id.get() == 9 && updates.status == VehicleStatus::Rented)
            .times(1)
            .returning(|id, _| Ok(vehicle(id.get(), 1)));

        let updates = UpdateVehicle {
            car_model_id: CarModelId::new(4).unwrap(),
            license_plate: "AB123CD".into(),
            vin: "WVWZZZ1JZXW000001".into(),
            status: VehicleStatus::Rented,
            kilometers_travelled: 150,
            pending_cleaning: true,
            pending_repairs: false,
        };

        update_vehicle(&repo, hub(1), VehicleId::new(9).unwrap(), updates)
            .expect("vehicle is updated");
    }

    #[test]
    fn listing_rejects_unknown_status() {
        struct Unreachable;

        impl PageSource<Vehicle> for Unreachable {
            fn count_matching(
                &self,
                _predicates: &[crate::query::Predicate],
            ) -> crate::repository::errors::RepositoryResult<u64> {
                panic!("storage must not be queried");
            }

            fn fetch_page(
                &self,
                _predicates: &[crate::query::Predicate],
                _sort: &crate::query::SortSpec,
                _page: &crate::query::PageRequest,
            ) -> crate::repository::errors::RepositoryResult<Vec<Vehicle>> {
                panic!("storage must not be queried");
            }
        }

        let params = VehicleListParams {
            status: Some("parked".into()),
            ..Default::default()
        };

        let result = list_vehicles(&Unreachable, hub(1), &params, &PagingConfig::default());

        assert!(matches!(result, Err(ServiceError::InvalidInput(_))));
    }
}
