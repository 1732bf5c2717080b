//! Services for the car model catalogue.

use validator::Validate;

use crate::domain::car_model::{CarModel, NewCarModel};
use crate::domain::types::CarModelId;
use crate::repository::{CarModelReader, CarModelWriter};
use crate::services::{ServiceError, ServiceResult};

pub fn get_car_model<R>(repo: &R, id: CarModelId) -> ServiceResult<CarModel>
where
    R: CarModelReader + ?Sized,
{
    repo.get_car_model_by_id(id)
        .map_err(|err| {
            log::error!("Failed to load car model {id}: {err}");
            err
        })?
        .ok_or(ServiceError::NotFound)
}

/// Returns the whole catalogue ordered by brand and model.
pub fn list_car_models<R>(repo: &R) -> ServiceResult<Vec<CarModel>>
where
    R: CarModelReader + ?Sized,
{
    repo.list_car_models().map_err(|err| {
        log::error!("Failed to list car models: {err}");
        ServiceError::from(err)
    })
}

pub fn create_car_model<R>(repo: &R, new_model: &NewCarModel) -> ServiceResult<CarModel>
where
    R: CarModelWriter + ?Sized,
{
    new_model.validate()?;

    repo.create_car_model(new_model).map_err(|err| {
        log::error!("Failed to create car model: {err}");
        ServiceError::from(err)
    })
}

pub fn update_car_model<R>(
    repo: &R,
    id: CarModelId,
    updates: &NewCarModel,
) -> ServiceResult<CarModel>
where
    R: CarModelReader + CarModelWriter + ?Sized,
{
    updates.validate()?;
    get_car_model(repo, id)?;

    repo.update_car_model(id, updates).map_err(|err| {
        log::error!("Failed to update car model {id}: {err}");
        ServiceError::from(err)
    })
}

/// Deletes a car model. A model still referenced by vehicles is a conflict.
pub fn delete_car_model<R>(repo: &R, id: CarModelId) -> ServiceResult<()>
where
    R: CarModelWriter + ?Sized,
{
    repo.delete_car_model(id).map_err(|err| {
        log::error!("Failed to delete car model {id}: {err}");
        ServiceError::from(err)
    })
}
