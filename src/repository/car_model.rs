//! Repository implementation for the car model catalogue.

use diesel::prelude::*;

use crate::domain::car_model::{CarModel, NewCarModel};
use crate::domain::types::CarModelId;
use crate::models::car_model::{CarModel as DbCarModel, NewCarModel as DbNewCarModel};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CarModelReader, CarModelWriter, DieselRepository};
use crate::schema::car_models;

impl CarModelReader for DieselRepository {
    fn get_car_model_by_id(&self, id: CarModelId) -> RepositoryResult<Option<CarModel>> {
        let mut conn = self.conn()?;
        let model = car_models::table
            .find(id.get())
            .first::<DbCarModel>(&mut conn)
            .optional()?;

        model
            .map(CarModel::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_car_models(&self) -> RepositoryResult<Vec<CarModel>> {
        let mut conn = self.conn()?;

        car_models::table
            .order((car_models::brand.asc(), car_models::model.asc(), car_models::id.asc()))
            .load::<DbCarModel>(&mut conn)?
            .into_iter()
            .map(|db| CarModel::try_from(db).map_err(RepositoryError::from))
            .collect()
    }
}

impl CarModelWriter for DieselRepository {
    fn create_car_model(&self, new_model: &NewCarModel) -> RepositoryResult<CarModel> {
        let mut conn = self.conn()?;
        let insertable: DbNewCarModel = new_model.into();

        let created = diesel::insert_into(car_models::table)
            .values(&insertable)
            .get_result::<DbCarModel>(&mut conn)?;

        Ok(CarModel::try_from(created)?)
    }

    fn update_car_model(
        &self,
        id: CarModelId,
        updates: &NewCarModel,
    ) -> RepositoryResult<CarModel> {
        let mut conn = self.conn()?;
        let changes: DbNewCarModel = updates.into();

        let updated = diesel::update(car_models::table.find(id.get()))
            .set(&changes)
            .get_result::<DbCarModel>(&mut conn)?;

        Ok(CarModel::try_from(updated)?)
    }

    fn delete_car_model(&self, id: CarModelId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(car_models::table.find(id.get())).execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
