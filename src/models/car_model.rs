use diesel::prelude::*;

use crate::domain::car_model::{CarModel as DomainCarModel, NewCarModel as DomainNewCarModel};
use crate::domain::types::{CarModelId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::car_models)]
/// Diesel model for [`crate::domain::car_model::CarModel`].
pub struct CarModel {
    pub id: i32,
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

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::car_models)]
/// Insertable and full-replacement form of [`CarModel`].
pub struct NewCarModel<'a> {
    pub brand: &'a str,
    pub model: &'a str,
    pub year: i32,
    pub segment: &'a str,
    pub doors: i32,
    pub seats: i32,
    pub fuel_type: &'a str,
    pub transmission: &'a str,
    pub price_per_day: f64,
}

impl TryFrom<CarModel> for DomainCarModel {
    type Error = TypeConstraintError;

    fn try_from(db: CarModel) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CarModelId::new(db.id)?,
            brand: db.brand,
            model: db.model,
            year: db.year,
            segment: db.segment,
            doors: db.doors,
            seats: db.seats,
            fuel_type: db.fuel_type,
            transmission: db.transmission,
            price_per_day: db.price_per_day,
        })
    }
}

impl<'a> From<&'a DomainNewCarModel> for NewCarModel<'a> {
    fn from(model: &'a DomainNewCarModel) -> Self {
        Self {
            brand: model.brand.trim(),
            model: model.model.trim(),
            year: model.year,
            segment: model.segment.trim(),
            doors: model.doors,
            seats: model.seats,
            fuel_type: model.fuel_type.trim(),
            transmission: model.transmission.trim(),
            price_per_day: model.price_per_day,
        }
    }
}
