use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::types::VehicleId;
use crate::domain::vehicle::{NewVehicle, UpdateVehicle, Vehicle};
use crate::models::vehicle::{
    NewVehicle as DbNewVehicle, UpdateVehicle as DbUpdateVehicle, Vehicle as DbVehicle,
};
use crate::query::{Literal, Operator, PageRequest, PageSource, Predicate, SortDirection, SortSpec};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::sql::{count_to_u64, unsupported, unsupported_sort, window};
use crate::repository::{DieselRepository, VehicleReader, VehicleWriter};
use crate::schema::vehicles;

const TABLE: &str = "vehicles";

type BoxedVehicles = vehicles::BoxedQuery<'static, Sqlite>;

fn filtered(predicates: &[Predicate]) -> RepositoryResult<BoxedVehicles> {
    let mut query = vehicles::table.into_boxed::<Sqlite>();

    for predicate in predicates {
        query = match (predicate.field, predicate.operator, &predicate.value) {
            ("hub_id", Operator::Equals, Literal::Integer(id)) => {
                query.filter(vehicles::hub_id.eq(*id))
            }
            ("status", Operator::Equals, Literal::Text(status)) => {
                query.filter(vehicles::status.eq(status.clone()))
            }
            ("car_model_id", Operator::Equals, Literal::Integer(id)) => {
                query.filter(vehicles::car_model_id.eq(*id))
            }
            _ => return Err(unsupported(TABLE, predicate)),
        };
    }

    Ok(query)
}

fn ordered(query: BoxedVehicles, sort: &SortSpec) -> RepositoryResult<BoxedVehicles> {
    use SortDirection::{Asc, Desc};

    if sort.tiebreak() != "id" {
        return Err(unsupported_sort(TABLE, sort));
    }

    let query = match (sort.field(), sort.direction()) {
        ("license_plate", Asc) => query.order(vehicles::license_plate.asc()),
        ("license_plate", Desc) => query.order(vehicles::license_plate.desc()),
        ("kilometers_travelled", Asc) => query.order(vehicles::kilometers_travelled.asc()),
        ("kilometers_travelled", Desc) => query.order(vehicles::kilometers_travelled.desc()),
        ("id", _) => query,
        _ => return Err(unsupported_sort(TABLE, sort)),
    };

    Ok(match sort.direction() {
        Asc => query.then_order_by(vehicles::id.asc()),
        Desc => query.then_order_by(vehicles::id.desc()),
    })
}

impl PageSource<Vehicle> for DieselRepository {
    fn count_matching(&self, predicates: &[Predicate]) -> RepositoryResult<u64> {
        let query = filtered(predicates)?;
        let mut conn = self.conn()?;
        let total = query.count().get_result::<i64>(&mut conn)?;
        count_to_u64(total)
    }

    fn fetch_page(
        &self,
        predicates: &[Predicate],
        sort: &SortSpec,
        page: &PageRequest,
    ) -> RepositoryResult<Vec<Vehicle>> {
        let (offset, limit) = window(page)?;
        let query = ordered(filtered(predicates)?, sort)?;
        let mut conn = self.conn()?;

        query
            .offset(offset)
            .limit(limit)
            .load::<DbVehicle>(&mut conn)?
            .into_iter()
            .map(|db| Vehicle::try_from(db).map_err(RepositoryError::from))
            .collect()
    }
}

impl VehicleReader for DieselRepository {
    fn get_vehicle_by_id(&self, id: VehicleId) -> RepositoryResult<Option<Vehicle>> {
        let mut conn = self.conn()?;
        let vehicle = vehicles::table
            .find(id.get())
            .first::<DbVehicle>(&mut conn)
            .optional()?;

        vehicle
            .map(Vehicle::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }
}

impl VehicleWriter for DieselRepository {
    fn create_vehicle(&self, new_vehicle: &NewVehicle) -> RepositoryResult<Vehicle> {
        let mut conn = self.conn()?;
        let insertable: DbNewVehicle = new_vehicle.into();

        let created = diesel::insert_into(vehicles::table)
            .values(&insertable)
            .get_result::<DbVehicle>(&mut conn)?;

        Ok(Vehicle::try_from(created)?)
    }

    fn update_vehicle(&self, id: VehicleId, updates: &UpdateVehicle) -> RepositoryResult<Vehicle> {
        let mut conn = self.conn()?;
        let changes: DbUpdateVehicle = updates.into();

        let updated = diesel::update(vehicles::table.find(id.get()))
            .set(&changes)
            .get_result::<DbVehicle>(&mut conn)?;

        Ok(Vehicle::try_from(updated)?)
    }

    /// Maintenance records and notes go with the vehicle (`ON DELETE CASCADE`).
    fn delete_vehicle(&self, id: VehicleId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(vehicles::table.find(id.get())).execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
