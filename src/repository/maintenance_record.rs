use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::maintenance_record::{
    MaintenanceRecord, NewMaintenanceRecord, UpdateMaintenanceRecord,
};
use crate::domain::types::MaintenanceRecordId;
use crate::models::maintenance_record::{
    MaintenanceRecord as DbMaintenanceRecord, NewMaintenanceRecord as DbNewMaintenanceRecord,
    UpdateMaintenanceRecord as DbUpdateMaintenanceRecord,
};
use crate::query::{Literal, Operator, PageRequest, PageSource, Predicate, SortDirection, SortSpec};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::sql::{count_to_u64, unsupported, unsupported_sort, window};
use crate::repository::{DieselRepository, MaintenanceRecordReader, MaintenanceRecordWriter};
use crate::schema::maintenance_records;

const TABLE: &str = "maintenance_records";

type BoxedRecords = maintenance_records::BoxedQuery<'static, Sqlite>;

fn filtered(predicates: &[Predicate]) -> RepositoryResult<BoxedRecords> {
    let mut query = maintenance_records::table.into_boxed::<Sqlite>();

    for predicate in predicates {
        query = match (predicate.field, predicate.operator, &predicate.value) {
            ("vehicle_id", Operator::Equals, Literal::Integer(id)) => {
                query.filter(maintenance_records::vehicle_id.eq(*id))
            }
            ("type", Operator::Equals, Literal::Text(kind)) => {
                query.filter(maintenance_records::kind.eq(kind.clone()))
            }
            ("maintenance_date", Operator::GreaterOrEqual, Literal::Timestamp(at)) => {
                query.filter(maintenance_records::maintenance_date.ge(*at))
            }
            ("maintenance_date", Operator::LessOrEqual, Literal::Timestamp(at)) => {
                query.filter(maintenance_records::maintenance_date.le(*at))
            }
            _ => return Err(unsupported(TABLE, predicate)),
        };
    }

    Ok(query)
}

fn ordered(query: BoxedRecords, sort: &SortSpec) -> RepositoryResult<BoxedRecords> {
    use SortDirection::{Asc, Desc};

    if sort.tiebreak() != "id" {
        return Err(unsupported_sort(TABLE, sort));
    }

    let query = match (sort.field(), sort.direction()) {
        ("maintenance_date", Asc) => query.order(maintenance_records::maintenance_date.asc()),
        ("maintenance_date", Desc) => query.order(maintenance_records::maintenance_date.desc()),
        ("cost", Asc) => query.order(maintenance_records::cost.asc()),
        ("cost", Desc) => query.order(maintenance_records::cost.desc()),
        ("id", _) => query,
        _ => return Err(unsupported_sort(TABLE, sort)),
    };

    Ok(match sort.direction() {
        Asc => query.then_order_by(maintenance_records::id.asc()),
        Desc => query.then_order_by(maintenance_records::id.desc()),
    })
}

impl PageSource<MaintenanceRecord> for DieselRepository {
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
    ) -> RepositoryResult<Vec<MaintenanceRecord>> {
        let (offset, limit) = window(page)?;
        let query = ordered(filtered(predicates)?, sort)?;
        let mut conn = self.conn()?;

        query
            .offset(offset)
            .limit(limit)
            .load::<DbMaintenanceRecord>(&mut conn)?
            .into_iter()
            .map(|db| MaintenanceRecord::try_from(db).map_err(RepositoryError::from))
            .collect()
    }
}

impl MaintenanceRecordReader for DieselRepository {
    fn get_maintenance_record_by_id(
        &self,
        id: MaintenanceRecordId,
    ) -> RepositoryResult<Option<MaintenanceRecord>> {
        let mut conn = self.conn()?;
        let record = maintenance_records::table
            .find(id.get())
            .first::<DbMaintenanceRecord>(&mut conn)
            .optional()?;

        record
            .map(MaintenanceRecord::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }
}

impl MaintenanceRecordWriter for DieselRepository {
    fn create_maintenance_record(
        &self,
        record: &NewMaintenanceRecord,
    ) -> RepositoryResult<MaintenanceRecord> {
        let mut conn = self.conn()?;
        let insertable: DbNewMaintenanceRecord = record.into();

        let created = diesel::insert_into(maintenance_records::table)
            .values(&insertable)
            .get_result::<DbMaintenanceRecord>(&mut conn)?;

        Ok(MaintenanceRecord::try_from(created)?)
    }

    fn update_maintenance_record(
        &self,
        id: MaintenanceRecordId,
        updates: &UpdateMaintenanceRecord,
    ) -> RepositoryResult<MaintenanceRecord> {
        let mut conn = self.conn()?;
        let changes: DbUpdateMaintenanceRecord = updates.into();

        let updated = diesel::update(maintenance_records::table.find(id.get()))
            .set(&changes)
            .get_result::<DbMaintenanceRecord>(&mut conn)?;

        Ok(MaintenanceRecord::try_from(updated)?)
    }

    fn delete_maintenance_record(&self, id: MaintenanceRecordId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;
        let deleted =
            diesel::delete(maintenance_records::table.find(id.get())).execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
