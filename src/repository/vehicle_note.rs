use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::types::VehicleNoteId;
use crate::domain::vehicle_note::{NewVehicleNote, UpdateVehicleNote, VehicleNote};
use crate::models::vehicle_note::{
    NewVehicleNote as DbNewVehicleNote, UpdateVehicleNote as DbUpdateVehicleNote,
    VehicleNote as DbVehicleNote,
};
use crate::query::{Literal, Operator, PageRequest, PageSource, Predicate, SortDirection, SortSpec};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::db::lower;
use crate::repository::sql::{
    LIKE_ESCAPE, contains_pattern, count_to_u64, unsupported, unsupported_sort, window,
};
use crate::repository::{DieselRepository, VehicleNoteReader, VehicleNoteWriter};
use crate::schema::vehicle_notes;

const TABLE: &str = "vehicle_notes";

type BoxedNotes = vehicle_notes::BoxedQuery<'static, Sqlite>;

fn filtered(predicates: &[Predicate]) -> RepositoryResult<BoxedNotes> {
    let mut query = vehicle_notes::table.into_boxed::<Sqlite>();

    for predicate in predicates {
        query = match (predicate.field, predicate.operator, &predicate.value) {
            ("vehicle_id", Operator::Equals, Literal::Integer(id)) => {
                query.filter(vehicle_notes::vehicle_id.eq(*id))
            }
            ("author", Operator::ContainsIgnoreCase, Literal::Text(needle)) => query.filter(
                lower(vehicle_notes::author)
                    .like(contains_pattern(needle))
                    .escape(LIKE_ESCAPE),
            ),
            ("created_at", Operator::GreaterOrEqual, Literal::Timestamp(at)) => {
                query.filter(vehicle_notes::created_at.ge(*at))
            }
            ("created_at", Operator::LessOrEqual, Literal::Timestamp(at)) => {
                query.filter(vehicle_notes::created_at.le(*at))
            }
            _ => return Err(unsupported(TABLE, predicate)),
        };
    }

    Ok(query)
}

fn ordered(query: BoxedNotes, sort: &SortSpec) -> RepositoryResult<BoxedNotes> {
    use SortDirection::{Asc, Desc};

    if sort.tiebreak() != "id" {
        return Err(unsupported_sort(TABLE, sort));
    }

    let query = match (sort.field(), sort.direction()) {
        ("created_at", Asc) => query.order(vehicle_notes::created_at.asc()),
        ("created_at", Desc) => query.order(vehicle_notes::created_at.desc()),
        ("author", Asc) => query.order(vehicle_notes::author.asc()),
        ("author", Desc) => query.order(vehicle_notes::author.desc()),
        ("id", _) => query,
        _ => return Err(unsupported_sort(TABLE, sort)),
    };

    Ok(match sort.direction() {
        Asc => query.then_order_by(vehicle_notes::id.asc()),
        Desc => query.then_order_by(vehicle_notes::id.desc()),
    })
}

impl PageSource<VehicleNote> for DieselRepository {
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
    ) -> RepositoryResult<Vec<VehicleNote>> {
        let (offset, limit) = window(page)?;
        let query = ordered(filtered(predicates)?, sort)?;
        let mut conn = self.conn()?;

        query
            .offset(offset)
            .limit(limit)
            .load::<DbVehicleNote>(&mut conn)?
            .into_iter()
            .map(|db| VehicleNote::try_from(db).map_err(RepositoryError::from))
            .collect()
    }
}

impl VehicleNoteReader for DieselRepository {
    fn get_vehicle_note_by_id(&self, id: VehicleNoteId) -> RepositoryResult<Option<VehicleNote>> {
        let mut conn = self.conn()?;
        let note = vehicle_notes::table
            .find(id.get())
            .first::<DbVehicleNote>(&mut conn)
            .optional()?;

        note.map(VehicleNote::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }
}

impl VehicleNoteWriter for DieselRepository {
    fn create_vehicle_note(&self, note: &NewVehicleNote) -> RepositoryResult<VehicleNote> {
        let mut conn = self.conn()?;
        let insertable: DbNewVehicleNote = note.into();

        let created = diesel::insert_into(vehicle_notes::table)
            .values(&insertable)
            .get_result::<DbVehicleNote>(&mut conn)?;

        Ok(VehicleNote::try_from(created)?)
    }

    fn update_vehicle_note(
        &self,
        id: VehicleNoteId,
        updates: &UpdateVehicleNote,
    ) -> RepositoryResult<VehicleNote> {
        let mut conn = self.conn()?;
        let changes: DbUpdateVehicleNote = updates.into();

        let updated = diesel::update(vehicle_notes::table.find(id.get()))
            .set(&changes)
            .get_result::<DbVehicleNote>(&mut conn)?;

        Ok(VehicleNote::try_from(updated)?)
    }

    fn delete_vehicle_note(&self, id: VehicleNoteId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(vehicle_notes::table.find(id.get())).execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
