//! Diesel models for storing free-text vehicle notes.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::types::{NoteAuthor, NoteText, TypeConstraintError, VehicleId, VehicleNoteId};
use crate::domain::vehicle_note::{
    NewVehicleNote as DomainNewVehicleNote, UpdateVehicleNote as DomainUpdateVehicleNote,
    VehicleNote as DomainVehicleNote,
};
use crate::models::vehicle::Vehicle;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Vehicle, foreign_key = vehicle_id))]
#[diesel(table_name = crate::schema::vehicle_notes)]
pub struct VehicleNote {
    pub id: i32,
    pub vehicle_id: i32,
    pub author: String,
    pub note: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::vehicle_notes)]
pub struct NewVehicleNote<'a> {
    pub vehicle_id: i32,
    pub author: &'a str,
    pub note: &'a str,
    pub created_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::vehicle_notes)]
pub struct UpdateVehicleNote<'a> {
    pub author: &'a str,
    pub note: &'a str,
    pub created_at: NaiveDateTime,
}

impl TryFrom<VehicleNote> for DomainVehicleNote {
    type Error = TypeConstraintError;

    fn try_from(db: VehicleNote) -> Result<Self, Self::Error> {
        Ok(Self {
            id: VehicleNoteId::new(db.id)?,
            vehicle_id: VehicleId::new(db.vehicle_id)?,
            author: NoteAuthor::new(db.author)?,
            note: NoteText::new(db.note)?,
            created_at: db.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewVehicleNote> for NewVehicleNote<'a> {
    fn from(note: &'a DomainNewVehicleNote) -> Self {
        Self {
            vehicle_id: note.vehicle_id.get(),
            author: note.author.as_str(),
            note: note.note.as_str(),
            created_at: note.created_at,
        }
    }
}

impl<'a> From<&'a DomainUpdateVehicleNote> for UpdateVehicleNote<'a> {
    fn from(note: &'a DomainUpdateVehicleNote) -> Self {
        Self {
            author: note.author.as_str(),
            note: note.note.as_str(),
            created_at: note.created_at,
        }
    }
}
