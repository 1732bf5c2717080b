use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{NoteAuthor, NoteText, VehicleId, VehicleNoteId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct VehicleNote {
    pub id: VehicleNoteId,
    pub vehicle_id: VehicleId,
    pub author: NoteAuthor,
    pub note: NoteText,
    pub created_at: NaiveDateTime,
}

/// Client-supplied note data. Text is sanitized on deserialization.
#[derive(Clone, Debug, Deserialize)]
pub struct VehicleNotePayload {
    pub author: NoteAuthor,
    pub note: NoteText,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewVehicleNote {
    pub vehicle_id: VehicleId,
    pub author: NoteAuthor,
    pub note: NoteText,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateVehicleNote {
    pub author: NoteAuthor,
    pub note: NoteText,
    pub created_at: NaiveDateTime,
}

impl NewVehicleNote {
    pub fn from_payload(
        vehicle_id: VehicleId,
        payload: VehicleNotePayload,
        now: NaiveDateTime,
    ) -> Self {
        Self {
            vehicle_id,
            author: payload.author,
            note: payload.note,
            created_at: payload.created_at.unwrap_or(now),
        }
    }
}

impl UpdateVehicleNote {
    /// Builds the update, keeping the note's original timestamp when none is given.
    pub fn from_payload(payload: VehicleNotePayload, existing: &VehicleNote) -> Self {
        Self {
            author: payload.author,
            note: payload.note,
            created_at: payload.created_at.unwrap_or(existing.created_at),
        }
    }
}
