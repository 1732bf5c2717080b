//! Services for free-text notes attached to vehicles.

use chrono::Utc;
use serde::Deserialize;

use crate::domain::types::{VehicleId, VehicleNoteId};
use crate::domain::vehicle_note::{
    NewVehicleNote, UpdateVehicleNote, VehicleNote, VehicleNotePayload,
};
use crate::models::config::PagingConfig;
use crate::query::{FilterSpec, PageResult, PageSource, VEHICLE_NOTES, list_filtered};
use crate::repository::{VehicleNoteReader, VehicleNoteWriter, VehicleReader};
use crate::services::listing::{page_request, sort_spec};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters of the vehicle notes listing.
#[derive(Debug, Default, Deserialize)]
pub struct VehicleNoteListParams {
    pub author: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub page: Option<u64>,
    pub size: Option<u32>,
    pub sort: Option<String>,
}

pub fn list_vehicle_notes<R>(
    repo: &R,
    vehicle_id: VehicleId,
    params: &VehicleNoteListParams,
    paging: &PagingConfig,
) -> ServiceResult<PageResult<VehicleNote>>
where
    R: PageSource<VehicleNote> + ?Sized,
{
    let filters = FilterSpec::from_pairs(
        &VEHICLE_NOTES,
        vehicle_id.get(),
        [
            ("author", params.author.as_deref()),
            ("from", params.from.as_deref()),
            ("to", params.to.as_deref()),
        ],
    )?;
    let sort = sort_spec(&VEHICLE_NOTES, params.sort.as_deref())?;
    let page = page_request(params.page, params.size, paging)?;

    list_filtered(repo, &filters, &sort, &page, paging.max_page_size).map_err(|err| {
        if err.is_client_error() {
            log::debug!("Failed to list notes of vehicle {vehicle_id}: {err}");
        } else {
            log::error!("Failed to list notes of vehicle {vehicle_id}: {err}");
        }
        ServiceError::from(err)
    })
}

pub fn get_vehicle_note<R>(
    repo: &R,
    vehicle_id: VehicleId,
    note_id: VehicleNoteId,
) -> ServiceResult<VehicleNote>
where
    R: VehicleNoteReader + ?Sized,
{
    repo.get_vehicle_note_by_id(note_id)
        .map_err(|err| {
            log::error!("Failed to load vehicle note {note_id}: {err}");
            err
        })?
        .filter(|note| note.vehicle_id == vehicle_id)
        .ok_or(ServiceError::NotFound)
}

/// Attaches a note to an existing vehicle, stamped now unless a time is given.
pub fn create_vehicle_note<R>(
    repo: &R,
    vehicle_id: VehicleId,
    payload: VehicleNotePayload,
) -> ServiceResult<VehicleNote>
where
    R: VehicleReader + VehicleNoteWriter + ?Sized,
{
    if repo.get_vehicle_by_id(vehicle_id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    let note = NewVehicleNote::from_payload(vehicle_id, payload, Utc::now().naive_utc());

    repo.create_vehicle_note(&note).map_err(|err| {
        log::error!("Failed to create note for vehicle {vehicle_id}: {err}");
        ServiceError::from(err)
    })
}

/// Rewrites a note. Without an explicit time the original one is kept.
pub fn update_vehicle_note<R>(
    repo: &R,
    vehicle_id: VehicleId,
    note_id: VehicleNoteId,
    payload: VehicleNotePayload,
) -> ServiceResult<VehicleNote>
where
    R: VehicleNoteReader + VehicleNoteWriter + ?Sized,
{
    let existing = get_vehicle_note(repo, vehicle_id, note_id)?;
    let updates = UpdateVehicleNote::from_payload(payload, &existing);

    repo.update_vehicle_note(note_id, &updates).map_err(|err| {
        log::error!("Failed to update vehicle note {note_id}: {err}");
        ServiceError::from(err)
    })
}

pub fn delete_vehicle_note<R>(
    repo: &R,
    vehicle_id: VehicleId,
    note_id: VehicleNoteId,
) -> ServiceResult<()>
where
    R: VehicleNoteReader + VehicleNoteWriter + ?Sized,
{
    get_vehicle_note(repo, vehicle_id, note_id)?;

    repo.delete_vehicle_note(note_id).map_err(|err| {
        log::error!("Failed to delete vehicle note {note_id}: {err}");
        ServiceError::from(err)
    })
}
