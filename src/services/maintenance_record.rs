//! Services for a vehicle's maintenance history.

use chrono::Utc;
use serde::Deserialize;
use validator::Validate;

use crate::domain::maintenance_record::{
    MaintenanceRecord, MaintenanceRecordPayload, NewMaintenanceRecord, UpdateMaintenanceRecord,
};
use crate::domain::types::{MaintenanceRecordId, VehicleId};
use crate::models::config::PagingConfig;
use crate::query::{FilterSpec, MAINTENANCE_RECORDS, PageResult, PageSource, list_filtered};
use crate::repository::{MaintenanceRecordReader, MaintenanceRecordWriter, VehicleReader};
use crate::services::listing::{page_request, sort_spec};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters of the maintenance history listing.
#[derive(Debug, Default, Deserialize)]
pub struct MaintenanceRecordListParams {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub page: Option<u64>,
    pub size: Option<u32>,
    pub sort: Option<String>,
}

/// Lists one page of a vehicle's maintenance records.
pub fn list_maintenance_records<R>(
    repo: &R,
    vehicle_id: VehicleId,
    params: &MaintenanceRecordListParams,
    paging: &PagingConfig,
) -> ServiceResult<PageResult<MaintenanceRecord>>
where
    R: PageSource<MaintenanceRecord> + ?Sized,
{
    let filters = FilterSpec::from_pairs(
        &MAINTENANCE_RECORDS,
        vehicle_id.get(),
        [
            ("type", params.kind.as_deref()),
            ("from", params.from.as_deref()),
            ("to", params.to.as_deref()),
        ],
    )?;
    let sort = sort_spec(&MAINTENANCE_RECORDS, params.sort.as_deref())?;
    let page = page_request(params.page, params.size, paging)?;

    list_filtered(repo, &filters, &sort, &page, paging.max_page_size).map_err(|err| {
        if err.is_client_error() {
            log::debug!("Failed to list maintenance records of vehicle {vehicle_id}: {err}");
        } else {
            log::error!("Failed to list maintenance records of vehicle {vehicle_id}: {err}");
        }
        ServiceError::from(err)
    })
}

/// Fetches a record, treating a record of another vehicle as missing.
pub fn get_maintenance_record<R>(
    repo: &R,
    vehicle_id: VehicleId,
    record_id: MaintenanceRecordId,
) -> ServiceResult<MaintenanceRecord>
where
    R: MaintenanceRecordReader + ?Sized,
{
    repo.get_maintenance_record_by_id(record_id)
        .map_err(|err| {
            log::error!("Failed to load maintenance record {record_id}: {err}");
            err
        })?
        .filter(|record| record.vehicle_id == vehicle_id)
        .ok_or(ServiceError::NotFound)
}

/// Adds a record to an existing vehicle. A missing date is recorded as now.
pub fn create_maintenance_record<R>(
    repo: &R,
    vehicle_id: VehicleId,
    payload: MaintenanceRecordPayload,
) -> ServiceResult<MaintenanceRecord>
where
    R: VehicleReader + MaintenanceRecordWriter + ?Sized,
{
    payload.validate()?;

    if repo.get_vehicle_by_id(vehicle_id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    let record = NewMaintenanceRecord::from_payload(vehicle_id, payload, Utc::now().naive_utc());

    repo.create_maintenance_record(&record).map_err(|err| {
        log::error!("Failed to create maintenance record for vehicle {vehicle_id}: {err}");
        ServiceError::from(err)
    })
}

/// Replaces a record's data. A missing date is recorded as now.
pub fn update_maintenance_record<R>(
    repo: &R,
    vehicle_id: VehicleId,
    record_id: MaintenanceRecordId,
    payload: MaintenanceRecordPayload,
) -> ServiceResult<MaintenanceRecord>
where
    R: MaintenanceRecordReader + MaintenanceRecordWriter + ?Sized,
{
    payload.validate()?;
    get_maintenance_record(repo, vehicle_id, record_id)?;

    let updates = UpdateMaintenanceRecord::from_payload(payload, Utc::now().naive_utc());

    repo.update_maintenance_record(record_id, &updates).map_err(|err| {
        log::error!("Failed to update maintenance record {record_id}: {err}");
        ServiceError::from(err)
    })
}

pub fn delete_maintenance_record<R>(
    repo: &R,
    vehicle_id: VehicleId,
    record_id: MaintenanceRecordId,
) -> ServiceResult<()>
where
    R: MaintenanceRecordReader + MaintenanceRecordWriter + ?Sized,
{
    get_maintenance_record(repo, vehicle_id, record_id)?;

    repo.delete_maintenance_record(record_id).map_err(|err| {
        log::error!("Failed to delete maintenance record {record_id}: {err}");
        ServiceError::from(err)
    })
}
