use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::types::{MaintenanceRecordId, MaintenanceType, VehicleId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MaintenanceRecord {
    pub id: MaintenanceRecordId,
    pub vehicle_id: VehicleId,
    #[serde(rename = "type")]
    pub kind: MaintenanceType,
    pub description: String,
    pub cost: f64,
    pub maintenance_date: NaiveDateTime,
}

/// Client-supplied maintenance data. A missing date means "now".
#[derive(Clone, Debug, Deserialize, Validate)]
pub struct MaintenanceRecordPayload {
    #[serde(rename = "type")]
    pub kind: MaintenanceType,
    #[validate(length(max = 2000))]
    pub description: String,
    #[validate(range(min = 0.0))]
    pub cost: f64,
    pub maintenance_date: Option<NaiveDateTime>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewMaintenanceRecord {
    pub vehicle_id: VehicleId,
    pub kind: MaintenanceType,
    pub description: String,
    pub cost: f64,
    pub maintenance_date: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UpdateMaintenanceRecord {
    pub kind: MaintenanceType,
    pub description: String,
    pub cost: f64,
    pub maintenance_date: NaiveDateTime,
}

impl NewMaintenanceRecord {
    pub fn from_payload(
        vehicle_id: VehicleId,
        payload: MaintenanceRecordPayload,
        now: NaiveDateTime,
    ) -> Self {
        Self {
            vehicle_id,
            kind: payload.kind,
            description: payload.description.trim().to_string(),
            cost: payload.cost,
            maintenance_date: payload.maintenance_date.unwrap_or(now),
        }
    }
}

impl UpdateMaintenanceRecord {
    pub fn from_payload(payload: MaintenanceRecordPayload, now: NaiveDateTime) -> Self {
        Self {
            kind: payload.kind,
            description: payload.description.trim().to_string(),
            cost: payload.cost,
            maintenance_date: payload.maintenance_date.unwrap_or(now),
        }
    }
}
