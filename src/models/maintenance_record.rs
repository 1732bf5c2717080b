//! Diesel models for storing vehicle maintenance records.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::maintenance_record::{
    MaintenanceRecord as DomainMaintenanceRecord,
    NewMaintenanceRecord as DomainNewMaintenanceRecord,
    UpdateMaintenanceRecord as DomainUpdateMaintenanceRecord,
};
use crate::domain::types::{MaintenanceRecordId, MaintenanceType, TypeConstraintError, VehicleId};
use crate::models::vehicle::Vehicle;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Vehicle, foreign_key = vehicle_id))]
#[diesel(table_name = crate::schema::maintenance_records)]
pub struct MaintenanceRecord {
    pub id: i32,
    pub vehicle_id: i32,
    pub kind: String,
    pub description: String,
    pub cost: f64,
    pub maintenance_date: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::maintenance_records)]
pub struct NewMaintenanceRecord<'a> {
    pub vehicle_id: i32,
    pub kind: &'a str,
    pub description: &'a str,
    pub cost: f64,
    pub maintenance_date: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::maintenance_records)]
pub struct UpdateMaintenanceRecord<'a> {
    pub kind: &'a str,
    pub description: &'a str,
    pub cost: f64,
    pub maintenance_date: NaiveDateTime,
}

impl TryFrom<MaintenanceRecord> for DomainMaintenanceRecord {
    type Error = TypeConstraintError;

    fn try_from(db: MaintenanceRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: MaintenanceRecordId::new(db.id)?,
            vehicle_id: VehicleId::new(db.vehicle_id)?,
            kind: MaintenanceType::new(db.kind)?,
            description: db.description,
            cost: db.cost,
            maintenance_date: db.maintenance_date,
        })
    }
}

impl<'a> From<&'a DomainNewMaintenanceRecord> for NewMaintenanceRecord<'a> {
    fn from(record: &'a DomainNewMaintenanceRecord) -> Self {
        Self {
            vehicle_id: record.vehicle_id.get(),
            kind: record.kind.as_str(),
            description: &record.description,
            cost: record.cost,
            maintenance_date: record.maintenance_date,
        }
    }
}

impl<'a> From<&'a DomainUpdateMaintenanceRecord> for UpdateMaintenanceRecord<'a> {
    fn from(record: &'a DomainUpdateMaintenanceRecord) -> Self {
        Self {
            kind: record.kind.as_str(),
            description: &record.description,
            cost: record.cost,
            maintenance_date: record.maintenance_date,
        }
    }
}
