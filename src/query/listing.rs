//! Declarations of the filtered listings. Each one is data consumed by the
//! shared predicate builder and executor.

use crate::domain::types::VehicleStatus;
use crate::query::filter::{FilterField, FilterKind, ValueKind};
use crate::query::sort::{SortDirection, SortSpec};

#[derive(Debug, PartialEq, Eq)]
pub struct Listing {
    pub name: &'static str,
    /// Parent key every call of this listing is restricted to.
    pub scope_field: &'static str,
    /// Recognized filters, in the order their predicates are emitted.
    pub filters: &'static [FilterField],
    pub sortable: &'static [&'static str],
    pub default_sort: SortSpec,
}

impl Listing {
    pub fn filter(&self, name: &str) -> Option<&'static FilterField> {
        self.filters.iter().find(|filter| filter.name == name)
    }

    pub fn sort_field(&self, name: &str) -> Option<&'static str> {
        self.sortable.iter().copied().find(|field| *field == name)
    }
}

pub static MAINTENANCE_RECORDS: Listing = Listing {
    name: "maintenance records",
    scope_field: "vehicle_id",
    filters: &[
        FilterField {
            name: "type",
            field: "type",
            kind: FilterKind::Equals(ValueKind::Text),
        },
        FilterField {
            name: "from",
            field: "maintenance_date",
            kind: FilterKind::AtLeast(ValueKind::Timestamp),
        },
        FilterField {
            name: "to",
            field: "maintenance_date",
            kind: FilterKind::AtMost(ValueKind::Timestamp),
        },
    ],
    sortable: &["maintenance_date", "cost", "id"],
    default_sort: SortSpec::new("maintenance_date", SortDirection::Desc, "id"),
};

pub static VEHICLE_NOTES: Listing = Listing {
    name: "vehicle notes",
    scope_field: "vehicle_id",
    filters: &[
        FilterField {
            name: "author",
            field: "author",
            kind: FilterKind::ContainsIgnoreCase,
        },
        FilterField {
            name: "from",
            field: "created_at",
            kind: FilterKind::AtLeast(ValueKind::Timestamp),
        },
        FilterField {
            name: "to",
            field: "created_at",
            kind: FilterKind::AtMost(ValueKind::Timestamp),
        },
    ],
    sortable: &["created_at", "author", "id"],
    default_sort: SortSpec::new("created_at", SortDirection::Desc, "id"),
};

pub static VEHICLES: Listing = Listing {
    name: "vehicles",
    scope_field: "hub_id",
    filters: &[
        FilterField {
            name: "status",
            field: "status",
            kind: FilterKind::Equals(ValueKind::OneOf(VehicleStatus::NAMES)),
        },
        FilterField {
            name: "car_model_id",
            field: "car_model_id",
            kind: FilterKind::Equals(ValueKind::Integer),
        },
    ],
    sortable: &["license_plate", "kilometers_travelled", "id"],
    default_sort: SortSpec::new("license_plate", SortDirection::Asc, "id"),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listing_sorts_by_its_default_and_tiebreak() {
        for listing in [&MAINTENANCE_RECORDS, &VEHICLE_NOTES, &VEHICLES] {
            let sort = listing.default_sort;
            assert_eq!(listing.sort_field(sort.field()), Some(sort.field()));
            assert_eq!(listing.sort_field(sort.tiebreak()), Some(sort.tiebreak()));
        }
    }

    #[test]
    fn filter_names_are_unique() {
        for listing in [&MAINTENANCE_RECORDS, &VEHICLE_NOTES, &VEHICLES] {
            for (i, filter) in listing.filters.iter().enumerate() {
                assert!(
                    listing.filters[i + 1..]
                        .iter()
                        .all(|other| other.name != filter.name),
                    "duplicate filter `{}` in {}",
                    filter.name,
                    listing.name
                );
            }
        }
    }
}
