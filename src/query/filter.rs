use std::collections::BTreeMap;

use crate::query::errors::{QueryError, QueryResult};
use crate::query::listing::Listing;

/// How a raw filter value is coerced before it becomes a predicate literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Integer,
    Timestamp,
    /// One of a closed set of canonical names, matched ignoring case.
    OneOf(&'static [&'static str]),
}

/// The comparison a recognized filter contributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterKind {
    /// Case-sensitive equality.
    Equals(ValueKind),
    /// Case-insensitive substring match on a text field.
    ContainsIgnoreCase,
    /// Inclusive lower bound.
    AtLeast(ValueKind),
    /// Inclusive upper bound.
    AtMost(ValueKind),
}

/// A filter a listing recognizes: the caller-facing name, the storage field
/// it constrains and the comparison it applies.
#[derive(Debug, PartialEq, Eq)]
pub struct FilterField {
    pub name: &'static str,
    pub field: &'static str,
    pub kind: FilterKind,
}

/// The optional criteria of one listing call plus its mandatory scope key.
///
/// Only recognized filters with a non-blank value are stored; a blank or
/// missing value means the filter is not applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterSpec {
    listing: &'static Listing,
    scope_key: i32,
    values: BTreeMap<&'static str, String>,
}

impl FilterSpec {
    pub fn new(listing: &'static Listing, scope_key: i32) -> Self {
        Self {
            listing,
            scope_key,
            values: BTreeMap::new(),
        }
    }

    /// Sets or clears a filter. Unknown names are rejected so that a typo
    /// never silently widens the result.
    pub fn with(mut self, name: &str, value: Option<&str>) -> QueryResult<Self> {
        let filter = self.listing.filter(name).ok_or_else(|| {
            QueryError::invalid_filter(
                name,
                format!("not a recognized filter of {}", self.listing.name),
            )
        })?;

        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(value) => {
                self.values.insert(filter.name, value.to_string());
            }
            None => {
                self.values.remove(filter.name);
            }
        }
        Ok(self)
    }

    /// Builds a spec from `(name, value)` pairs such as decoded query parameters.
    pub fn from_pairs<I, K, V>(
        listing: &'static Listing,
        scope_key: i32,
        pairs: I,
    ) -> QueryResult<Self>
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        pairs
            .into_iter()
            .try_fold(Self::new(listing, scope_key), |spec, (name, value)| {
                spec.with(name.as_ref(), value.as_ref().map(AsRef::as_ref))
            })
    }

    pub fn listing(&self) -> &'static Listing {
        self.listing
    }

    pub fn scope_key(&self) -> i32 {
        self.scope_key
    }

    /// The trimmed value of a present filter.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn is_unfiltered(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::listing::{MAINTENANCE_RECORDS, VEHICLE_NOTES};

    #[test]
    fn blank_values_are_absent() {
        let spec = FilterSpec::new(&VEHICLE_NOTES, 7)
            .with("author", Some("   "))
            .unwrap()
            .with("from", None)
            .unwrap();
        assert!(spec.is_unfiltered());
        assert_eq!(spec.value("author"), None);
    }

    #[test]
    fn values_are_trimmed_and_clearable() {
        let spec = FilterSpec::new(&MAINTENANCE_RECORDS, 7)
            .with("type", Some(" OIL_CHANGE "))
            .unwrap();
        assert_eq!(spec.value("type"), Some("OIL_CHANGE"));

        let spec = spec.with("type", Some("")).unwrap();
        assert!(spec.is_unfiltered());
    }

    #[test]
    fn unknown_filters_are_rejected() {
        let err = FilterSpec::new(&MAINTENANCE_RECORDS, 7)
            .with("author", Some("bob"))
            .unwrap_err();
        assert!(matches!(
            err,
            QueryError::InvalidFilterValue { ref filter, .. } if filter == "author"
        ));
    }

    #[test]
    fn from_pairs_collects_present_values() {
        let spec = FilterSpec::from_pairs(
            &MAINTENANCE_RECORDS,
            3,
            [("from", Some("2024-01-01")), ("to", None), ("type", Some(""))],
        )
        .unwrap();
        assert_eq!(spec.scope_key(), 3);
        assert_eq!(spec.value("from"), Some("2024-01-01"));
        assert_eq!(spec.value("to"), None);
        assert_eq!(spec.value("type"), None);
    }
}
