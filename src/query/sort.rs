use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::Serialize;

use crate::query::errors::{QueryError, QueryResult};
use crate::query::listing::Listing;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(QueryError::InvalidSort(format!(
                "unknown direction `{other}`, expected `asc` or `desc`"
            ))),
        }
    }
}

impl Display for SortDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Asc => f.write_str("asc"),
            SortDirection::Desc => f.write_str("desc"),
        }
    }
}

/// Ordering of a listing: one primary field plus a tiebreak field that is
/// always applied in the same direction, so paging is stable when primary
/// values repeat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct SortSpec {
    field: &'static str,
    direction: SortDirection,
    tiebreak: &'static str,
}

impl SortSpec {
    pub const fn new(
        field: &'static str,
        direction: SortDirection,
        tiebreak: &'static str,
    ) -> Self {
        Self {
            field,
            direction,
            tiebreak,
        }
    }

    /// Parses `field` or `field,direction` against the fields `listing` can be
    /// sorted by. A blank input selects the listing default; a missing
    /// direction means ascending.
    pub fn parse(listing: &Listing, raw: Option<&str>) -> QueryResult<Self> {
        let raw = match raw.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => raw,
            None => return Ok(listing.default_sort),
        };

        let (name, direction) = match raw.split_once(',') {
            Some((name, direction)) => (name.trim(), direction.parse()?),
            None => (raw, SortDirection::Asc),
        };

        let field = listing.sort_field(name).ok_or_else(|| {
            QueryError::InvalidSort(format!(
                "{} cannot be sorted by `{name}`",
                listing.name
            ))
        })?;

        Ok(Self::new(field, direction, listing.default_sort.tiebreak))
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn tiebreak(&self) -> &'static str {
        self.tiebreak
    }
}

impl Display for SortSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}, {} {}",
            self.field, self.direction, self.tiebreak, self.direction
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::listing::{MAINTENANCE_RECORDS, VEHICLES};

    #[test]
    fn blank_sort_uses_listing_default() {
        let sort = SortSpec::parse(&MAINTENANCE_RECORDS, Some("  ")).unwrap();
        assert_eq!(sort, MAINTENANCE_RECORDS.default_sort);
        assert_eq!(sort.field(), "maintenance_date");
        assert_eq!(sort.direction(), SortDirection::Desc);
        assert_eq!(sort.tiebreak(), "id");
    }

    #[test]
    fn parses_field_and_direction() {
        let sort = SortSpec::parse(&VEHICLES, Some("kilometers_travelled,DESC")).unwrap();
        assert_eq!(sort.field(), "kilometers_travelled");
        assert_eq!(sort.direction(), SortDirection::Desc);

        let sort = SortSpec::parse(&VEHICLES, Some("license_plate")).unwrap();
        assert_eq!(sort.direction(), SortDirection::Asc);
    }

    #[test]
    fn rejects_unknown_field_and_direction() {
        assert!(matches!(
            SortSpec::parse(&VEHICLES, Some("vin")),
            Err(QueryError::InvalidSort(_))
        ));
        assert!(matches!(
            SortSpec::parse(&VEHICLES, Some("license_plate,sideways")),
            Err(QueryError::InvalidSort(_))
        ));
    }
}
