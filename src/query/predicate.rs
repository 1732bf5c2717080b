use std::fmt::{Display, Formatter};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::query::errors::{QueryError, QueryResult};
use crate::query::filter::{FilterField, FilterKind, FilterSpec, ValueKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Operator {
    Equals,
    ContainsIgnoreCase,
    GreaterOrEqual,
    LessOrEqual,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Literal {
    Integer(i32),
    Text(String),
    Timestamp(NaiveDateTime),
}

/// A single `(field, operator, value)` condition. A listing combines its
/// predicates with AND.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Predicate {
    pub field: &'static str,
    pub operator: Operator,
    pub value: Literal,
}

impl Predicate {
    pub fn new(field: &'static str, operator: Operator, value: Literal) -> Self {
        Self {
            field,
            operator,
            value,
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Integer(value) => write!(f, "{value}"),
            Literal::Text(value) => write!(f, "{value:?}"),
            Literal::Timestamp(value) => write!(f, "'{value}'"),
        }
    }
}

impl Display for Predicate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let operator = match self.operator {
            Operator::Equals => "=",
            Operator::ContainsIgnoreCase => "~*",
            Operator::GreaterOrEqual => ">=",
            Operator::LessOrEqual => "<=",
        };
        write!(f, "{} {operator} {}", self.field, self.value)
    }
}

/// Which end of a range a timestamp filter bounds. A bare date expands to
/// the first or last instant of that day accordingly.
#[derive(Clone, Copy)]
enum Bound {
    Lower,
    Upper,
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

fn parse_timestamp(raw: &str, bound: Bound) -> Option<NaiveDateTime> {
    if let Ok(value) = DateTime::parse_from_rfc3339(raw) {
        return Some(value.naive_utc());
    }
    if let Some(value) = DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
    {
        return Some(value);
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    match bound {
        Bound::Lower => date.and_hms_opt(0, 0, 0),
        Bound::Upper => date.and_hms_nano_opt(23, 59, 59, 999_999_999),
    }
}

fn coerce(filter: &FilterField, kind: ValueKind, raw: &str, bound: Bound) -> QueryResult<Literal> {
    match kind {
        ValueKind::Text => Ok(Literal::Text(raw.to_string())),
        ValueKind::Integer => raw
            .parse::<i32>()
            .map(Literal::Integer)
            .map_err(|_| {
                QueryError::invalid_filter(filter.name, format!("`{raw}` is not an integer"))
            }),
        ValueKind::Timestamp => parse_timestamp(raw, bound)
            .map(Literal::Timestamp)
            .ok_or_else(|| {
                QueryError::invalid_filter(
                    filter.name,
                    format!("`{raw}` is not a date (YYYY-MM-DD) or date-time"),
                )
            }),
        ValueKind::OneOf(names) => names
            .iter()
            .find(|name| name.eq_ignore_ascii_case(raw))
            .map(|name| Literal::Text((*name).to_string()))
            .ok_or_else(|| {
                QueryError::invalid_filter(
                    filter.name,
                    format!("`{raw}` is not one of {}", names.join(", ")),
                )
            }),
    }
}

fn filter_predicate(filter: &'static FilterField, raw: &str) -> QueryResult<Predicate> {
    let (operator, value) = match filter.kind {
        FilterKind::Equals(kind) => (Operator::Equals, coerce(filter, kind, raw, Bound::Lower)?),
        FilterKind::ContainsIgnoreCase => (
            Operator::ContainsIgnoreCase,
            Literal::Text(raw.to_string()),
        ),
        FilterKind::AtLeast(kind) => (
            Operator::GreaterOrEqual,
            coerce(filter, kind, raw, Bound::Lower)?,
        ),
        FilterKind::AtMost(kind) => (
            Operator::LessOrEqual,
            coerce(filter, kind, raw, Bound::Upper)?,
        ),
    };
    Ok(Predicate::new(filter.field, operator, value))
}

/// Derives the predicate list of a listing call.
///
/// The scope predicate always comes first, followed by one predicate per
/// present filter in the listing's declared order. The same list must be
/// handed to both the count and the page query.
pub fn build_predicates(spec: &FilterSpec) -> QueryResult<Vec<Predicate>> {
    let listing = spec.listing();
    let mut predicates = Vec::with_capacity(listing.filters.len() + 1);

    predicates.push(Predicate::new(
        listing.scope_field,
        Operator::Equals,
        Literal::Integer(spec.scope_key()),
    ));

    for filter in listing.filters {
        if let Some(raw) = spec.value(filter.name) {
            predicates.push(filter_predicate(filter, raw)?);
        }
    }

    Ok(predicates)
}
