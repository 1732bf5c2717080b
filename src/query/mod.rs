//! Filtered, paginated listings shared by maintenance records, vehicle notes
//! and vehicles.
//!
//! A call builds a [`FilterSpec`], a [`SortSpec`] and a [`PageRequest`],
//! derives the predicate list once and runs the count and page queries with
//! that same list through [`list_filtered`].

pub mod errors;
pub mod executor;
pub mod filter;
pub mod listing;
pub mod page;
pub mod predicate;
pub mod sort;

pub use errors::{QueryError, QueryResult};
pub use executor::{PageQueryExecutor, PageSource, list_filtered};
pub use filter::FilterSpec;
pub use listing::{Listing, MAINTENANCE_RECORDS, VEHICLE_NOTES, VEHICLES};
pub use page::{PageRequest, PageResult};
pub use predicate::{Literal, Operator, Predicate, build_predicates};
pub use sort::{SortDirection, SortSpec};
