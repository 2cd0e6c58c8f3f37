//! `tabular-aggregation` answers ad-hoc aggregation queries over delimited text tables (CSV):
//! distinct values of a column, row counts grouped by column combinations, the most frequent
//! values of a column, and rows whose timestamp falls inside an inclusive date window.
//!
//! The primary entrypoint is [`query::run_query`], which runs a [`query::Query`] against a CSV
//! file path. The operations are also available directly in [`aggregation`] for any
//! [`source::TabularSource`].
//!
//! ## Query contract
//!
//! Every call:
//!
//! 1. validates the source (`.csv` extension, readable, non-empty header) and every named column
//!    before reading a single data row
//! 2. scans all rows once, sequentially
//! 3. canonicalizes values with a [`aggregation::NormalizationPolicy`] (strip whitespace, then
//!    optionally lowercase)
//! 4. returns a fully materialized, deterministically ordered result
//!
//! Failures are [`QueryError`]s, each belonging to one [`FailureKind`]: missing resource, format,
//! or schema. Nothing is retried and no partial result is returned.
//!
//! ## Quick example
//!
//! ```no_run
//! use tabular_aggregation::query::{run_query, Query, QueryOptions};
//!
//! # fn main() -> Result<(), tabular_aggregation::QueryError> {
//! let opts = QueryOptions::default();
//! let breeds = run_query("2017.csv", &Query::unique_values("Breed"), &opts)?;
//! let licenses = run_query(
//!     "2017.csv",
//!     &Query::date_range("ValidDate", "12/25/2016", "12/31/2016", ["DogName", "Breed"]),
//!     &opts,
//! )?;
//! println!("{} breeds, {} licenses", breeds.len(), licenses.len());
//! println!("{}", licenses.to_json().unwrap());
//! # Ok(())
//! # }
//! ```
//!
//! ## Direct aggregation
//!
//! ```rust
//! use tabular_aggregation::aggregation::values_in_date_range;
//! use tabular_aggregation::source::MemorySource;
//! use tabular_aggregation::types::Header;
//!
//! let src = MemorySource::new("licenses.csv", Header::new(["ValidDate", "DogName"]))
//!     .with_row(["12/31/2016 23:59", "MAX"])
//!     .with_row(["1/4/2017 8:39", "RILEY"])
//!     .with_row(["", "GHOST"]);
//!
//! let rows = values_in_date_range(&src, "ValidDate", "1/4/2017", "2/4/2017", &["DogName"]).unwrap();
//! assert_eq!(rows.len(), 1);
//! assert_eq!(rows[0].get("DogName"), Some("RILEY"));
//! assert_eq!(rows[0].get("ValidDate"), Some("1/4/2017 8:39"));
//! ```
//!
//! ## Modules
//!
//! - [`source`]: the tabular source trait, CSV/in-memory sources and the schema validator
//! - [`aggregation`]: the four query operations and normalization
//! - [`query`]: path-based entrypoint, query/output enums and observers
//! - [`execution`]: parallel batches of independent queries
//! - [`types`]: header, aggregate keys, frequency tables, date windows, projections
//! - [`error`]: error types

pub mod aggregation;
pub mod error;
pub mod execution;
pub mod query;
pub mod source;
pub mod types;

pub use error::{FailureKind, QueryError, QueryResult};
