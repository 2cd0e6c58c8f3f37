//! Aggregation queries over a [`crate::source::TabularSource`].
//!
//! Every operation validates its columns first (see [`crate::source::validate()`]), then makes a
//! single sequential pass over the rows and returns a fully materialized, deterministic result.
//!
//! Currently implemented:
//!
//! - [`extract_unique_values()`]: sorted distinct values of a column
//! - [`count_by_columns()`]: row counts per combination of column values
//! - [`top_n_values()`]: the most frequent values of a column
//! - [`values_in_date_range()`]: rows whose timestamp falls inside an inclusive date window
//!
//! Values are canonicalized with a [`NormalizationPolicy`] before they are compared.
//!
//! ## Example
//!
//! ```rust
//! use tabular_aggregation::aggregation::{
//!     count_by_columns, extract_unique_values, top_n_values, NormalizationPolicy,
//! };
//! use tabular_aggregation::source::MemorySource;
//! use tabular_aggregation::types::Header;
//!
//! let src = MemorySource::new("dogs.csv", Header::new(["Breed", "LicenseType"]))
//!     .with_row([" LAB   MIX", "Dog Individual Male"])
//!     .with_row(["Lab Mix", "Dog Individual Male"])
//!     .with_row(["POODLE", ""]);
//!
//! let folded = NormalizationPolicy::default().with_lowercase(true);
//! let breeds = extract_unique_values(&src, "Breed", folded).unwrap();
//! assert_eq!(breeds, vec!["labmix", "poodle"]);
//!
//! let counts = count_by_columns(&src, &["Breed", "LicenseType"], folded).unwrap();
//! assert_eq!(counts.get(&["labmix", "dogindividualmale"]), Some(2));
//! assert_eq!(counts.get(&["poodle", ""]), Some(1));
//!
//! let top = top_n_values(&src, "Breed", 1, folded).unwrap();
//! assert_eq!(top, vec![("labmix".to_string(), 2)]);
//! ```

pub mod date_range;
pub mod group;
pub mod normalize;
pub mod top;
pub mod unique;

pub use date_range::{parse_window, values_in_date_range, values_in_window};
pub use group::count_by_columns;
pub use normalize::NormalizationPolicy;
pub use top::{top_n_values, DEFAULT_TOP_N};
pub use unique::extract_unique_values;
