//! Tabular sources and the schema validator.
//!
//! Aggregations read data through the [`TabularSource`] trait: a header read that never consumes
//! data rows, and one sequential scan over every data row. Two implementations are provided:
//!
//! - [`CsvSource`]: a delimited text file on disk
//! - [`MemorySource`]: rows already held in memory
//!
//! [`validate()`] checks a source's extension, readability and header before any query runs.

pub mod csv;
pub mod memory;
pub mod validate;

use crate::error::QueryResult;
use crate::types::Header;

pub use self::csv::CsvSource;
pub use memory::MemorySource;
pub use validate::{has_tabular_extension, validate, TABULAR_EXTENSION};

/// Read-only access to a header plus positional rows.
///
/// Implementations must not cache data across calls: every [`TabularSource::scan`] reads the
/// source from the start.
pub trait TabularSource {
    /// Path-like identifier; its suffix decides whether the source is tabular.
    fn identifier(&self) -> &str;

    /// Read the header row only.
    ///
    /// Fails with a missing-resource error when the source cannot be opened. An empty header is
    /// returned as-is; the validator decides what to do with it.
    fn header(&self) -> QueryResult<Header>;

    /// Visit every data row in order.
    ///
    /// `visit` receives the 1-based line the row started on (the header is line 1) and the row's
    /// raw values, positionally aligned with [`TabularSource::header`]. An error returned by
    /// `visit` stops the scan and is propagated.
    fn scan(
        &self,
        visit: &mut dyn FnMut(u64, &::csv::StringRecord) -> QueryResult<()>,
    ) -> QueryResult<()>;
}

/// Raw value at `idx`, treating an absent cell as empty.
pub(crate) fn cell(record: &::csv::StringRecord, idx: usize) -> &str {
    record.get(idx).unwrap_or("")
}
