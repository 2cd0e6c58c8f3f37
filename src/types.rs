//! Core data model types for aggregation queries.
//!
//! A tabular source exposes a [`Header`] and a sequence of positional rows. Queries produce
//! [`FrequencyTable`]s keyed by [`AggregateKey`], or lists of [`Projection`]s filtered by a
//! [`DateWindow`].

use chrono::{NaiveDate, NaiveDateTime};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Format of date window bounds (`month/day/year`).
pub const WINDOW_DATE_FORMAT: &str = "%m/%d/%Y";

/// Format of row timestamps (`month/day/year hour:minute`, 24-hour clock).
pub const ROW_TIMESTAMP_FORMAT: &str = "%m/%d/%Y %H:%M";

/// Ordered column names of a tabular source.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Header {
    names: Vec<String>,
}

impl Header {
    /// Create a header from column names, in order.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Column names in order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// `true` when the header has no columns.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns the index of a column by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }
}

impl From<&csv::StringRecord> for Header {
    fn from(record: &csv::StringRecord) -> Self {
        Self::new(record.iter())
    }
}

/// Group identity for counting: one normalized value per requested column, in request order.
///
/// Equality is structural, so values containing delimiter-like characters never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct AggregateKey(Vec<String>);

impl AggregateKey {
    /// Create a key from already-normalized values.
    pub fn new(values: Vec<String>) -> Self {
        Self(values)
    }

    /// The per-column values of this key.
    pub fn values(&self) -> &[String] {
        &self.0
    }

    /// Number of columns in the key.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` for a zero-column key.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Unwrap a single-column key back to its bare value.
    pub fn into_single(self) -> Option<String> {
        let mut values = self.0;
        if values.len() == 1 { values.pop() } else { None }
    }
}

impl<S: Into<String>> FromIterator<S> for AggregateKey {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// One row of a [`FrequencyTable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyEntry {
    /// Group identity.
    pub key: AggregateKey,
    /// Number of rows in the group.
    pub count: u64,
}

/// Group counts ranked by descending count.
///
/// Groups with equal counts are kept in the order their key was first seen during the scan.
/// That tie order is an implementation detail rather than a portable guarantee.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct FrequencyTable {
    entries: Vec<FrequencyEntry>,
}

impl FrequencyTable {
    /// Rank `entries` (given in first-seen order) by descending count.
    pub fn ranked(mut entries: Vec<FrequencyEntry>) -> Self {
        // `sort_by` is stable, so ties keep first-seen order.
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        Self { entries }
    }

    /// Ranked entries.
    pub fn entries(&self) -> &[FrequencyEntry] {
        &self.entries
    }

    /// Consume the table, returning ranked entries.
    pub fn into_entries(self) -> Vec<FrequencyEntry> {
        self.entries
    }

    /// Iterate `(key, count)` pairs in rank order.
    pub fn iter(&self) -> impl Iterator<Item = (&AggregateKey, u64)> {
        self.entries.iter().map(|e| (&e.key, e.count))
    }

    /// Count for the group whose key values equal `values`, if any.
    pub fn get<S: AsRef<str>>(&self, values: &[S]) -> Option<u64> {
        self.entries
            .iter()
            .find(|e| {
                e.key.len() == values.len()
                    && e.key.values().iter().zip(values).all(|(a, b)| a == b.as_ref())
            })
            .map(|e| e.count)
    }

    /// Number of distinct groups.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when no rows were counted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all group counts (equals the number of scanned rows).
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| e.count).sum()
    }
}

/// Inclusive calendar-date interval `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    /// First included date.
    pub start: NaiveDate,
    /// Last included date.
    pub end: NaiveDate,
}

impl DateWindow {
    /// Create a window from two dates.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// `true` if the date part of `ts` lies inside the window; time of day is ignored.
    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        let date = ts.date();
        self.start <= date && date <= self.end
    }
}

/// Raw values of one qualifying row: the date column first, then the requested target columns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Projection {
    fields: Vec<(String, String)>,
}

impl Projection {
    /// Create a projection from ordered `(column, raw value)` pairs.
    pub fn new(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    /// Raw value of `column`, if projected.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v.as_str())
    }

    /// Projected column names in order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(c, _)| c.as_str())
    }

    /// `(column, raw value)` pairs in order.
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }
}

impl Serialize for Projection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (column, value) in &self.fields {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}
