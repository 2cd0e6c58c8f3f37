//! In-memory source.

use csv::StringRecord;

use crate::error::QueryResult;
use crate::types::Header;

use super::TabularSource;

/// Rows already held in memory.
///
/// As with [`super::CsvSource`], rows are not length-checked: a short row reads its missing
/// cells as empty strings.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    identifier: String,
    header: Header,
    rows: Vec<StringRecord>,
}

impl MemorySource {
    /// Create an empty source. `identifier` still has to look like a `.csv` path to validate.
    pub fn new(identifier: impl Into<String>, header: Header) -> Self {
        Self {
            identifier: identifier.into(),
            header,
            rows: Vec::new(),
        }
    }

    /// Append one row of raw values.
    pub fn push_row<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut record = StringRecord::new();
        for v in values {
            record.push_field(v.as_ref());
        }
        self.rows.push(record);
    }

    /// Builder-style [`Self::push_row`].
    pub fn with_row<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.push_row(values);
        self
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

impl TabularSource for MemorySource {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn header(&self) -> QueryResult<Header> {
        Ok(self.header.clone())
    }

    fn scan(
        &self,
        visit: &mut dyn FnMut(u64, &StringRecord) -> QueryResult<()>,
    ) -> QueryResult<()> {
        for (idx0, record) in self.rows.iter().enumerate() {
            // +1 for 1-based, +1 for the header line.
            visit(idx0 as u64 + 2, record)?;
        }
        Ok(())
    }
}
