//! CSV file source.

use std::fs::File;
use std::path::{Path, PathBuf};

use csv::StringRecord;

use crate::error::{QueryError, QueryResult};
use crate::types::Header;

use super::TabularSource;

/// A delimited text file with a header row.
///
/// Rules:
///
/// - The first record is the header.
/// - Records may have fewer or more fields than the header. Missing cells read as empty strings
///   and extra cells are ignored.
/// - Unparsable records (e.g. invalid UTF-8) fail the scan with a malformed-row error.
/// - The file is reopened for every header read and every scan.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
    identifier: String,
    delimiter: u8,
}

impl CsvSource {
    /// Create a comma-delimited source for `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        Self {
            identifier: path.to_string_lossy().into_owned(),
            path,
            delimiter: b',',
        }
    }

    /// Use a different field delimiter (e.g. `b'\t'` or `b';'`).
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Path of the underlying file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn reader(&self) -> QueryResult<csv::Reader<File>> {
        let file = File::open(&self.path).map_err(|source| QueryError::MissingResource {
            path: self.path.clone(),
            source,
        })?;
        Ok(csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_reader(file))
    }
}

impl TabularSource for CsvSource {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn header(&self) -> QueryResult<Header> {
        let mut rdr = self.reader()?;
        let headers = rdr
            .headers()
            .map_err(|e| QueryError::from_csv(&self.path, e))?;
        Ok(Header::from(headers))
    }

    fn scan(
        &self,
        visit: &mut dyn FnMut(u64, &StringRecord) -> QueryResult<()>,
    ) -> QueryResult<()> {
        let mut rdr = self.reader()?;
        let mut record = StringRecord::new();
        while rdr
            .read_record(&mut record)
            .map_err(|e| QueryError::from_csv(&self.path, e))?
        {
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            visit(line, &record)?;
        }
        Ok(())
    }
}
