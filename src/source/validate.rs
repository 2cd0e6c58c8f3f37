//! Schema validation run before every aggregation.

use crate::error::{QueryError, QueryResult};

use super::TabularSource;

/// File extension (case-insensitive) a tabular source identifier must carry.
pub const TABULAR_EXTENSION: &str = "csv";

/// `true` if `identifier` ends in `.csv` (any case), including the bare name `.csv`.
pub fn has_tabular_extension(identifier: &str) -> bool {
    let bytes = identifier.as_bytes();
    bytes
        .len()
        .checked_sub(TABULAR_EXTENSION.len() + 1)
        .map(|start| &bytes[start..])
        .is_some_and(|suffix| {
            suffix[0] == b'.' && suffix[1..].eq_ignore_ascii_case(TABULAR_EXTENSION.as_bytes())
        })
}

/// Check that `source` can serve a query over `required_columns`.
///
/// Checks run in this order and stop at the first failure:
///
/// 1. the identifier has the `.csv` extension ([`QueryError::UnsupportedExtension`])
/// 2. the header can be read ([`QueryError::MissingResource`])
/// 3. the header is not empty ([`QueryError::EmptyHeader`])
/// 4. no required column name is empty or whitespace-only ([`QueryError::EmptyColumnName`])
/// 5. every required column is in the header ([`QueryError::UnknownColumn`])
///
/// Only the header is read. On success, returns each required column's header index in the order
/// given.
pub fn validate<S, C>(source: &S, required_columns: &[C]) -> QueryResult<Vec<usize>>
where
    S: TabularSource + ?Sized,
    C: AsRef<str>,
{
    let identifier = source.identifier();
    if !has_tabular_extension(identifier) {
        return Err(QueryError::UnsupportedExtension {
            identifier: identifier.to_owned(),
        });
    }

    let header = source.header()?;
    if header.is_empty() {
        return Err(QueryError::EmptyHeader {
            identifier: identifier.to_owned(),
        });
    }

    if required_columns.iter().any(|c| c.as_ref().trim().is_empty()) {
        return Err(QueryError::EmptyColumnName);
    }

    required_columns
        .iter()
        .map(|column| {
            let column = column.as_ref();
            header.index_of(column).ok_or_else(|| QueryError::UnknownColumn {
                column: column.to_owned(),
                headers: header.names().to_vec(),
            })
        })
        .collect()
}
