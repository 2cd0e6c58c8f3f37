//! Most frequent values of one column.

use crate::error::QueryResult;
use crate::source::TabularSource;

use super::{count_by_columns, NormalizationPolicy};

/// Default bound for [`top_n_values`].
pub const DEFAULT_TOP_N: usize = 5;

/// The `n` most frequent normalized values of `column`, with their counts.
///
/// The ranking is [`count_by_columns`] over `[column]`, so equal counts keep first-seen order.
/// Returns every distinct value when `n` exceeds their number, and nothing when `n == 0` (the
/// column is still validated).
pub fn top_n_values<S>(
    source: &S,
    column: &str,
    n: usize,
    policy: NormalizationPolicy,
) -> QueryResult<Vec<(String, u64)>>
where
    S: TabularSource + ?Sized,
{
    let table = count_by_columns(source, &[column], policy)?;
    Ok(table
        .into_entries()
        .into_iter()
        .filter_map(|e| e.key.into_single().map(|value| (value, e.count)))
        .take(n)
        .collect())
}
