//! Row counts grouped by a combination of columns.

use std::collections::HashMap;

use crate::error::QueryResult;
use crate::source::{cell, validate, TabularSource};
use crate::types::{AggregateKey, FrequencyEntry, FrequencyTable};

use super::NormalizationPolicy;

/// Count rows per distinct combination of normalized `columns` values.
///
/// - The key holds one value per requested column, in the order given.
/// - Empty cells are not skipped: they group under `""`. Every row lands in exactly one group,
///   so counts sum to the row count.
/// - The table is ranked by descending count. Equal counts stay in first-seen order, but callers
///   should not rely on that tie order.
pub fn count_by_columns<S, C>(
    source: &S,
    columns: &[C],
    policy: NormalizationPolicy,
) -> QueryResult<FrequencyTable>
where
    S: TabularSource + ?Sized,
    C: AsRef<str>,
{
    let idxs = validate(source, columns)?;

    let mut slots: HashMap<AggregateKey, usize> = HashMap::new();
    let mut entries: Vec<FrequencyEntry> = Vec::new();
    source.scan(&mut |_, record| {
        let key: AggregateKey = idxs.iter().map(|&i| policy.apply(cell(record, i))).collect();
        match slots.get(&key) {
            Some(&slot) => entries[slot].count += 1,
            None => {
                slots.insert(key.clone(), entries.len());
                entries.push(FrequencyEntry { key, count: 1 });
            }
        }
        Ok(())
    })?;

    Ok(FrequencyTable::ranked(entries))
}
