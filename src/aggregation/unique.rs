//! Distinct values of one column.

use std::collections::BTreeSet;

use crate::error::QueryResult;
use crate::source::{cell, validate, TabularSource};

use super::NormalizationPolicy;

/// Distinct normalized values of `column`, sorted ascending (byte-wise, not locale-aware).
///
/// Cells that are empty as read are skipped before normalization, so they never show up in the
/// result.
pub fn extract_unique_values<S>(
    source: &S,
    column: &str,
    policy: NormalizationPolicy,
) -> QueryResult<Vec<String>>
where
    S: TabularSource + ?Sized,
{
    let idx = validate(source, &[column])?[0];

    let mut unique = BTreeSet::new();
    source.scan(&mut |_, record| {
        let raw = cell(record, idx);
        if !raw.is_empty() {
            unique.insert(policy.apply(raw));
        }
        Ok(())
    })?;

    Ok(unique.into_iter().collect())
}
