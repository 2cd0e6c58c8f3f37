//! Row projection filtered by an inclusive date window.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{QueryError, QueryResult};
use crate::source::{cell, validate, TabularSource};
use crate::types::{DateWindow, Projection, ROW_TIMESTAMP_FORMAT, WINDOW_DATE_FORMAT};

/// Parse `month/day/year` window bounds.
///
/// A window whose start is after its end is accepted; it simply matches nothing.
pub fn parse_window(start: &str, end: &str) -> QueryResult<DateWindow> {
    Ok(DateWindow::new(parse_bound(start)?, parse_bound(end)?))
}

fn parse_bound(raw: &str) -> QueryResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, WINDOW_DATE_FORMAT).map_err(|_| QueryError::InvalidWindowBound {
        raw: raw.to_owned(),
    })
}

/// Rows whose `date_column` timestamp falls in `[start, end]`, projected onto the date column and
/// `target_columns`.
///
/// `start`/`end` are `month/day/year` dates and are parsed before any row is read. See
/// [`values_in_window`] for the row rules.
pub fn values_in_date_range<S, C>(
    source: &S,
    date_column: &str,
    start: &str,
    end: &str,
    target_columns: &[C],
) -> QueryResult<Vec<Projection>>
where
    S: TabularSource + ?Sized,
    C: AsRef<str>,
{
    // Columns are validated before the bounds are parsed.
    let projected = resolve_projection(source, date_column, target_columns)?;
    let window = parse_window(start, end)?;
    scan_window(source, &projected, window)
}

/// Like [`values_in_date_range`], with an already-built [`DateWindow`].
///
/// Row rules:
///
/// - an empty date cell skips the row
/// - a non-empty date cell that is not `month/day/year hour:minute` aborts the whole call with
///   [`QueryError::InvalidTimestamp`]
/// - a row qualifies when the date part of its timestamp is inside the window, whatever the time
///
/// Each [`Projection`] holds the raw date value first, then each target column's raw value in
/// the order requested (a column is projected once even if requested twice). Source row order is
/// preserved.
pub fn values_in_window<S, C>(
    source: &S,
    date_column: &str,
    window: DateWindow,
    target_columns: &[C],
) -> QueryResult<Vec<Projection>>
where
    S: TabularSource + ?Sized,
    C: AsRef<str>,
{
    let projected = resolve_projection(source, date_column, target_columns)?;
    scan_window(source, &projected, window)
}

/// Validated `(column, header index)` pairs; the date column comes first.
fn resolve_projection<S, C>(
    source: &S,
    date_column: &str,
    target_columns: &[C],
) -> QueryResult<Vec<(String, usize)>>
where
    S: TabularSource + ?Sized,
    C: AsRef<str>,
{
    let mut required: Vec<&str> = Vec::with_capacity(target_columns.len() + 1);
    required.push(date_column);
    required.extend(target_columns.iter().map(AsRef::as_ref));

    let idxs = validate(source, &required)?;

    let mut projected: Vec<(String, usize)> = Vec::with_capacity(required.len());
    for (column, idx) in required.into_iter().zip(idxs) {
        if !projected.iter().any(|(c, _)| c == column) {
            projected.push((column.to_owned(), idx));
        }
    }
    Ok(projected)
}

fn scan_window<S>(
    source: &S,
    projected: &[(String, usize)],
    window: DateWindow,
) -> QueryResult<Vec<Projection>>
where
    S: TabularSource + ?Sized,
{
    let (date_column, date_idx) = (&projected[0].0, projected[0].1);

    let mut out = Vec::new();
    source.scan(&mut |line, record| {
        let raw = cell(record, date_idx);
        if raw.is_empty() {
            return Ok(());
        }
        let ts = NaiveDateTime::parse_from_str(raw, ROW_TIMESTAMP_FORMAT).map_err(|_| {
            QueryError::InvalidTimestamp {
                line,
                column: date_column.clone(),
                raw: raw.to_owned(),
            }
        })?;
        if window.contains(ts) {
            out.push(Projection::new(
                projected
                    .iter()
                    .map(|(column, idx)| (column.clone(), cell(record, *idx).to_owned()))
                    .collect(),
            ));
        }
        Ok(())
    })?;
    Ok(out)
}
