//! Unified query entrypoint.
//!
//! Most callers should use [`run_query`], which runs one [`Query`] against a CSV file and returns
//! a [`QueryOutput`].
//!
//! - Each call opens the file, validates the requested columns, scans every row once and returns.
//! - If a [`super::observability::QueryObserver`] is provided, success/failure/alerts are reported
//!   to it. The aggregations themselves never log.

use std::cell::Cell;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use crate::aggregation::{
    count_by_columns, extract_unique_values, top_n_values, values_in_date_range,
    NormalizationPolicy, DEFAULT_TOP_N,
};
use crate::error::QueryResult;
use crate::source::{CsvSource, TabularSource};
use crate::types::{FrequencyTable, Header, Projection};

use super::observability::{QueryContext, QueryObserver, QuerySeverity, QueryStats};

/// One aggregation request, independent of the source it runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// See [`extract_unique_values`].
    UniqueValues {
        column: String,
        policy: NormalizationPolicy,
    },
    /// See [`count_by_columns`].
    CountByColumns {
        columns: Vec<String>,
        policy: NormalizationPolicy,
    },
    /// See [`top_n_values`].
    TopN {
        column: String,
        n: usize,
        policy: NormalizationPolicy,
    },
    /// See [`values_in_date_range`].
    DateRange {
        date_column: String,
        start: String,
        end: String,
        target_columns: Vec<String>,
    },
}

impl Query {
    /// Unique values of `column` with the default policy.
    pub fn unique_values(column: impl Into<String>) -> Self {
        Self::UniqueValues {
            column: column.into(),
            policy: NormalizationPolicy::default(),
        }
    }

    /// Group counts over `columns` with the default policy.
    pub fn count_by_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::CountByColumns {
            columns: columns.into_iter().map(Into::into).collect(),
            policy: NormalizationPolicy::default(),
        }
    }

    /// Top [`DEFAULT_TOP_N`] values of `column` with the default policy.
    pub fn top_n(column: impl Into<String>) -> Self {
        Self::TopN {
            column: column.into(),
            n: DEFAULT_TOP_N,
            policy: NormalizationPolicy::default(),
        }
    }

    /// Rows with `date_column` in `[start, end]`, projected onto `target_columns`.
    pub fn date_range<I, S>(
        date_column: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
        target_columns: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::DateRange {
            date_column: date_column.into(),
            start: start.into(),
            end: end.into(),
            target_columns: target_columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Replace the normalization policy (no-op for [`Query::DateRange`], which reads raw values).
    pub fn with_policy(mut self, new_policy: NormalizationPolicy) -> Self {
        match &mut self {
            Self::UniqueValues { policy, .. }
            | Self::CountByColumns { policy, .. }
            | Self::TopN { policy, .. } => *policy = new_policy,
            Self::DateRange { .. } => {}
        }
        self
    }

    /// Stable operation name used in observer contexts.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::UniqueValues { .. } => "extract_unique_values",
            Self::CountByColumns { .. } => "count_by_columns",
            Self::TopN { .. } => "top_n_values",
            Self::DateRange { .. } => "values_in_date_range",
        }
    }

    /// Run the query against `source`.
    pub fn execute<S: TabularSource + ?Sized>(&self, source: &S) -> QueryResult<QueryOutput> {
        Ok(match self {
            Self::UniqueValues { column, policy } => {
                QueryOutput::UniqueValues(extract_unique_values(source, column, *policy)?)
            }
            Self::CountByColumns { columns, policy } => {
                QueryOutput::Counts(count_by_columns(source, columns.as_slice(), *policy)?)
            }
            Self::TopN { column, n, policy } => {
                QueryOutput::TopN(top_n_values(source, column, *n, *policy)?)
            }
            Self::DateRange {
                date_column,
                start,
                end,
                target_columns,
            } => QueryOutput::Rows(values_in_date_range(
                source,
                date_column,
                start,
                end,
                target_columns.as_slice(),
            )?),
        })
    }
}

/// Result of a [`Query`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "result", rename_all = "snake_case")]
pub enum QueryOutput {
    /// Sorted distinct values.
    UniqueValues(Vec<String>),
    /// Ranked group counts.
    Counts(FrequencyTable),
    /// Ranked `(value, count)` pairs.
    TopN(Vec<(String, u64)>),
    /// Projected rows in source order.
    Rows(Vec<Projection>),
}

impl QueryOutput {
    /// Number of values, groups, pairs or rows in the result.
    pub fn len(&self) -> usize {
        match self {
            Self::UniqueValues(v) => v.len(),
            Self::Counts(t) => t.len(),
            Self::TopN(v) => v.len(),
            Self::Rows(v) => v.len(),
        }
    }

    /// `true` when the result holds nothing.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render as JSON: `{"kind": "...", "result": ...}`.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Options controlling unified query behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct QueryOptions {
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn QueryObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: QuerySeverity,
}

impl fmt::Debug for QueryOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryOptions")
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            observer: None,
            alert_at_or_above: QuerySeverity::Critical,
        }
    }
}

/// Run `query` against the CSV file at `path`.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with rows scanned and result length
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ```no_run
/// use tabular_aggregation::query::{run_query, Query, QueryOptions, QueryOutput};
///
/// # fn main() -> Result<(), tabular_aggregation::QueryError> {
/// let out = run_query("2017.csv", &Query::top_n("DogName"), &QueryOptions::default())?;
/// if let QueryOutput::TopN(names) = out {
///     for (name, count) in names {
///         println!("{name}: {count}");
///     }
/// }
/// # Ok(())
/// # }
/// ```
///
/// ## Observability (stderr logging + alert threshold)
///
/// ```no_run
/// use std::sync::Arc;
///
/// use tabular_aggregation::query::{run_query, Query, QueryOptions, QuerySeverity, StdErrObserver};
///
/// let opts = QueryOptions {
///     observer: Some(Arc::new(StdErrObserver::default())),
///     alert_at_or_above: QuerySeverity::Critical,
/// };
///
/// // Missing files are Critical and trigger `on_alert` at this threshold.
/// let _err = run_query("does_not_exist.csv", &Query::unique_values("Breed"), &opts).unwrap_err();
/// ```
pub fn run_query(
    path: impl AsRef<Path>,
    query: &Query,
    options: &QueryOptions,
) -> QueryResult<QueryOutput> {
    run_query_on(&CsvSource::new(path), query, options)
}

/// Run `query` against any [`TabularSource`], reporting to `options.observer`.
pub fn run_query_on<S: TabularSource + ?Sized>(
    source: &S,
    query: &Query,
    options: &QueryOptions,
) -> QueryResult<QueryOutput> {
    let counted = RowCounter::new(source);
    let result = query.execute(&counted);

    if let Some(obs) = options.observer.as_ref() {
        let ctx = QueryContext {
            source: source.identifier().to_owned(),
            operation: query.operation(),
        };
        match &result {
            Ok(out) => obs.on_success(
                &ctx,
                QueryStats {
                    rows_scanned: counted.rows.get(),
                    output_len: out.len(),
                },
            ),
            Err(e) => {
                let sev = QuerySeverity::for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

/// Pass-through source that counts rows handed to the aggregation.
struct RowCounter<'a, S: ?Sized> {
    inner: &'a S,
    rows: Cell<u64>,
}

impl<'a, S: TabularSource + ?Sized> RowCounter<'a, S> {
    fn new(inner: &'a S) -> Self {
        Self {
            inner,
            rows: Cell::new(0),
        }
    }
}

impl<S: TabularSource + ?Sized> TabularSource for RowCounter<'_, S> {
    fn identifier(&self) -> &str {
        self.inner.identifier()
    }

    fn header(&self) -> QueryResult<Header> {
        self.inner.header()
    }

    fn scan(
        &self,
        visit: &mut dyn FnMut(u64, &csv::StringRecord) -> QueryResult<()>,
    ) -> QueryResult<()> {
        self.inner.scan(&mut |line, record| {
            self.rows.set(self.rows.get() + 1);
            visit(line, record)
        })
    }
}

/// Convenience helper for callers that want an owned request object.
///
/// This is what [`crate::execution::run_batch`] schedules.
#[derive(Clone)]
pub struct QueryRequest {
    /// Path to the CSV file.
    pub path: PathBuf,
    /// Query to run.
    pub query: Query,
    /// Options controlling reporting.
    pub options: QueryOptions,
}

impl fmt::Debug for QueryRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryRequest")
            .field("path", &self.path)
            .field("operation", &self.query.operation())
            .field("options", &self.options)
            .finish()
    }
}

impl QueryRequest {
    /// Create a request with default options.
    pub fn new(path: impl Into<PathBuf>, query: Query) -> Self {
        Self {
            path: path.into(),
            query,
            options: QueryOptions::default(),
        }
    }

    /// Execute the request by calling [`run_query`].
    pub fn run(&self) -> QueryResult<QueryOutput> {
        run_query(&self.path, &self.query, &self.options)
    }
}
