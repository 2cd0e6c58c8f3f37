use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{FailureKind, QueryError};

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum QuerySeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (the query failed).
    Error,
    /// Critical error (the source could not be read at all).
    Critical,
}

impl QuerySeverity {
    /// Severity of a failed query.
    pub fn for_error(error: &QueryError) -> Self {
        match error.kind() {
            FailureKind::MissingResource => Self::Critical,
            FailureKind::Format | FailureKind::Schema => Self::Error,
        }
    }
}

/// Context about a query attempt.
#[derive(Debug, Clone)]
pub struct QueryContext {
    /// Identifier (usually the path) of the queried source.
    pub source: String,
    /// Operation name, e.g. `"count_by_columns"`.
    pub operation: &'static str,
}

/// Stats reported on a successful query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryStats {
    /// Number of data rows scanned.
    pub rows_scanned: u64,
    /// Number of items in the result.
    pub output_len: usize,
}

/// Observer interface for query outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts. Aggregations never call observers
/// themselves; only [`super::run_query`] and friends do.
pub trait QueryObserver: Send + Sync {
    /// Called when a query succeeds.
    fn on_success(&self, _ctx: &QueryContext, _stats: QueryStats) {}

    /// Called when a query fails.
    fn on_failure(&self, _ctx: &QueryContext, _severity: QuerySeverity, _error: &QueryError) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &QueryContext, severity: QuerySeverity, error: &QueryError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn QueryObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn QueryObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl QueryObserver for CompositeObserver {
    fn on_success(&self, ctx: &QueryContext, stats: QueryStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &QueryContext, severity: QuerySeverity, error: &QueryError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &QueryContext, severity: QuerySeverity, error: &QueryError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Logs query events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl QueryObserver for StdErrObserver {
    fn on_success(&self, ctx: &QueryContext, stats: QueryStats) {
        eprintln!(
            "[query][ok] op={} source={} rows={} out={}",
            ctx.operation, ctx.source, stats.rows_scanned, stats.output_len
        );
    }

    fn on_failure(&self, ctx: &QueryContext, severity: QuerySeverity, error: &QueryError) {
        eprintln!(
            "[query][{:?}] op={} source={} kind={:?} err={}",
            severity,
            ctx.operation,
            ctx.source,
            error.kind(),
            error
        );
    }

    fn on_alert(&self, ctx: &QueryContext, severity: QuerySeverity, error: &QueryError) {
        eprintln!(
            "[ALERT][query][{:?}] op={} source={} kind={:?} err={}",
            severity,
            ctx.operation,
            ctx.source,
            error.kind(),
            error
        );
    }
}

/// Appends query events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl QueryObserver for FileObserver {
    fn on_success(&self, ctx: &QueryContext, stats: QueryStats) {
        self.append_line(&format!(
            "{} ok op={} source={} rows={} out={}",
            unix_ts(),
            ctx.operation,
            ctx.source,
            stats.rows_scanned,
            stats.output_len
        ));
    }

    fn on_failure(&self, ctx: &QueryContext, severity: QuerySeverity, error: &QueryError) {
        self.append_line(&format!(
            "{} fail severity={:?} kind={:?} op={} source={} err={}",
            unix_ts(),
            severity,
            error.kind(),
            ctx.operation,
            ctx.source,
            error
        ));
    }

    fn on_alert(&self, ctx: &QueryContext, severity: QuerySeverity, error: &QueryError) {
        self.append_line(&format!(
            "{} ALERT severity={:?} kind={:?} op={} source={} err={}",
            unix_ts(),
            severity,
            error.kind(),
            ctx.operation,
            ctx.source,
            error
        ));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
