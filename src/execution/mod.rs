//! Batch execution of independent queries.
//!
//! Every query is still a single sequential pass over one source; this module only runs many
//! such calls side by side:
//!
//! - [`BatchEngine`] runs [`QueryRequest`]s on a bounded rayon thread pool
//! - [`requests_for_pattern`] expands a glob pattern into one request per matching file
//!
//! Outcomes are returned in request order, and one failing request never affects the others.

use std::path::PathBuf;

use rayon::prelude::*;
use rayon::ThreadPool;
use rayon::ThreadPoolBuilder;

use crate::error::{QueryError, QueryResult};
use crate::query::{Query, QueryOptions, QueryOutput, QueryRequest};

/// Configuration for the [`BatchEngine`].
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Number of worker threads.
    ///
    /// If `None`, uses the platform's available parallelism.
    pub num_threads: Option<usize>,
}

impl Default for BatchOptions {
    fn default() -> Self {
        let n = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
        Self {
            num_threads: Some(n),
        }
    }
}

/// Result of one request in a batch.
#[derive(Debug)]
pub struct BatchOutcome {
    /// Source the request ran against.
    pub path: PathBuf,
    /// What the query returned.
    pub result: QueryResult<QueryOutput>,
}

/// Outcomes of a batch, in request order.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// One outcome per request.
    pub outcomes: Vec<BatchOutcome>,
}

impl BatchReport {
    /// Number of requests that succeeded.
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    /// Number of requests that failed.
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

/// Runs independent query requests in parallel.
pub struct BatchEngine {
    pool: ThreadPool,
}

impl BatchEngine {
    /// Create a new engine with the given options.
    ///
    /// # Panics
    ///
    /// Panics if `num_threads == Some(0)` or the thread pool cannot be built.
    pub fn new(opts: BatchOptions) -> Self {
        if let Some(n) = opts.num_threads {
            assert!(n > 0, "num_threads must be > 0 when set");
        }

        let n_threads = opts
            .num_threads
            .unwrap_or_else(|| std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1))
            .max(1);

        let pool = ThreadPoolBuilder::new()
            .num_threads(n_threads)
            .build()
            .expect("failed to build rayon thread pool");

        Self { pool }
    }

    /// Number of worker threads.
    pub fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Run every request, each as one sequential call, returning outcomes in request order.
    pub fn run(&self, requests: &[QueryRequest]) -> BatchReport {
        let outcomes: Vec<BatchOutcome> = self.pool.install(|| {
            requests
                .par_iter()
                .map(|req| BatchOutcome {
                    path: req.path.clone(),
                    result: req.run(),
                })
                .collect()
        });
        BatchReport { outcomes }
    }
}

/// Build one request per file matching `pattern` (glob syntax, e.g. `data/*.csv`).
///
/// Paths come back in glob order (alphabetical). A pattern that matches nothing yields an empty
/// list; an unreadable directory entry fails with [`QueryError::MissingResource`].
pub fn requests_for_pattern(
    pattern: &str,
    query: &Query,
    options: &QueryOptions,
) -> QueryResult<Vec<QueryRequest>> {
    let paths = glob::glob(pattern).map_err(|e| QueryError::InvalidPattern {
        pattern: pattern.to_owned(),
        message: e.to_string(),
    })?;

    paths
        .map(|entry| -> QueryResult<QueryRequest> {
            let path = entry.map_err(|e| QueryError::MissingResource {
                path: e.path().to_path_buf(),
                source: e.into_error(),
            })?;
            Ok(QueryRequest {
                path,
                query: query.clone(),
                options: options.clone(),
            })
        })
        .collect()
}
