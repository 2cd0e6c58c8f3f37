//! Path-based query entrypoints and outcome reporting.
//!
//! Most callers should use [`run_query`] (from [`unified`]) which:
//!
//! - runs one [`Query`] against a CSV file
//! - returns a serializable [`QueryOutput`]
//! - optionally reports success/failure/alerts to a [`QueryObserver`]
//!
//! The operations themselves live in [`crate::aggregation`] and can be called directly on any
//! [`crate::source::TabularSource`].

pub mod observability;
pub mod unified;

pub use observability::{
    CompositeObserver, FileObserver, QueryContext, QueryObserver, QuerySeverity, QueryStats,
    StdErrObserver,
};
pub use unified::{run_query, run_query_on, Query, QueryOptions, QueryOutput, QueryRequest};
