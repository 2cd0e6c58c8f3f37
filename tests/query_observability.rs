use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use tabular_aggregation::query::{
    run_query, CompositeObserver, FileObserver, Query, QueryContext, QueryObserver, QueryOptions,
    QuerySeverity, QueryStats,
};
use tabular_aggregation::QueryError;

#[derive(Default)]
struct RecordingObserver {
    successes: Mutex<Vec<(&'static str, QueryStats)>>,
    failures: Mutex<Vec<QuerySeverity>>,
    alerts: Mutex<Vec<QuerySeverity>>,
}

impl QueryObserver for RecordingObserver {
    fn on_success(&self, ctx: &QueryContext, stats: QueryStats) {
        self.successes.lock().unwrap().push((ctx.operation, stats));
    }

    fn on_failure(&self, _ctx: &QueryContext, severity: QuerySeverity, _error: &QueryError) {
        self.failures.lock().unwrap().push(severity);
    }

    fn on_alert(&self, _ctx: &QueryContext, severity: QuerySeverity, _error: &QueryError) {
        self.alerts.lock().unwrap().push(severity);
    }
}

fn options(obs: Arc<RecordingObserver>, alert_at_or_above: QuerySeverity) -> QueryOptions {
    QueryOptions {
        observer: Some(obs),
        alert_at_or_above,
    }
}

#[test]
fn observer_receives_stats_on_success() {
    let obs = Arc::new(RecordingObserver::default());
    let out = run_query(
        "tests/fixtures/test_data.csv",
        &Query::top_n("Breed"),
        &options(obs.clone(), QuerySeverity::Critical),
    )
    .unwrap();
    assert_eq!(out.len(), 4);

    let successes = obs.successes.lock().unwrap().clone();
    assert_eq!(
        successes,
        vec![(
            "top_n_values",
            QueryStats {
                rows_scanned: 10,
                output_len: 4
            }
        )]
    );
    assert!(obs.failures.lock().unwrap().is_empty());
}

#[test]
fn observer_receives_failure_and_alert_on_missing_file() {
    let obs = Arc::new(RecordingObserver::default());
    let _ = run_query(
        "tests/fixtures/does_not_exist.csv",
        &Query::unique_values("Breed"),
        &options(obs.clone(), QuerySeverity::Critical),
    )
    .unwrap_err();

    assert_eq!(obs.failures.lock().unwrap().clone(), vec![QuerySeverity::Critical]);
    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![QuerySeverity::Critical]);
}

#[test]
fn schema_error_does_not_alert_at_critical_threshold() {
    let obs = Arc::new(RecordingObserver::default());
    let _ = run_query(
        "tests/fixtures/test_data.csv",
        &Query::count_by_columns(["Breed", "definitely_missing"]),
        &options(obs.clone(), QuerySeverity::Critical),
    )
    .unwrap_err();

    assert_eq!(obs.failures.lock().unwrap().clone(), vec![QuerySeverity::Error]);
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn lower_threshold_alerts_on_format_errors() {
    let obs = Arc::new(RecordingObserver::default());
    let _ = run_query(
        "tests/fixtures/bad_dates.csv",
        &Query::date_range("ValidDate", "1/1/2017", "1/31/2017", ["DogName"]),
        &options(obs.clone(), QuerySeverity::Error),
    )
    .unwrap_err();

    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![QuerySeverity::Error]);
}

#[test]
fn composite_fans_out_to_file_observer() {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let log = std::env::temp_dir().join(format!("tabular-aggregation-observer-{nanos}.log"));

    let recording = Arc::new(RecordingObserver::default());
    let composite = CompositeObserver::new(vec![
        recording.clone() as Arc<dyn QueryObserver>,
        Arc::new(FileObserver::new(&log)) as Arc<dyn QueryObserver>,
    ]);
    let opts = QueryOptions {
        observer: Some(Arc::new(composite)),
        ..Default::default()
    };

    run_query("tests/fixtures/whitespaces.csv", &Query::unique_values("Breed"), &opts).unwrap();
    let _ = run_query("tests/fixtures/empty.csv", &Query::unique_values("Breed"), &opts);

    let contents = std::fs::read_to_string(&log).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("ok op=extract_unique_values"));
    assert!(lines[0].contains("rows=5 out=3"));
    assert!(lines[1].contains("fail severity=Error kind=Format"));
    assert_eq!(recording.successes.lock().unwrap().len(), 1);
    assert_eq!(recording.failures.lock().unwrap().len(), 1);
}
