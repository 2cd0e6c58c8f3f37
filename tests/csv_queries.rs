use tabular_aggregation::aggregation::{
    count_by_columns, extract_unique_values, top_n_values, values_in_date_range,
    NormalizationPolicy,
};
use tabular_aggregation::source::CsvSource;
use tabular_aggregation::types::Projection;
use tabular_aggregation::{FailureKind, QueryError};

fn fixture(name: &str) -> CsvSource {
    CsvSource::new(format!("tests/fixtures/{name}"))
}

fn folded() -> NormalizationPolicy {
    NormalizationPolicy::new(true, true)
}

#[test]
fn empty_csv_file_is_format_error() {
    let err = extract_unique_values(&fixture("empty.csv"), "ColumnName", folded()).unwrap_err();
    assert_eq!(err.kind(), FailureKind::Format);
    assert!(err.to_string().contains("is empty"));
}

#[test]
fn non_csv_extension_is_format_error() {
    let err =
        extract_unique_values(&fixture("invalid_file.txt"), "Breed", folded()).unwrap_err();
    assert_eq!(err.kind(), FailureKind::Format);
    assert!(err.to_string().contains("is not a valid CSV file"));
}

#[test]
fn missing_file_is_missing_resource() {
    let err = extract_unique_values(&fixture("does_not_exist.csv"), "Breed", folded())
        .unwrap_err();
    assert_eq!(err.kind(), FailureKind::MissingResource);
}

#[test]
fn column_not_found_is_schema_error() {
    let err = extract_unique_values(&fixture("whitespaces.csv"), "NonExistentColumn", folded())
        .unwrap_err();
    assert_eq!(err.kind(), FailureKind::Schema);
    assert!(err.to_string().contains("'NonExistentColumn' does not exist"));
}

#[test]
fn empty_column_name_is_schema_error() {
    let err = extract_unique_values(&fixture("whitespaces.csv"), "", folded()).unwrap_err();
    assert!(matches!(err, QueryError::EmptyColumnName));
    assert_eq!(err.kind(), FailureKind::Schema);
}

#[test]
fn unique_values_are_normalized() {
    let values = extract_unique_values(&fixture("whitespaces.csv"), "Breed", folded()).unwrap();
    assert_eq!(values, vec!["bichonfrise", "chihuahua", "labmix"]);
}

#[test]
fn unique_values_are_lowercased() {
    let values = extract_unique_values(&fixture("lowercase.csv"), "Breed", folded()).unwrap();
    assert_eq!(values, vec!["42!bichonfrise"]);
}

#[test]
fn unique_values_without_normalization() {
    let values = extract_unique_values(
        &fixture("whitespaces.csv"),
        "Breed",
        NormalizationPolicy::RAW,
    )
    .unwrap();
    assert_eq!(values, vec![" CHIHUAHUA", " LAB   MIX", "BICHON FRISE"]);
}

#[test]
fn count_by_breed_and_license_type() {
    let table =
        count_by_columns(&fixture("test_data.csv"), &["Breed", "LicenseType"], folded()).unwrap();

    let entries: Vec<(Vec<String>, u64)> = table
        .iter()
        .map(|(k, c)| (k.values().to_vec(), c))
        .collect();
    let key = |a: &str, b: &str| vec![a.to_string(), b.to_string()];
    assert_eq!(
        entries,
        vec![
            (key("dachshund", "dogindividualmale"), 5),
            (key("bichonfrise", "dogindividualspayedfemale"), 3),
            (key("gershepherd", "dogindividualspayedfemale"), 1),
            (key("schnoodle", "dogindividualspayedfemale"), 1),
        ]
    );
    assert_eq!(table.total(), 10);
}

#[test]
fn top_three_breeds() {
    let top = top_n_values(
        &fixture("test_data.csv"),
        "Breed",
        3,
        NormalizationPolicy::default(),
    )
    .unwrap();
    assert_eq!(
        top,
        vec![
            ("DACHSHUND".to_string(), 5),
            ("BICHONFRISE".to_string(), 3),
            ("GERSHEPHERD".to_string(), 1),
        ]
    );
}

#[test]
fn licenses_in_date_range() {
    let rows = values_in_date_range(
        &fixture("test_data.csv"),
        "ValidDate",
        "1/4/2017",
        "2/4/2017",
        &["DogName", "Breed", "LicenseType"],
    )
    .unwrap();

    let expected = Projection::new(vec![
        ("ValidDate".to_string(), "1/4/2017 8:39".to_string()),
        ("DogName".to_string(), "RILEY".to_string()),
        ("Breed".to_string(), "SCHNOODLE".to_string()),
        ("LicenseType".to_string(), "Dog Individual Spayed Female".to_string()),
    ]);
    assert_eq!(rows, vec![expected]);
}

#[test]
fn late_december_window_spans_year_end() {
    let rows = values_in_date_range(
        &fixture("test_data.csv"),
        "ValidDate",
        "12/25/2016",
        "12/31/2016",
        &["DogName"],
    )
    .unwrap();
    let names: Vec<_> = rows.iter().map(|p| p.get("DogName").unwrap()).collect();
    assert_eq!(names, vec!["BRUNO", "LUNA"]);
}

#[test]
fn malformed_timestamp_aborts_with_offending_value() {
    let err = values_in_date_range(
        &fixture("bad_dates.csv"),
        "ValidDate",
        "1/1/2017",
        "1/31/2017",
        &["DogName"],
    )
    .unwrap_err();
    assert_eq!(err.kind(), FailureKind::Format);
    assert_eq!(
        err.to_string(),
        "invalid date format in column 'ValidDate' at line 4: 2017-01-06 11:00"
    );
}

#[test]
fn short_row_cell_is_skipped_by_unique_values() {
    let values = extract_unique_values(&fixture("short_rows.csv"), "Breed", folded()).unwrap();
    assert_eq!(values, vec!["lab", "poodle"]);
}

#[test]
fn short_row_cell_groups_under_empty_value() {
    let table = count_by_columns(
        &fixture("short_rows.csv"),
        &["Breed"],
        NormalizationPolicy::default(),
    )
    .unwrap();
    assert_eq!(table.total(), 4);
    assert_eq!(table.get(&["LAB"]), Some(2));
    assert_eq!(table.get(&[""]), Some(1));
    assert_eq!(table.get(&["POODLE"]), Some(1));
}

#[test]
fn invalid_utf8_row_is_format_error() {
    let err =
        extract_unique_values(&fixture("invalid_utf8.csv"), "DogName", folded()).unwrap_err();
    assert!(matches!(err, QueryError::MalformedRow { line: 3, .. }));
    assert_eq!(err.kind(), FailureKind::Format);
}
