use tabular_aggregation::aggregation::{
    count_by_columns, extract_unique_values, top_n_values, values_in_date_range,
    NormalizationPolicy,
};
use tabular_aggregation::source::MemorySource;
use tabular_aggregation::types::Header;

const BREEDS: &[&str] = &[
    "LAB", " lab", "POODLE", "", "Bichon Frise", "BICHON FRISE", "beagle", "Lab ", "poodle",
];
const LICENSES: &[&str] = &["Dog Individual Male", "", "Dog Individual Spayed Female"];

/// Timestamp of row `i`; every 11th row has none. Unique for `i < 840`.
fn timestamp(i: usize) -> Option<String> {
    (i % 11 != 0).then(|| format!("{}/{}/2017 {}:{:02}", 1 + i % 3, 1 + i % 28, i % 24, i % 60))
}

/// Deterministic mixed dataset with empty cells and near-duplicate values.
fn licenses(rows: usize) -> MemorySource {
    let mut src = MemorySource::new(
        "licenses.csv",
        Header::new(["ValidDate", "Breed", "LicenseType"]),
    );
    for i in 0..rows {
        let breed = BREEDS[(i * 7 + i / 3) % BREEDS.len()];
        let license = LICENSES[(i * 5) % LICENSES.len()];
        let date = timestamp(i).unwrap_or_default();
        src.push_row([date.as_str(), breed, license]);
    }
    src
}

fn policies() -> [NormalizationPolicy; 4] {
    [
        NormalizationPolicy::new(true, false),
        NormalizationPolicy::new(true, true),
        NormalizationPolicy::new(false, true),
        NormalizationPolicy::RAW,
    ]
}

#[test]
fn unique_values_are_strictly_ascending() {
    let src = licenses(200);
    for policy in policies() {
        let values = extract_unique_values(&src, "Breed", policy).unwrap();
        assert!(values.windows(2).all(|w| w[0] < w[1]), "{policy:?}: {values:?}");
    }
}

#[test]
fn group_counts_sum_to_row_count() {
    let src = licenses(200);
    for policy in policies() {
        let column_sets: [&[&str]; 3] = [
            &["Breed"],
            &["LicenseType", "Breed"],
            &["Breed", "ValidDate"],
        ];
        for columns in column_sets {
            let table = count_by_columns(&src, columns, policy).unwrap();
            assert_eq!(table.total(), 200, "{policy:?} {columns:?}");
            assert!(
                table.entries().windows(2).all(|w| w[0].count >= w[1].count),
                "not ranked: {policy:?} {columns:?}"
            );
        }
    }
}

#[test]
fn top_n_is_prefix_of_full_ranking() {
    let src = licenses(200);
    for policy in policies() {
        let full: Vec<(String, u64)> = count_by_columns(&src, &["Breed"], policy)
            .unwrap()
            .iter()
            .map(|(k, c)| (k.values()[0].clone(), c))
            .collect();
        for n in [0, 1, 3, full.len(), full.len() + 10] {
            let top = top_n_values(&src, "Breed", n, policy).unwrap();
            assert!(top.len() <= n);
            assert_eq!(top.as_slice(), &full[..n.min(full.len())]);
        }
    }
}

#[test]
fn date_projection_is_ordered_and_inside_window() {
    let src = licenses(200);
    let rows =
        values_in_date_range(&src, "ValidDate", "1/10/2017", "2/20/2017", &["Breed"]).unwrap();
    assert!(!rows.is_empty());

    let start = chrono::NaiveDate::from_ymd_opt(2017, 1, 10).unwrap();
    let end = chrono::NaiveDate::from_ymd_opt(2017, 2, 20).unwrap();
    let mut last_seen: Option<usize> = None;
    for p in &rows {
        let raw = p.get("ValidDate").unwrap();
        let ts = chrono::NaiveDateTime::parse_from_str(raw, "%m/%d/%Y %H:%M").unwrap();
        assert!(start <= ts.date() && ts.date() <= end, "{raw}");
        let pos = (0..200)
            .position(|i| timestamp(i).as_deref() == Some(raw))
            .unwrap();
        assert!(last_seen.is_none_or(|prev| prev < pos));
        last_seen = Some(pos);
    }
}
