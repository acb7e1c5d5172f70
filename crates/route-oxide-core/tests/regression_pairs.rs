// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz
//
// Pair deduplication keeps the first row in table order, and the table order
// comes from the airports table. These tests pin that behaviour.

use route_oxide_core::classify::ClassificationBucket;
use route_oxide_core::{annotate, classify, merge, RawTable};

fn airports() -> RawTable {
    let mut t = RawTable::new("airports", vec!["IATA", "Country", "Latitude", "Longitude"]);
    // WAW listed before KRK on purpose
    t.push_row(["WAW", "Poland", "52.0", "21.0"]);
    t.push_row(["KRK", "Poland", "50.0", "19.0"]);
    t.push_row(["GDN", "Poland", "54.38", "18.47"]);
    t.push_row(["SZZ", "Poland", "53.58", "12.0"]);
    t.push_row(["BAD", "Poland", "999", "19.0"]);
    t
}

fn routes(pairs: &[(&str, &str)]) -> RawTable {
    let mut t = RawTable::new("routes", vec!["Source airport", "Destination airport", "Equipment"]);
    for &(src, dst) in pairs {
        t.push_row([src, dst, "E75"]);
    }
    t
}

#[test]
fn test_first_row_of_pair_wins_in_airport_order() {
    let table = annotate(merge(&airports(), &routes(&[("KRK", "WAW"), ("WAW", "KRK")])).unwrap());
    let classification = classify(&table, "Poland", true, 500.0);
    let summary = classification.summary().unwrap();

    assert_eq!(summary.classified_routes.len(), 1);
    assert_eq!(summary.classified_routes[0].source_airport, "WAW");
    assert_eq!(summary.classified_routes[0].destination_airport, "KRK");
}

#[test]
fn test_cutoff_splits_buckets() {
    let table = annotate(
        merge(
            &airports(),
            &routes(&[("KRK", "WAW"), ("KRK", "SZZ"), ("SZZ", "KRK"), ("GDN", "KRK")]),
        )
        .unwrap(),
    );

    // KRK-WAW ~260 km, KRK-GDN ~490 km, KRK-SZZ ~620 km
    let summary = classify(&table, "Poland", true, 500.0);
    let summary = summary.summary().unwrap();
    assert_eq!(summary.classified_routes.len(), 3);
    assert_eq!(summary.short_haul_count, 2);
    assert_eq!(summary.long_haul_count, 1);

    let long: Vec<_> = summary
        .classified_routes
        .iter()
        .filter(|r| r.bucket == ClassificationBucket::LongHaul)
        .collect();
    assert_eq!(long.len(), 1);
    assert!(long[0].source_airport == "SZZ" || long[0].destination_airport == "SZZ");
}

#[test]
fn test_invalid_coordinates_count_as_zero_distance() {
    let table = annotate(merge(&airports(), &routes(&[("BAD", "KRK")])).unwrap());
    assert_eq!(table.rows()[0].distance_km, Some(0.0));

    let summary = classify(&table, "Poland", true, 500.0);
    let summary = summary.summary().unwrap();
    assert_eq!(summary.short_haul_count, 1);
    assert_eq!(summary.short_haul_total_distance_km, 0.0);
    assert_eq!(summary.emissions.co2_reduction_kg, 0.0);
}

#[test]
fn test_classify_leaves_table_untouched() {
    let table = annotate(merge(&airports(), &routes(&[("KRK", "WAW"), ("WAW", "GDN")])).unwrap());
    let before = table.clone();

    let _ = classify(&table, "Poland", false, 100.0);
    let _ = classify(&table, "Poland", true, 1000.0);
    assert_eq!(table, before);
}
