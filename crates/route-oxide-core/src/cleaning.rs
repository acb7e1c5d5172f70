// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::table::{RawTable, RawTables};
use log::debug;

/// Airport metadata columns nothing downstream reads.
const UNUSED_AIRPORT_COLUMNS: [&str; 2] = ["Type", "Source"];

/// Tables after index/metadata columns have been stripped.
#[derive(Debug, Clone)]
pub struct CleanedTables {
    pub airlines: RawTable,
    pub airplanes: RawTable,
    pub airports: RawTable,
    pub routes: RawTable,
}

/// Drops the leading upstream row-index column of a table.
/// Rows keep their order; position in the returned table is the new index.
pub fn drop_index_column(table: &RawTable) -> RawTable {
    if table.headers.is_empty() {
        return table.clone();
    }
    table.without_positions(&[0])
}

/// Cleans all four tables. Inputs are borrowed; the caller's copies are untouched.
pub fn clean(raw: &RawTables) -> CleanedTables {
    let airports = drop_index_column(&raw.airports).without_columns(&UNUSED_AIRPORT_COLUMNS);

    let cleaned = CleanedTables {
        airlines: drop_index_column(&raw.airlines),
        airplanes: drop_index_column(&raw.airplanes),
        airports,
        routes: drop_index_column(&raw.routes),
    };

    debug!(
        "Cleaned tables — airlines={} airplanes={} airports={} routes={}",
        cleaned.airlines.len(),
        cleaned.airplanes.len(),
        cleaned.airports.len(),
        cleaned.routes.len()
    );

    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_airports() -> RawTable {
        let mut t = RawTable::new(
            "airports",
            vec!["index", "Name", "IATA", "Country", "Type", "Source"],
        );
        t.push_row(["0", "Balice", "KRK", "Poland", "airport", "OurAirports"]);
        t.push_row(["1", "Chopin", "WAW", "Poland", "airport", "OurAirports"]);
        t
    }

    #[test]
    fn test_drops_index_and_metadata() {
        let raw = RawTables {
            airports: raw_airports(),
            ..Default::default()
        };

        let cleaned = clean(&raw);
        assert_eq!(cleaned.airports.headers, vec!["Name", "IATA", "Country"]);
        assert_eq!(cleaned.airports.cell(1, 1), Some("WAW"));
    }

    #[test]
    fn test_inputs_untouched() {
        let raw = RawTables {
            airports: raw_airports(),
            ..Default::default()
        };
        let before = raw.airports.clone();

        let _ = clean(&raw);
        assert_eq!(raw.airports, before);
    }

    #[test]
    fn test_only_first_column_dropped_from_routes() {
        let mut routes = RawTable::new(
            "routes",
            vec!["index", "Airline", "Source airport", "Destination airport"],
        );
        routes.push_row(["7", "LO", "KRK", "WAW"]);
        let raw = RawTables {
            routes,
            ..Default::default()
        };

        let cleaned = clean(&raw);
        assert_eq!(
            cleaned.routes.headers,
            vec!["Airline", "Source airport", "Destination airport"]
        );
        assert_eq!(cleaned.routes.cell(0, 0), Some("LO"));
    }

    #[test]
    fn test_empty_table_stays_empty() {
        let cleaned = clean(&RawTables::default());
        assert!(cleaned.airlines.headers.is_empty());
        assert!(cleaned.airlines.is_empty());
    }
}
