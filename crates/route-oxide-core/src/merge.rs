// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::table::RawTable;
use crate::RouteError;
use log::{debug, warn};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// One route joined with both of its endpoint airports.
/// Field names serialize as the upstream column names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedRoute {
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "City")]
    pub city: Option<String>,
    #[serde(rename = "IATA")]
    pub iata: String,
    #[serde(rename = "ICAO")]
    pub icao: Option<String>,
    #[serde(rename = "Source country")]
    pub source_country: String,
    pub latitude_source: f64,
    pub longitude_source: f64,
    #[serde(rename = "Source airport")]
    pub source_airport: String,
    #[serde(rename = "Destination airport")]
    pub destination_airport: String,
    #[serde(rename = "Equipment")]
    pub equipment: Option<String>,
    #[serde(rename = "Destination country")]
    pub destination_country: String,
    pub latitude_destination: f64,
    pub longitude_destination: f64,
    #[serde(rename = "distance", skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

/// The canonical route table. Rows keep merge order; the only later change is
/// the distance column added by [`crate::annotate`].
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RouteTable {
    rows: Vec<MergedRoute>,
    #[serde(skip)]
    distance_column: bool,
}

impl RouteTable {
    /// Wraps rows. The distance column counts as present only when every row carries one.
    pub fn new(rows: Vec<MergedRoute>) -> Self {
        let distance_column = !rows.is_empty() && rows.iter().all(|r| r.distance_km.is_some());
        Self {
            rows,
            distance_column,
        }
    }

    pub fn rows(&self) -> &[MergedRoute] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MergedRoute> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_distance(&self) -> bool {
        self.distance_column
    }

    pub fn into_rows(self) -> Vec<MergedRoute> {
        self.rows
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [MergedRoute] {
        &mut self.rows
    }

    pub(crate) fn mark_distance_column(&mut self) {
        self.distance_column = true;
    }
}

struct AirportColumns {
    iata: usize,
    country: usize,
    latitude: usize,
    longitude: usize,
    name: Option<usize>,
    city: Option<usize>,
    icao: Option<usize>,
}

impl AirportColumns {
    fn resolve(airports: &RawTable) -> Result<Self, RouteError> {
        Ok(Self {
            iata: airports.require_column("IATA")?,
            country: airports.require_column("Country")?,
            latitude: airports.require_column("Latitude")?,
            longitude: airports.require_column("Longitude")?,
            name: airports.column_index("Name"),
            city: airports.column_index("City"),
            icao: airports.column_index("ICAO"),
        })
    }
}

fn coordinate(table: &RawTable, row: usize, col: usize) -> f64 {
    // Unparseable coordinates stay in the row as NaN; the distance step measures them as 0.
    table
        .cell(row, col)
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

fn optional(table: &RawTable, row: usize, col: Option<usize>) -> Option<String> {
    col.and_then(|c| table.cell(row, c)).map(str::to_string)
}

/// Builds an IATA -> row index map. The first airport carrying a code wins.
fn index_airports<'a>(airports: &'a RawTable, iata_col: usize) -> HashMap<&'a str, usize> {
    let mut index = HashMap::with_capacity(airports.len());
    let mut warned = HashSet::new();

    for row in 0..airports.len() {
        let Some(code) = airports.cell(row, iata_col) else {
            continue;
        };
        if index.contains_key(code) {
            if warned.insert(code) {
                warn!("Duplicate IATA code in airports table, keeping first — code={}", code);
            }
            continue;
        }
        index.insert(code, row);
    }

    index
}

/// Joins routes to their source and destination airports.
///
/// Output order follows the airports table, and within one airport the routes
/// table. Routes whose source or destination airport (or its country) cannot be
/// resolved are dropped without error.
pub fn merge(airports: &RawTable, routes: &RawTable) -> Result<RouteTable, RouteError> {
    let cols = AirportColumns::resolve(airports)?;
    let src_col = routes.require_column("Source airport")?;
    let dst_col = routes.require_column("Destination airport")?;
    let equipment_col = routes.column_index("Equipment");

    let airport_index = index_airports(airports, cols.iata);

    let mut routes_by_source: HashMap<&str, Vec<usize>> = HashMap::new();
    for row in 0..routes.len() {
        if let Some(code) = routes.cell(row, src_col) {
            routes_by_source.entry(code).or_default().push(row);
        }
    }

    let mut merged = Vec::with_capacity(routes.len());

    for a_row in 0..airports.len() {
        let Some(iata) = airports.cell(a_row, cols.iata) else {
            continue;
        };
        if airport_index.get(iata) != Some(&a_row) {
            continue;
        }
        let Some(source_country) = airports.cell(a_row, cols.country) else {
            continue;
        };
        let Some(route_rows) = routes_by_source.get(iata) else {
            continue;
        };

        for &r_row in route_rows {
            let Some(dest_code) = routes.cell(r_row, dst_col) else {
                continue;
            };
            let Some(&d_row) = airport_index.get(dest_code) else {
                continue;
            };
            let Some(dest_country) = airports.cell(d_row, cols.country) else {
                continue;
            };

            merged.push(MergedRoute {
                name: optional(airports, a_row, cols.name),
                city: optional(airports, a_row, cols.city),
                iata: iata.to_string(),
                icao: optional(airports, a_row, cols.icao),
                source_country: source_country.to_string(),
                latitude_source: coordinate(airports, a_row, cols.latitude),
                longitude_source: coordinate(airports, a_row, cols.longitude),
                source_airport: iata.to_string(),
                destination_airport: dest_code.to_string(),
                equipment: optional(routes, r_row, equipment_col),
                destination_country: dest_country.to_string(),
                latitude_destination: coordinate(airports, d_row, cols.latitude),
                longitude_destination: coordinate(airports, d_row, cols.longitude),
                distance_km: None,
            });
        }
    }

    debug!(
        "Merged routes — input_routes={} merged={} unresolved_dropped={}",
        routes.len(),
        merged.len(),
        routes.len() - merged.len()
    );

    Ok(RouteTable::new(merged))
}
