// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::merge::RouteTable;
use crate::Lookup;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

pub const DEFAULT_HISTOGRAM_BINS: usize = 30;
pub const DEFAULT_TOP_EQUIPMENT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirportPoint {
    pub code: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightLeg {
    pub source_airport: String,
    pub destination_airport: String,
    pub destination_country: String,
    pub latitude_source: f64,
    pub longitude_source: f64,
    pub latitude_destination: f64,
    pub longitude_destination: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EquipmentCount {
    pub equipment: String,
    pub routes: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower_km: f64,
    pub upper_km: f64,
    pub count: usize,
}

/// Airports with at least one departing route from `country`, one point per code.
pub fn airports_in_country(table: &RouteTable, country: &str) -> Lookup<Vec<AirportPoint>> {
    let mut seen = HashSet::new();
    let points: Vec<AirportPoint> = table
        .iter()
        .filter(|r| r.source_country == country)
        .filter(|r| seen.insert(r.source_airport.as_str()))
        .map(|r| AirportPoint {
            code: r.source_airport.clone(),
            latitude: r.latitude_source,
            longitude: r.longitude_source,
        })
        .collect();

    if points.is_empty() {
        Lookup::NotFound(format!("No airports found in {}.", country))
    } else {
        Lookup::Found(points)
    }
}

/// Legs departing `code`. With `internal_only`, legs must stay within the
/// airport's own country.
pub fn flights_from_airport(
    table: &RouteTable,
    code: &str,
    internal_only: bool,
) -> Lookup<Vec<FlightLeg>> {
    let Some(home_country) = table
        .iter()
        .find(|r| r.source_airport == code)
        .map(|r| r.source_country.as_str())
    else {
        return Lookup::NotFound(format!("Airport {} has no departing routes.", code));
    };

    let legs: Vec<FlightLeg> = table
        .iter()
        .filter(|r| r.source_airport == code)
        .filter(|r| {
            !internal_only
                || (r.source_country == home_country && r.destination_country == home_country)
        })
        .map(|r| FlightLeg {
            source_airport: r.source_airport.clone(),
            destination_airport: r.destination_airport.clone(),
            destination_country: r.destination_country.clone(),
            latitude_source: r.latitude_source,
            longitude_source: r.longitude_source,
            latitude_destination: r.latitude_destination,
            longitude_destination: r.longitude_destination,
        })
        .collect();

    if legs.is_empty() {
        Lookup::NotFound(format!(
            "No flights found for the specified criteria from {}.",
            code
        ))
    } else {
        Lookup::Found(legs)
    }
}

/// Most common equipment values by route count. An empty `countries` slice
/// means every source country. Ties keep first-seen order.
pub fn top_equipment(table: &RouteTable, n: usize, countries: &[String]) -> Vec<EquipmentCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for route in table.iter() {
        if !countries.is_empty() && !countries.iter().any(|c| *c == route.source_country) {
            continue;
        }
        let Some(equipment) = route.equipment.as_deref() else {
            continue;
        };
        let count = counts.entry(equipment).or_insert_with(|| {
            order.push(equipment);
            0
        });
        *count += 1;
    }

    let mut ranked: Vec<EquipmentCount> = order
        .into_iter()
        .map(|e| EquipmentCount {
            equipment: e.to_string(),
            routes: counts[e],
        })
        .collect();
    // stable sort keeps first-seen order among equal counts
    ranked.sort_by(|a, b| b.routes.cmp(&a.routes));
    ranked.truncate(n);
    ranked
}

/// Equal-width histogram of route distances between the smallest and largest value.
pub fn distance_histogram(table: &RouteTable, bins: usize) -> Vec<HistogramBin> {
    if bins == 0 || !table.has_distance() {
        return Vec::new();
    }

    let distances: Vec<f64> = table.iter().filter_map(|r| r.distance_km).collect();
    if distances.is_empty() {
        return Vec::new();
    }

    let min = distances.iter().copied().fold(f64::INFINITY, f64::min);
    let max = distances.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let width = if max > min { (max - min) / bins as f64 } else { 1.0 };

    let mut histogram: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower_km: min + width * i as f64,
            upper_km: min + width * (i + 1) as f64,
            count: 0,
        })
        .collect();

    for d in distances {
        let idx = (((d - min) / width) as usize).min(bins - 1);
        histogram[idx].count += 1;
    }

    histogram
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::annotate;
    use crate::merge::MergedRoute;

    fn row(src: &str, src_country: &str, dst: &str, dst_country: &str, eq: &str) -> MergedRoute {
        MergedRoute {
            name: None,
            city: None,
            iata: src.to_string(),
            icao: None,
            source_country: src_country.to_string(),
            latitude_source: 50.0,
            longitude_source: 19.0,
            source_airport: src.to_string(),
            destination_airport: dst.to_string(),
            equipment: Some(eq.to_string()),
            destination_country: dst_country.to_string(),
            latitude_destination: 52.0,
            longitude_destination: 21.0,
            distance_km: None,
        }
    }

    fn table() -> RouteTable {
        RouteTable::new(vec![
            row("KRK", "Poland", "WAW", "Poland", "E75"),
            row("KRK", "Poland", "TXL", "Germany", "320"),
            row("WAW", "Poland", "KRK", "Poland", "E75"),
            row("TXL", "Germany", "KRK", "Poland", "320 319"),
            row("TXL", "Germany", "MUC", "Germany", "320"),
        ])
    }

    #[test]
    fn test_airports_in_country_distinct() {
        let points = airports_in_country(&table(), "Poland").found().unwrap();
        let codes: Vec<&str> = points.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(codes, vec!["KRK", "WAW"]);
    }

    #[test]
    fn test_airports_in_unknown_country() {
        assert!(!airports_in_country(&table(), "Atlantis").is_found());
    }

    #[test]
    fn test_flights_from_airport_internal() {
        let all = flights_from_airport(&table(), "KRK", false).found().unwrap();
        assert_eq!(all.len(), 2);

        let internal = flights_from_airport(&table(), "KRK", true).found().unwrap();
        assert_eq!(internal.len(), 1);
        assert_eq!(internal[0].destination_airport, "WAW");
    }

    #[test]
    fn test_flights_from_unknown_airport() {
        assert!(matches!(
            flights_from_airport(&table(), "ZZZ", false),
            Lookup::NotFound(_)
        ));
    }

    #[test]
    fn test_top_equipment() {
        let top = top_equipment(&table(), 2, &[]);
        assert_eq!(
            top,
            vec![
                EquipmentCount {
                    equipment: "E75".to_string(),
                    routes: 2
                },
                EquipmentCount {
                    equipment: "320".to_string(),
                    routes: 2
                },
            ]
        );

        let german = top_equipment(&table(), 5, &["Germany".to_string()]);
        assert_eq!(german.len(), 2);
        assert_eq!(german[0].equipment, "320 319");
    }

    #[test]
    fn test_histogram_counts_every_route() {
        let annotated = annotate(table());
        let hist = distance_histogram(&annotated, DEFAULT_HISTOGRAM_BINS);
        assert_eq!(hist.len(), DEFAULT_HISTOGRAM_BINS);
        assert_eq!(hist.iter().map(|b| b.count).sum::<usize>(), 5);
    }

    #[test]
    fn test_histogram_needs_distances() {
        assert!(distance_histogram(&table(), 10).is_empty());
    }
}
