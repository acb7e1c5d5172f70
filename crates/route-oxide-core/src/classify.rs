// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Short-haul / long-haul classification of a country's routes and the
//! flight-versus-train emissions estimate derived from it.

use crate::annotate::route_distance;
use crate::merge::{MergedRoute, RouteTable};
use log::debug;
use serde::Serialize;
use std::collections::HashSet;

pub const DEFAULT_CUTOFF_KM: f64 = 500.0;

/// Average CO2 of a domestic flight, grams per kilometer.
pub const FLIGHT_CO2_G_PER_KM: f64 = 246.0;

/// A train over the same distance emits a third of the flight's CO2.
pub const TRAIN_EMISSIONS_DIVISOR: f64 = 3.0;

/// Unordered airport pair. `A->B` and `B->A` share one key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RoutePairKey(String, String);

impl RoutePairKey {
    pub fn new(a: &str, b: &str) -> Self {
        if a <= b {
            Self(a.to_string(), b.to_string())
        } else {
            Self(b.to_string(), a.to_string())
        }
    }

    pub fn of(route: &MergedRoute) -> Self {
        Self::new(&route.source_airport, &route.destination_airport)
    }

    pub fn codes(&self) -> (&str, &str) {
        (&self.0, &self.1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationBucket {
    ShortHaul,
    LongHaul,
}

impl ClassificationBucket {
    /// Distances equal to the cutoff are still short-haul.
    pub fn for_distance(distance_km: f64, cutoff_km: f64) -> Self {
        if distance_km <= cutoff_km {
            Self::ShortHaul
        } else {
            Self::LongHaul
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EmissionsEstimate {
    pub flight_emissions_g: f64,
    pub train_emissions_g: f64,
    pub co2_reduction_kg: f64,
}

impl EmissionsEstimate {
    pub fn for_short_haul_distance(total_km: f64) -> Self {
        let flight = total_km * FLIGHT_CO2_G_PER_KM;
        let train = flight / TRAIN_EMISSIONS_DIVISOR;
        Self {
            flight_emissions_g: flight,
            train_emissions_g: train,
            co2_reduction_kg: (flight - train) / 1000.0,
        }
    }
}

/// A deduplicated route with its bucket, carrying what a map renderer needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedRoute {
    pub source_airport: String,
    pub destination_airport: String,
    pub latitude_source: f64,
    pub longitude_source: f64,
    pub latitude_destination: f64,
    pub longitude_destination: f64,
    pub distance_km: f64,
    pub bucket: ClassificationBucket,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationSummary {
    pub country: String,
    pub internal_only: bool,
    pub cutoff_km: f64,
    pub short_haul_count: usize,
    pub long_haul_count: usize,
    pub short_haul_total_distance_km: f64,
    pub emissions: EmissionsEstimate,
    pub classified_routes: Vec<ClassifiedRoute>,
}

impl ClassificationSummary {
    pub fn estimated_co2_reduction_kg(&self) -> f64 {
        self.emissions.co2_reduction_kg
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Classification {
    NoRoutes { country: String },
    Classified(ClassificationSummary),
}

impl Classification {
    pub fn summary(&self) -> Option<&ClassificationSummary> {
        match self {
            Classification::Classified(s) => Some(s),
            Classification::NoRoutes { .. } => None,
        }
    }
}

/// Classifies the routes leaving `country` (and staying in it when
/// `internal_only`). Only the first row of each unordered airport pair, in
/// table order, is counted. The table is not modified; rows without a cached
/// distance are measured on the fly.
pub fn classify(
    table: &RouteTable,
    country: &str,
    internal_only: bool,
    cutoff_km: f64,
) -> Classification {
    let selected: Vec<&MergedRoute> = table
        .iter()
        .filter(|r| r.source_country == country)
        .filter(|r| !internal_only || r.destination_country == country)
        .collect();

    if selected.is_empty() {
        debug!("No routes to classify — country={} internal_only={}", country, internal_only);
        return Classification::NoRoutes {
            country: country.to_string(),
        };
    }

    let mut seen: HashSet<RoutePairKey> = HashSet::new();
    let mut classified = Vec::new();
    let mut short_haul_count = 0usize;
    let mut long_haul_count = 0usize;
    let mut short_haul_total = 0.0f64;

    for route in selected {
        if !seen.insert(RoutePairKey::of(route)) {
            continue;
        }

        let distance_km = route.distance_km.unwrap_or_else(|| route_distance(route));
        let bucket = ClassificationBucket::for_distance(distance_km, cutoff_km);
        match bucket {
            ClassificationBucket::ShortHaul => {
                short_haul_count += 1;
                short_haul_total += distance_km;
            }
            ClassificationBucket::LongHaul => long_haul_count += 1,
        }

        classified.push(ClassifiedRoute {
            source_airport: route.source_airport.clone(),
            destination_airport: route.destination_airport.clone(),
            latitude_source: route.latitude_source,
            longitude_source: route.longitude_source,
            latitude_destination: route.latitude_destination,
            longitude_destination: route.longitude_destination,
            distance_km,
            bucket,
        });
    }

    debug!(
        "Classified routes — country={} unique_pairs={} short_haul={} long_haul={}",
        country,
        classified.len(),
        short_haul_count,
        long_haul_count
    );

    Classification::Classified(ClassificationSummary {
        country: country.to_string(),
        internal_only,
        cutoff_km,
        short_haul_count,
        long_haul_count,
        short_haul_total_distance_km: short_haul_total,
        emissions: EmissionsEstimate::for_short_haul_distance(short_haul_total),
        classified_routes: classified,
    })
}
