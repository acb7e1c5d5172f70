// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use geo::{Distance, Geodesic, Point};
use log::warn;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeoError {
    #[error("coordinate is not a finite number: ({lat}, {lon})")]
    NonFinite { lat: f64, lon: f64 },
    #[error("latitude out of range [-90, 90]: {0}")]
    LatitudeOutOfRange(f64),
    #[error("longitude out of range [-180, 180]: {0}")]
    LongitudeOutOfRange(f64),
    #[error("geodesic solver returned a non-finite distance")]
    Solver,
}

fn validate(lat: f64, lon: f64) -> Result<(), GeoError> {
    if !lat.is_finite() || !lon.is_finite() {
        return Err(GeoError::NonFinite { lat, lon });
    }
    if !(-90.0..=90.0).contains(&lat) {
        return Err(GeoError::LatitudeOutOfRange(lat));
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(GeoError::LongitudeOutOfRange(lon));
    }
    Ok(())
}

/// Ellipsoidal (WGS84) distance in kilometers between two points.
pub fn try_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> Result<f64, GeoError> {
    validate(lat1, lon1)?;
    validate(lat2, lon2)?;

    if lat1 == lat2 && lon1 == lon2 {
        return Ok(0.0);
    }

    // geo points are (x = lon, y = lat)
    let meters = Geodesic.distance(Point::new(lon1, lat1), Point::new(lon2, lat2));
    if !meters.is_finite() {
        return Err(GeoError::Solver);
    }
    Ok((meters / 1000.0).max(0.0))
}

/// Same as [`try_distance`], but invalid input is logged and measured as 0 km.
/// Downstream code treats 0 as "no measurable distance".
pub fn distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    match try_distance(lat1, lon1, lat2, lon2) {
        Ok(km) => km,
        Err(e) => {
            warn!(
                "Distance fallback to 0 km — from=({}, {}) to=({}, {}) error={}",
                lat1, lon1, lat2, lon2, e
            );
            0.0
        }
    }
}
