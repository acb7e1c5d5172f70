// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::geodesy;
use crate::merge::{MergedRoute, RouteTable};
use log::debug;
use rayon::prelude::*;

/// Geodesic distance of one merged row, in kilometers.
pub fn route_distance(route: &MergedRoute) -> f64 {
    geodesy::distance(
        route.latitude_source,
        route.longitude_source,
        route.latitude_destination,
        route.longitude_destination,
    )
}

/// Adds the distance column. A table that already has one is returned as is.
pub fn annotate(mut table: RouteTable) -> RouteTable {
    if table.has_distance() {
        debug!("Distance column already present — rows={}", table.len());
        return table;
    }

    table.rows_mut().par_iter_mut().for_each(|route| {
        route.distance_km = Some(route_distance(route));
    });
    table.mark_distance_column();

    debug!("Annotated route distances — rows={}", table.len());
    table
}
