// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::table::{RawTable, RawTables};
use crate::RouteError;
use log::info;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Locations of the four dataset files inside a data directory.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetPaths {
    pub airlines: PathBuf,
    pub airplanes: PathBuf,
    pub airports: PathBuf,
    pub routes: PathBuf,
}

impl DatasetPaths {
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            airlines: dir.join("airlines.csv"),
            airplanes: dir.join("airplanes.csv"),
            airports: dir.join("airports.csv"),
            routes: dir.join("routes.csv"),
        }
    }
}

fn load_table(name: &str, path: &Path) -> Result<RawTable, RouteError> {
    let file = File::open(path)?;
    let table = RawTable::from_csv_reader(name, BufReader::new(file))?;
    info!("Loaded table — name={} rows={} path={}", name, table.len(), path.display());
    Ok(table)
}

pub fn load_tables(paths: &DatasetPaths) -> Result<RawTables, RouteError> {
    Ok(RawTables {
        airlines: load_table("airlines", &paths.airlines)?,
        airplanes: load_table("airplanes", &paths.airplanes)?,
        airports: load_table("airports", &paths.airports)?,
        routes: load_table("routes", &paths.routes)?,
    })
}

pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<RawTables, RouteError> {
    load_tables(&DatasetPaths::in_dir(dir))
}
