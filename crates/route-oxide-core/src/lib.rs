// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

pub mod annotate;
pub mod classify;
pub mod cleaning;
pub mod config;
pub mod explore;
pub mod geodesy;
pub mod loader;
pub mod lookup;
pub mod merge;
pub mod table;

pub use annotate::annotate;
pub use classify::{classify, Classification, ClassificationBucket, RoutePairKey};
pub use cleaning::{clean, CleanedTables};
pub use merge::{merge, MergedRoute, RouteTable};
pub use table::{RawTable, RawTables};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RouteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Table '{table}' is missing required column '{column}'")]
    MissingColumn { table: String, column: String },
    #[error("Config error: {0}")]
    Config(String),
}

/// Result of a lookup that may legitimately match nothing.
/// Callers render `NotFound` as a message rather than treating it as a failure.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Lookup<T> {
    Found(T),
    NotFound(String),
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(v) => Some(v),
            Lookup::NotFound(_) => None,
        }
    }
}

/// Cleaned source tables together with the annotated route table built from them.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub tables: CleanedTables,
    pub routes: RouteTable,
}

/// Runs the whole pipeline over freshly loaded tables: clean, merge, annotate.
/// The cleaned tables are kept for lookups that read them directly.
pub fn build_dataset(raw: &RawTables) -> Result<Dataset, RouteError> {
    let tables = clean(raw);
    let merged = merge(&tables.airports, &tables.routes)?;
    Ok(Dataset {
        tables,
        routes: annotate(merged),
    })
}

pub fn build_route_table(raw: &RawTables) -> Result<RouteTable, RouteError> {
    build_dataset(raw).map(|d| d.routes)
}
