// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::RouteError;
use serde::Serialize;
use std::io::Read;

/// OpenFlights writes `\N` for missing values.
const NULL_MARKER: &str = "\\N";

/// A loosely typed table as it comes out of the data files: named columns,
/// rows of optional string cells. Row position is the row index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawTable {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

/// The four datasets a session starts from.
#[derive(Debug, Clone, Default)]
pub struct RawTables {
    pub airlines: RawTable,
    pub airplanes: RawTable,
    pub airports: RawTable,
    pub routes: RawTable,
}

impl Default for RawTable {
    fn default() -> Self {
        Self::new("", Vec::<String>::new())
    }
}

impl RawTable {
    pub fn new<S: Into<String>>(name: &str, headers: Vec<S>) -> Self {
        Self {
            name: name.to_string(),
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row. Cells are normalized: blanks and `\N` become `None`.
    /// Short rows are padded, long rows truncated, to the header width.
    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut row: Vec<Option<String>> = cells
            .into_iter()
            .map(|c| normalize_cell(c.as_ref()))
            .collect();
        row.resize(self.headers.len(), None);
        self.rows.push(row);
    }

    /// Reads a headed CSV stream into a table.
    pub fn from_csv_reader<R: Read>(name: &str, reader: R) -> Result<Self, RouteError> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(true)
            .from_reader(reader);

        let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();
        let mut table = Self::new(name, headers);

        for record in rdr.records() {
            let record = record?;
            table.push_row(record.iter());
        }

        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }

    pub fn require_column(&self, column: &str) -> Result<usize, RouteError> {
        self.column_index(column)
            .ok_or_else(|| RouteError::MissingColumn {
                table: self.name.clone(),
                column: column.to_string(),
            })
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .and_then(|c| c.as_deref())
    }

    /// Values of one column, in row order. Unknown column yields nothing.
    pub fn column_values<'a>(&'a self, column: &str) -> impl Iterator<Item = Option<&'a str>> + 'a {
        let idx = self.column_index(column);
        self.rows
            .iter()
            .filter_map(move |r| idx.map(|i| r.get(i).and_then(|c| c.as_deref())))
    }

    /// Returns a copy without the columns at the given positions.
    pub fn without_positions(&self, positions: &[usize]) -> Self {
        let keep: Vec<usize> = (0..self.headers.len())
            .filter(|i| !positions.contains(i))
            .collect();

        Self {
            name: self.name.clone(),
            headers: keep.iter().map(|&i| self.headers[i].clone()).collect(),
            rows: self
                .rows
                .iter()
                .map(|r| keep.iter().map(|&i| r.get(i).cloned().flatten()).collect())
                .collect(),
        }
    }

    /// Returns a copy without the named columns. Names that are not present are ignored.
    pub fn without_columns(&self, columns: &[&str]) -> Self {
        let positions: Vec<usize> = columns.iter().filter_map(|c| self.column_index(c)).collect();
        self.without_positions(&positions)
    }
}

fn normalize_cell(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == NULL_MARKER {
        None
    } else {
        Some(trimmed.to_string())
    }
}
