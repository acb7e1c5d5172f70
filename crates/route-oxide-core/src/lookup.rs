// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Name lookups for aircraft and airports, with close-match suggestions when
//! the name is not known. Descriptive text comes from a [`Describer`].

use crate::merge::RouteTable;
use crate::table::RawTable;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::collections::HashSet;
use strsim::normalized_levenshtein;

const MAX_SUGGESTIONS: usize = 5;

/// External text-generation service. The query is free text.
pub trait Describer {
    fn describe(&self, query: &str) -> anyhow::Result<String>;
}

/// Describer that hands the query back unchanged, for runs without a text service.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineDescriber;

impl Describer for OfflineDescriber {
    fn describe(&self, query: &str) -> anyhow::Result<String> {
        Ok(query.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LookupOutcome {
    /// Exact name match, with the query to send to a [`Describer`].
    Found { name: String, query: String },
    /// Close matches for a name that is not known.
    Suggestions { name: String, matches: Vec<String> },
    /// Nothing close; a random sample of known names.
    Recommendations { name: String, names: Vec<String> },
}

fn unique(names: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    names.into_iter().filter(|n| seen.insert(n.clone())).collect()
}

/// Names scoring below this normalized similarity are not suggested.
pub const SIMILARITY_CUTOFF: f64 = 0.3;

/// Up to five known names, most similar first.
///
/// A candidate qualifies when its case-insensitive normalized Levenshtein
/// similarity to `name` reaches [`SIMILARITY_CUTOFF`], which catches typos
/// such as "Beoing 737-800". Candidates containing the query as an in-order
/// fuzzy match ("737" in "Boeing 737-800") also qualify, ranked after the
/// closer spellings.
pub fn close_matches(name: &str, candidates: &[String]) -> Vec<String> {
    let matcher = SkimMatcherV2::default();
    let query = name.to_lowercase();
    let mut scored: Vec<(f64, i64, &String)> = candidates
        .iter()
        .filter_map(|c| {
            let similarity = normalized_levenshtein(&query, &c.to_lowercase());
            let fuzzy = matcher.fuzzy_match(c, name);
            (similarity >= SIMILARITY_CUTOFF || fuzzy.is_some())
                .then(|| (similarity, fuzzy.unwrap_or(0), c))
        })
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0).then(b.1.cmp(&a.1)));
    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, _, c)| c.clone())
        .collect()
}

fn resolve<R, F>(name: &str, candidates: &[String], rng: &mut R, query: F) -> LookupOutcome
where
    R: Rng + ?Sized,
    F: FnOnce() -> String,
{
    if candidates.iter().any(|c| c == name) {
        return LookupOutcome::Found {
            name: name.to_string(),
            query: query(),
        };
    }

    let matches = close_matches(name, candidates);
    if !matches.is_empty() {
        return LookupOutcome::Suggestions {
            name: name.to_string(),
            matches,
        };
    }

    LookupOutcome::Recommendations {
        name: name.to_string(),
        names: candidates
            .choose_multiple(rng, MAX_SUGGESTIONS)
            .cloned()
            .collect(),
    }
}

/// Aircraft model names from the airplanes table, in table order.
pub fn aircraft_names(airplanes: &RawTable) -> Vec<String> {
    unique(
        airplanes
            .column_values("Name")
            .flatten()
            .map(str::to_string),
    )
}

pub fn aircraft_info<R: Rng + ?Sized>(
    airplanes: &RawTable,
    name: &str,
    rng: &mut R,
) -> LookupOutcome {
    let names = aircraft_names(airplanes);
    resolve(name, &names, rng, || {
        let row = airplanes
            .column_values("Name")
            .position(|n| n == Some(name));
        let code = |column: &str| {
            row.zip(airplanes.column_index(column))
                .and_then(|(r, c)| airplanes.cell(r, c))
                .unwrap_or("unknown")
                .to_string()
        };
        format!(
            "Aircraft Information for {name}:\nName: {name}\nIATA code: {}\nICAO code: {}",
            code("IATA code"),
            code("ICAO code")
        )
    })
}

/// Source airport names present in the merged table.
pub fn airport_names(table: &RouteTable) -> Vec<String> {
    unique(table.iter().filter_map(|r| r.name.clone()))
}

pub fn airport_info<R: Rng + ?Sized>(
    table: &RouteTable,
    name: &str,
    rng: &mut R,
) -> LookupOutcome {
    let names = airport_names(table);
    resolve(name, &names, rng, || {
        format!(
            "Provide details for the airport named {name}. Include information such as \
             Airport ID, Source airport, City, Latitude, and Longitude."
        )
    })
}
