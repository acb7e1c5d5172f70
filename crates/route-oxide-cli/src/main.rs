// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use route_oxide_core::config::AnalysisConfig;
use route_oxide_core::explore::{
    airports_in_country, distance_histogram, flights_from_airport, top_equipment,
};
use route_oxide_core::lookup::{self, Describer, LookupOutcome, OfflineDescriber};
use route_oxide_core::{build_dataset, classify, loader, Classification, Lookup};
use serde::Serialize;
use simplelog::{ColorChoice, TermLogger, TerminalMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding airlines.csv, airplanes.csv, airports.csv and routes.csv
    #[arg(short, long, env = "ROUTE_OXIDE_DATA")]
    data: Option<PathBuf>,

    /// Config file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// `--internal` / `--no-internal`; with neither, the config value applies.
#[derive(Args, Debug, Clone, Copy, Default)]
struct ScopeArgs {
    /// Only routes that stay inside the country
    #[arg(long, overrides_with = "no_internal")]
    internal: bool,
    /// Include international routes even if the config says internal only
    #[arg(long, overrides_with = "internal")]
    no_internal: bool,
}

impl ScopeArgs {
    fn internal_only(self, config: &AnalysisConfig) -> bool {
        match (self.internal, self.no_internal) {
            (true, _) => true,
            (_, true) => false,
            _ => config.internal_only,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Row counts for each pipeline stage
    Merge,
    /// Short-haul / long-haul split and CO2 estimate for a country
    Classify {
        country: String,
        #[command(flatten)]
        scope: ScopeArgs,
        /// Short-haul cutoff in km
        #[arg(long)]
        cutoff: Option<f64>,
    },
    /// Airports with departing routes in a country
    Airports { country: String },
    /// Routes departing an airport (IATA code)
    Flights {
        code: String,
        #[command(flatten)]
        scope: ScopeArgs,
    },
    /// Most used equipment by number of routes
    Equipment {
        #[arg(short)]
        n: Option<usize>,
        /// Restrict to source countries (repeatable)
        #[arg(long = "country")]
        countries: Vec<String>,
    },
    /// Distribution of route distances
    Histogram {
        #[arg(long)]
        bins: Option<usize>,
    },
    /// List aircraft models, or look one up
    Aircraft { name: Option<String> },
    /// Look up an airport by name
    Airport { name: String },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    // A second init only fails when a logger is already set; nothing to do then.
    let _ = TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce(&T)) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        text(value);
    }
    Ok(())
}

fn print_outcome(outcome: &LookupOutcome, describer: &dyn Describer) -> Result<()> {
    match outcome {
        LookupOutcome::Found { query, .. } => {
            println!("{}", describer.describe(query)?);
        }
        LookupOutcome::Suggestions { name, matches } => {
            println!("'{}' not found. Did you mean:", name);
            for m in matches {
                println!("- {}", m);
            }
        }
        LookupOutcome::Recommendations { name, names } => {
            println!("No close matches found for '{}'.", name);
            println!("Here are some names to choose from:");
            for n in names {
                println!("- {}", n);
            }
        }
    }
    Ok(())
}

fn print_lookup<T>(lookup: &Lookup<T>, found: impl FnOnce(&T)) {
    match lookup {
        Lookup::Found(v) => found(v),
        Lookup::NotFound(msg) => println!("{}", msg),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.clone().unwrap_or_else(AnalysisConfig::default_path);
    let config = AnalysisConfig::load(&config_path);
    let data_dir = cli.data.clone().unwrap_or_else(|| config.data_dir.clone());

    let raw = loader::load_dir(&data_dir)
        .with_context(|| format!("Failed to load datasets from {}", data_dir.display()))?;
    let dataset = build_dataset(&raw).context("Failed to merge datasets")?;
    let table = &dataset.routes;
    let json = cli.json;

    match cli.command {
        Commands::Merge => {
            #[derive(Serialize)]
            struct Counts {
                airports: usize,
                routes: usize,
                merged: usize,
            }
            let counts = Counts {
                airports: raw.airports.len(),
                routes: raw.routes.len(),
                merged: table.len(),
            };
            emit(json, &counts, |c| {
                println!("Airports: {}", c.airports);
                println!("Routes:   {}", c.routes);
                println!(
                    "Merged:   {} ({} unresolved dropped)",
                    c.merged,
                    c.routes.saturating_sub(c.merged)
                );
            })?;
        }
        Commands::Classify {
            country,
            scope,
            cutoff,
        } => {
            let cutoff = cutoff.unwrap_or(config.cutoff_km);
            let internal = scope.internal_only(&config);
            let result = classify(table, &country, internal, cutoff);
            emit(json, &result, |r| match r {
                Classification::NoRoutes { country } => {
                    println!("No routes found for {}.", country)
                }
                Classification::Classified(s) => {
                    let scope = if s.internal_only {
                        "Internal flights within"
                    } else {
                        "All flights from"
                    };
                    println!("{} {} (Cutoff: {}km)", scope, s.country, s.cutoff_km);
                    println!("Total short-haul flights: {}", s.short_haul_count);
                    println!("Total long-haul flights: {}", s.long_haul_count);
                    println!(
                        "Total short-haul distance: {:.2} km",
                        s.short_haul_total_distance_km
                    );
                    println!(
                        "Carbon emissions potential reductions: {:.2} kg of CO2",
                        s.estimated_co2_reduction_kg()
                    );
                }
            })?;
        }
        Commands::Airports { country } => {
            let result = airports_in_country(table, &country);
            emit(json, &result, |r| {
                print_lookup(r, |points| {
                    println!("Airports in {}:", country);
                    for p in points {
                        println!("{:>4}  {:>9.4} {:>9.4}", p.code, p.latitude, p.longitude);
                    }
                })
            })?;
        }
        Commands::Flights { code, scope } => {
            let internal = scope.internal_only(&config);
            let result = flights_from_airport(table, &code, internal);
            emit(json, &result, |r| {
                print_lookup(r, |legs| {
                    let scope = if internal { "Internal flights" } else { "Flights" };
                    println!("{} from {}:", scope, code);
                    for leg in legs {
                        println!(
                            "{} -> {} ({})",
                            leg.source_airport, leg.destination_airport, leg.destination_country
                        );
                    }
                })
            })?;
        }
        Commands::Equipment { n, countries } => {
            let n = n.unwrap_or(config.top_n);
            let result = top_equipment(table, n, &countries);
            emit(json, &result, |rows| {
                println!("Top {} Airplane Models by Number of Routes", n);
                for row in rows {
                    println!("{:<12} {}", row.equipment, row.routes);
                }
            })?;
        }
        Commands::Histogram { bins } => {
            let bins = bins.unwrap_or(config.histogram_bins);
            let result = distance_histogram(table, bins);
            emit(json, &result, |hist| {
                for bin in hist {
                    println!("{:>8.0} - {:>8.0} km  {}", bin.lower_km, bin.upper_km, bin.count);
                }
            })?;
        }
        Commands::Aircraft { name: None } => {
            let names = lookup::aircraft_names(&dataset.tables.airplanes);
            emit(json, &names, |names| {
                println!("List of Aircraft Models:");
                for n in names {
                    println!("{}", n);
                }
            })?;
        }
        Commands::Aircraft { name: Some(name) } => {
            let outcome =
                lookup::aircraft_info(&dataset.tables.airplanes, &name, &mut rand::thread_rng());
            if json {
                emit(json, &outcome, |_| {})?;
            } else {
                print_outcome(&outcome, &OfflineDescriber)?;
            }
        }
        Commands::Airport { name } => {
            let outcome = lookup::airport_info(table, &name, &mut rand::thread_rng());
            if json {
                emit(json, &outcome, |_| {})?;
            } else {
                print_outcome(&outcome, &OfflineDescriber)?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope_for(args: &[&str], config: &AnalysisConfig) -> bool {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Classify { scope, .. } | Commands::Flights { scope, .. } => {
                scope.internal_only(config)
            }
            _ => panic!("expected a scoped command"),
        }
    }

    #[test]
    fn test_scope_defaults_to_config() {
        let internal = AnalysisConfig {
            internal_only: true,
            ..AnalysisConfig::default()
        };
        assert!(scope_for(&["route-oxide", "classify", "Poland"], &internal));
        assert!(scope_for(&["route-oxide", "flights", "KRK"], &internal));
        assert!(!scope_for(&["route-oxide", "flights", "KRK"], &AnalysisConfig::default()));
    }

    #[test]
    fn test_no_internal_overrides_config() {
        let internal = AnalysisConfig {
            internal_only: true,
            ..AnalysisConfig::default()
        };
        assert!(!scope_for(&["route-oxide", "classify", "Poland", "--no-internal"], &internal));
        assert!(!scope_for(&["route-oxide", "flights", "KRK", "--no-internal"], &internal));
    }

    #[test]
    fn test_last_scope_flag_wins() {
        let config = AnalysisConfig::default();
        assert!(scope_for(
            &["route-oxide", "classify", "Poland", "--no-internal", "--internal"],
            &config
        ));
        assert!(!scope_for(
            &["route-oxide", "classify", "Poland", "--internal", "--no-internal"],
            &config
        ));
    }
}
