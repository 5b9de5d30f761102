//! CLI entry point for the crucible router.
//!
//! Usage:
//!   crucible-path solve <map.txt> [options]
//!   crucible-path solve --stdin [options]
//!
//! Options:
//!   --min-straight <n>  Blocks before the crucible may turn or stop
//!   --max-straight <n>  Blocks after which the crucible must turn
//!   --route             Include the chosen route drawn over the map
//!
//! Without either limit both the regular crucible (0..=3) and the ultra
//! crucible (4..=10) are solved.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use log::info;
use serde::{Deserialize, Serialize};

use crucible_path::{solve, CostGrid, SolverConfig};

#[derive(Parser)]
#[command(name = "crucible-path")]
#[command(about = "Least heat loss for crucibles with straight-line limits")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the least heat loss from the top-left to the bottom-right block
    Solve {
        /// Path to the map (use --stdin to read from stdin)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Read the map from stdin instead of a file
        #[arg(long)]
        stdin: bool,

        /// Blocks to travel before turning or stopping
        #[arg(long)]
        min_straight: Option<u32>,

        /// Blocks after which the crucible has to turn
        #[arg(long)]
        max_straight: Option<u32>,

        /// Include the route drawn over the map
        #[arg(long)]
        route: bool,
    },
}

/// Output for one kind of crucible
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScenarioOutput {
    name: String,
    min_straight: u32,
    max_straight: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    cost: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    states_expanded: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    time_elapsed_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    route_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    route: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            file,
            stdin,
            min_straight,
            max_straight,
            route,
        } => {
            let input = match read_input(file, stdin) {
                Ok(input) => input,
                Err(message) => {
                    eprintln!("Error: {}", message);
                    process::exit(1);
                }
            };

            let grid: CostGrid = match input.parse() {
                Ok(grid) => grid,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    process::exit(1);
                }
            };
            info!("loaded {}x{} map", grid.width(), grid.height());

            let scenarios = match (min_straight, max_straight) {
                (None, None) => vec![
                    ("crucible", SolverConfig::crucible()),
                    ("ultra crucible", SolverConfig::ultra_crucible()),
                ],
                (min, max) => vec![("custom", custom_config(min, max))],
            };

            let outputs: Vec<ScenarioOutput> = scenarios
                .into_iter()
                .map(|(name, config)| run_scenario(&grid, name, &config, route))
                .collect();
            let all_solved = outputs.iter().all(|output| output.error.is_none());

            match serde_json::to_string_pretty(&outputs) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("Error serializing output: {}", e);
                    process::exit(1);
                }
            }

            if !all_solved {
                process::exit(1);
            }
        }
    }
}

/// Limits for a single run when at least one bound was given.
///
/// A missing max comes from the crucible preset, or from the ultra crucible
/// preset once the given min exceeds it, and is never below the min. A
/// missing min is the crucible's 0.
fn custom_config(min_straight: Option<u32>, max_straight: Option<u32>) -> SolverConfig {
    let crucible = SolverConfig::crucible();
    let min_straight = min_straight.unwrap_or(crucible.min_straight);
    let max_straight = max_straight.unwrap_or_else(|| {
        let preset = if min_straight > crucible.max_straight {
            SolverConfig::ultra_crucible()
        } else {
            crucible
        };
        preset.max_straight.max(min_straight)
    });
    SolverConfig {
        min_straight,
        max_straight,
    }
}

fn read_input(file: Option<PathBuf>, stdin: bool) -> Result<String, String> {
    if stdin {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| format!("failed to read from stdin: {}", e))?;
        Ok(buffer)
    } else if let Some(path) = file {
        fs::read_to_string(&path).map_err(|e| format!("failed to read file {:?}: {}", path, e))
    } else {
        Err("must provide either a file path or --stdin".to_string())
    }
}

fn run_scenario(grid: &CostGrid, name: &str, config: &SolverConfig, route: bool) -> ScenarioOutput {
    let mut output = ScenarioOutput {
        name: name.to_string(),
        min_straight: config.min_straight,
        max_straight: config.max_straight,
        cost: None,
        states_expanded: None,
        time_elapsed_ms: None,
        route_length: None,
        route: None,
        error: None,
    };

    match solve(grid, config) {
        Ok(result) => {
            output.cost = Some(result.cost);
            output.states_expanded = Some(result.states_expanded);
            output.time_elapsed_ms = Some(result.time_elapsed_ms);
            output.route_length = Some(result.route.len());
            if route {
                output.route = Some(
                    result
                        .route
                        .render(grid)
                        .lines()
                        .map(str::to_string)
                        .collect(),
                );
            }
        }
        Err(e) => output.error = Some(e.to_string()),
    }

    output
}
