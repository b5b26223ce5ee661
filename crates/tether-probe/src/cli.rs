//! Command-line interface definitions for tether-probe.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use logging::LogArgs;

/// Command-line interface for the `tether-probe` binary.
#[derive(Parser, Debug)]
#[command(
    name = "tether-probe",
    about = "Run attached-window placement scenarios",
    version
)]
pub struct Cli {
    /// Logging controls shared across tether binaries.
    #[command(flatten)]
    pub log: LogArgs,

    /// Which strategy to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level probe commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the anchor solver on the scenario's bounds.
    Solve(ScenarioArgs),
    /// Run the rule-based strategy on the scenario's `rules` section.
    Rules(ScenarioArgs),
    /// Place the scenario's window on a virtual display built from its monitors and surfaces.
    Place(ScenarioArgs),
}

/// Arguments shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct ScenarioArgs {
    /// Scenario file in RON syntax.
    #[arg(value_name = "SCENARIO")]
    pub path: PathBuf,

    /// Print the result as JSON instead of a summary line.
    #[arg(long)]
    pub json: bool,

    /// Also print the placement counters after the run.
    #[arg(long)]
    pub counters: bool,
}
