//! Command-line interface for the Agrilogix logistics engine.
//!
//! `agrilogix plan <request.json>` reads a JSON snapshot describing one
//! operation (nearest facility, nearest producers, assignment, route, cost,
//! shipment or display polyline), validates it, runs it and prints the
//! result as JSON.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod plan;

pub use error::{CliError, RequestError};

const ARG_PLAN_REQUEST: &str = "request-path";
const ARG_PLAN_TARIFF: &str = "tariff";
const ARG_PLAN_MAX_WAYPOINTS: &str = "max-waypoints";
const ENV_PLAN_REQUEST: &str = "AGRILOGIX_CMDS_PLAN_REQUEST_PATH";

/// Run the Agrilogix CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments, configuration, inputs or the
/// requested operation fail.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => plan::run_plan(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "agrilogix",
    about = "Facility search, routing and shipment costing for farm produce",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run one planning operation described by a JSON request file.
    Plan(plan::PlanArgs),
}

#[cfg(test)]
mod tests;
