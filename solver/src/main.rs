use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use lem_in::{parse_colony, Enumeration, ParseError, PlannerConfig, RouteError};

#[derive(Parser)]
#[command(name = "lem-in")]
#[command(version)]
#[command(about = "Move a colony of ants from start to end in as few turns as possible")]
struct Cli {
    /// Colony description to route
    file: PathBuf,

    /// Most candidate paths to enumerate
    #[arg(long, env = "LEM_IN_MAX_PATHS", default_value_t = 100)]
    max_paths: usize,

    /// Largest candidate list that still gets an exact search after the greedy pass
    #[arg(long, env = "LEM_IN_EXHAUSTIVE_LIMIT", default_value_t = 16)]
    exhaustive_limit: usize,

    /// Candidate discovery strategy (depth-first or shortest-first)
    #[arg(long, env = "LEM_IN_ENUMERATION", default_value_t = Enumeration::DepthFirst)]
    enumeration: Enumeration,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn reject(header: &str, reason: impl std::fmt::Display) -> ExitCode {
    println!("{}", header);
    println!("Reason: {}", reason);
    ExitCode::FAILURE
}

fn header(error: &ParseError) -> &'static str {
    if error.is_ant_limit() {
        "ERROR: ant limit exceeded"
    } else {
        "ERROR: invalid data format"
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let input = fs::read_to_string(&cli.file)
        .with_context(|| format!("Failed to read colony from given input file({}).", cli.file.display()))?;

    let colony = match parse_colony(&input) {
        Ok(colony) => colony,
        Err(error) => return Ok(reject(header(&error), &error)),
    };

    let config = PlannerConfig::default()
        .with_max_candidates(cli.max_paths)
        .with_exhaustive_limit(cli.exhaustive_limit)
        .with_enumeration(cli.enumeration);
    debug!(?config, "planning");

    let schedule = match colony.solve_with(config) {
        Ok(schedule) => schedule,
        Err(RouteError::NoRoute { .. }) => return Ok(reject("ERROR: invalid data format", "no path from start to end")),
        Err(error) => return Err(error).context("Failed to schedule ants."),
    };
    debug!(turns = schedule.turn_count(), "scheduled");

    for line in input.lines() {
        println!("{}", line);
    }
    println!();
    print!("{}", schedule.display(&colony));

    Ok(ExitCode::SUCCESS)
}
