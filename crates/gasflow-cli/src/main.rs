//! `gasflow` command-line front end.
//!
//! Usage:
//!   gasflow solve shop.json
//!   gasflow solve shop.toml --config gasflow.toml --json
//!   gasflow validate shop.json

mod input;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use gasflow::{Allocation, AllocationError, Allocator, ProblemInstance};
use owo_colors::OwoColorize;

use crate::input::{load_config, load_problem, InputError};

/// Exit code for a non-optimal allocation.
const EXIT_NOT_OPTIMAL: u8 = 1;
/// Exit code for unreadable or invalid input.
const EXIT_BAD_INPUT: u8 = 2;

/// Allocates injected gas across blast furnaces by linear programming.
#[derive(Parser)]
#[command(name = "gasflow", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate and solve a problem file.
    Solve {
        /// Problem file (.json, .toml, .yaml), columnar or structured.
        problem: PathBuf,

        /// Configuration file (.toml or .yaml). Defaults to ./gasflow.toml
        /// when present.
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// Print the result as JSON instead of a report.
        #[arg(long)]
        json: bool,

        /// Log solver progress to the console.
        #[arg(long, short)]
        verbose: bool,

        /// Disable colors in the report.
        #[arg(long)]
        no_color: bool,
    },

    /// Check a problem file without solving it.
    Validate {
        /// Problem file (.json, .toml, .yaml), columnar or structured.
        problem: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.command {
        Command::Solve {
            problem,
            config,
            json,
            verbose,
            no_color,
        } => solve(&problem, config.as_deref(), json, verbose, !no_color),
        Command::Validate { problem } => validate(&problem),
    }
}

fn report_input_error(err: &InputError) -> ExitCode {
    eprintln!("{} {}", "error:".bright_red().bold(), err);
    ExitCode::from(EXIT_BAD_INPUT)
}

fn validate(path: &Path) -> ExitCode {
    match load_problem(path) {
        Ok(problem) => {
            println!(
                "{} {} furnaces",
                "valid:".bright_green().bold(),
                problem.unit_count()
            );
            ExitCode::SUCCESS
        }
        Err(err) => report_input_error(&err),
    }
}

fn solve(
    path: &Path,
    config: Option<&Path>,
    json: bool,
    verbose: bool,
    color: bool,
) -> ExitCode {
    let (problem, config) = match load_problem(path).and_then(|p| Ok((p, load_config(config)?)))
    {
        Ok(loaded) => loaded,
        Err(err) => return report_input_error(&err),
    };

    if verbose {
        gasflow::console::init();
    }

    let result = Allocator::new(config).allocate(&problem);
    if json {
        print_json(&result);
    } else {
        print_report(&problem, &result, color);
    }

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::from(EXIT_NOT_OPTIMAL),
    }
}

fn print_json(result: &Result<Allocation, AllocationError>) {
    let value = match result {
        Ok(allocation) => serde_json::to_value(allocation),
        Err(err) => Ok(serde_json::json!({
            "status": err.status(),
            "message": err.to_string(),
        })),
    };
    match value.and_then(|v| serde_json::to_string_pretty(&v)) {
        Ok(text) => println!("{}", text),
        Err(err) => eprintln!("{} {}", "error:".bright_red().bold(), err),
    }
}

fn print_report(
    problem: &ProblemInstance,
    result: &Result<Allocation, AllocationError>,
    color: bool,
) {
    match result {
        Ok(allocation) => print!(
            "{}",
            gasflow::console::render_report(problem, allocation, color)
        ),
        Err(err) if color => eprintln!(
            "{} {}",
            err.status().as_str().bright_red().bold(),
            err
        ),
        Err(err) => eprintln!("{} {}", err.status(), err),
    }
}
