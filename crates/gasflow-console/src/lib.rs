//! Colorful console output for allocation runs.
//!
//! Provides a custom `tracing` layer that formats solver events with colors,
//! and [`render_report`] for printing a finished allocation.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (solve start/end)
//! - **DEBUG**: Derived flow bounds per furnace

mod format;
mod report;

pub use report::render_report;

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::format::grouped;

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static SOLVE_START_NANOS: AtomicU64 = AtomicU64::new(0);

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "gasflow_solver=info";

/// Initializes console logging.
///
/// Safe to call multiple times - only the first call has effect.
/// `RUST_LOG` overrides the default `gasflow_solver=info` filter.
pub fn init() {
    INIT.get_or_init(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(GasflowConsoleLayer)
            .try_init();
    });
}

// Marks the start of solving for elapsed time tracking.
fn mark_solve_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    SOLVE_START_NANOS.store(nanos, Ordering::Relaxed);
}

// Returns elapsed time since solve start.
fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = SOLVE_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

/// A tracing layer that formats allocation events with colors.
pub struct GasflowConsoleLayer;

impl<S: Subscriber> Layer<S> for GasflowConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("gasflow") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    backend: Option<String>,
    unit_count: Option<u64>,
    constraint_count: Option<u64>,
    degenerate_units: Option<u64>,
    empty_domains: Option<u64>,
    unit: Option<u64>,
    lower: Option<f64>,
    upper: Option<f64>,
    degenerate: Option<bool>,
    objective: Option<f64>,
    total_gas: Option<f64>,
    iterations: Option<u64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        match field.name() {
            "event" => self.event = Some(s.trim_matches('"').to_string()),
            "backend" => self.backend = Some(s.trim_matches('"').to_string()),
            _ => {}
        }
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        match field.name() {
            "lower" => self.lower = Some(value),
            "upper" => self.upper = Some(value),
            "objective" => self.objective = Some(value),
            "total_gas" => self.total_gas = Some(value),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "unit_count" => self.unit_count = Some(value),
            "constraint_count" => self.constraint_count = Some(value),
            "degenerate_units" => self.degenerate_units = Some(value),
            "empty_domains" => self.empty_domains = Some(value),
            "unit" => self.unit = Some(value),
            "iterations" => self.iterations = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "degenerate" {
            self.degenerate = Some(value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "backend" => self.backend = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    match v.event.as_deref().unwrap_or("") {
        "solve_start" => format_solve_start(v),
        "solve_end" => format_solve_end(v),
        "bounds" => format_bounds(v, level),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn format_solve_start(v: &EventVisitor) -> String {
    mark_solve_start();
    let units = v.unit_count.unwrap_or(0);
    let constraints = v.constraint_count.unwrap_or(0);
    let backend = v.backend.as_deref().unwrap_or("lp");

    let mut output = format!(
        "{} {} Allocating │ {} furnaces │ {} constraints │ {}",
        format_elapsed(),
        "▶".bright_green().bold(),
        units.to_formatted_string(&Locale::en).bright_yellow(),
        constraints.to_formatted_string(&Locale::en).bright_yellow(),
        backend.bright_magenta()
    );

    if let Some(degenerate) = v.degenerate_units.filter(|&n| n > 0) {
        output.push_str(&format!(
            " │ {} without quality response",
            degenerate.to_formatted_string(&Locale::en).yellow()
        ));
    }

    if let Some(empty) = v.empty_domains.filter(|&n| n > 0) {
        output.push_str(&format!(
            " │ {} empty domains",
            empty.to_formatted_string(&Locale::en).bright_red().bold()
        ));
    }

    output
}

fn format_solve_end(v: &EventVisitor) -> String {
    let mut output = format!(
        "{} {} Allocation complete │ objective {} │ {} gas",
        format_elapsed(),
        "■".bright_cyan().bold(),
        grouped(v.objective.unwrap_or(0.0), 2).bright_green().bold(),
        grouped(v.total_gas.unwrap_or(0.0), 2).white(),
    );

    if let Some(iterations) = v.iterations {
        output.push_str(&format!(
            " │ {} iterations",
            iterations.to_formatted_string(&Locale::en).bright_black()
        ));
    }

    output
}

fn format_bounds(v: &EventVisitor, level: Level) -> String {
    if level != Level::DEBUG {
        return String::new();
    }

    let unit = v.unit.unwrap_or(0);
    let lower = v.lower.unwrap_or(f64::NAN);
    let upper = v.upper.unwrap_or(f64::NAN);

    let range = format!("[{}, {}]", grouped(lower, 2), grouped(upper, 2));
    let range = if lower > upper {
        range.bright_red().to_string()
    } else {
        range.white().to_string()
    };

    let mut output = format!(
        "{} {} Furnace {:>2} │ flow {}",
        format_elapsed(),
        "·".bright_black(),
        unit,
        range
    );
    if v.degenerate == Some(true) {
        output.push_str(&format!(" │ {}", "no quality response".yellow()));
    }
    output
}
