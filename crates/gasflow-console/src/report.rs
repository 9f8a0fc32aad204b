//! Human-readable allocation report.

use std::fmt::Write;

use gasflow_core::{Allocation, ProblemInstance};
use owo_colors::OwoColorize;

use crate::format::grouped;

/// Relative distance at which a figure counts as sitting on its limit.
const BINDING: f64 = 1e-6;

fn at_limit(value: f64, limit: f64) -> bool {
    (value - limit).abs() <= BINDING * limit.abs().max(1.0)
}

struct Palette {
    color: bool,
}

impl Palette {
    fn title(&self, s: &str) -> String {
        if self.color {
            s.bright_cyan().bold().to_string()
        } else {
            s.to_string()
        }
    }

    fn good(&self, s: &str) -> String {
        if self.color {
            s.bright_green().bold().to_string()
        } else {
            s.to_string()
        }
    }

    fn warn(&self, s: &str) -> String {
        if self.color {
            s.yellow().to_string()
        } else {
            s.to_string()
        }
    }

    fn dim(&self, s: &str) -> String {
        if self.color {
            s.bright_black().to_string()
        } else {
            s.to_string()
        }
    }
}

/// Renders `allocation` for `problem` as a furnace table followed by shop
/// totals against their limits.
///
/// Flows and quality values sitting on a limit are marked with `*`. Pass
/// `color = false` for plain text.
pub fn render_report(problem: &ProblemInstance, allocation: &Allocation, color: bool) -> String {
    let p = Palette { color };
    let shop = &problem.shop;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} │ {} │ objective {}",
        p.title("Gas allocation"),
        p.good(allocation.status.as_str()),
        grouped(allocation.objective, 2)
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{}",
        p.dim(&format!(
            "{:>3}  {:>12}  {:>12}  {:>12}  {:>10}  {:>21}",
            "#", "base flow", "new flow", "change", "quality", "band"
        ))
    );

    let rows = problem
        .units
        .iter()
        .zip(&allocation.gas_distribution)
        .zip(&allocation.quality);
    for (i, ((unit, &flow), &quality)) in rows.enumerate() {
        let flow_mark = if at_limit(flow, unit.flow_min) || at_limit(flow, unit.flow_max) {
            "*"
        } else {
            " "
        };
        let quality_mark =
            if at_limit(quality, unit.quality_min) || at_limit(quality, unit.quality_max) {
                "*"
            } else {
                " "
            };
        let band = format!(
            "[{:.6}, {:.6}]",
            unit.quality_min, unit.quality_max
        );
        let _ = writeln!(
            out,
            "{:>3}  {:>12}  {:>12}{}  {:>12}  {:>10}{}  {:>21}",
            i + 1,
            grouped(unit.flow_base, 2),
            grouped(flow, 2),
            p.warn(flow_mark),
            grouped(flow - unit.flow_base, 2),
            format!("{:.6}", quality),
            p.warn(quality_mark),
            p.dim(&band)
        );
    }

    let _ = writeln!(out);
    let totals = [
        (
            "gas",
            allocation.total_gas_consumption,
            shop.primary_cap,
            "limit",
        ),
        (
            "secondary",
            allocation.total_secondary_consumption,
            shop.secondary_cap,
            "limit",
        ),
        (
            "output",
            allocation.total_output,
            shop.required_output,
            "required",
        ),
    ];
    for (name, value, bound, kind) in totals {
        let mark = if at_limit(value, bound) { "*" } else { " " };
        let _ = writeln!(
            out,
            "{:<10} {:>12}{} / {:>12} {}",
            name,
            grouped(value, 2),
            p.warn(mark),
            grouped(bound, 2),
            p.dim(kind)
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use gasflow_core::AllocationStatus;
    use gasflow_test::reference_instance;

    fn allocation() -> Allocation {
        Allocation {
            objective: 45047.75,
            gas_distribution: vec![
                10000.0, 11095.54, 20000.0, 10000.0, 10000.0, 20000.0, 20000.0, 18904.46,
            ],
            total_gas_consumption: 120000.0,
            total_secondary_consumption: 502.55,
            total_output: 1190.1,
            quality: vec![
                0.02315, 0.025, 0.00598, 0.018767, 0.01915, 0.01006, 0.01063, 0.009032,
            ],
            status: AllocationStatus::Optimal,
        }
    }

    #[test]
    fn test_plain_report() {
        let report = render_report(&reference_instance(), &allocation(), false);

        assert!(report.starts_with("Gas allocation │ OPTIMAL │ objective 45,047.75"));
        assert!(report.contains("11,095.54"));
        assert!(report.contains("-5,000.00"));
        assert!(report.contains("0.025000*"));
        assert!(report.contains("120,000.00* /   120,000.00 limit"));
        assert!(report.contains("output"));
        assert!(!report.contains('\u{1b}'));
    }

    #[test]
    fn test_one_row_per_furnace() {
        let report = render_report(&reference_instance(), &allocation(), false);
        let rows = report
            .lines()
            .filter(|line| line.contains("[0.000000, 0.025000]"))
            .count();
        assert_eq!(rows, 8);
    }

    #[test]
    fn test_colored_report() {
        let report = render_report(&reference_instance(), &allocation(), true);
        assert!(report.contains('\u{1b}'));
        assert!(report.contains("OPTIMAL"));
    }
}
