//! Projection of solved flows into reported shop figures.

use gasflow_config::ReportingConfig;
use gasflow_core::{Allocation, AllocationStatus, ProblemInstance};

use crate::objective::objective_value;

/// Rounds `value` half away from zero to `decimals` places.
///
/// Negative zero is normalized to zero.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor + 0.0
}

/// Builds the reported allocation for `flows`.
///
/// Totals, quality and the objective are computed from the unrounded flows;
/// rounding applies to the reported figures only.
pub fn project(
    problem: &ProblemInstance,
    k: f64,
    flows: &[f64],
    reporting: &ReportingConfig,
) -> Allocation {
    let flow_decimals = reporting.flow_decimals;
    let quality_decimals = reporting.quality_decimals;

    let mut total_secondary = 0.0;
    let mut total_output = 0.0;
    let mut quality = Vec::with_capacity(flows.len());

    for (unit, &x) in problem.units.iter().zip(flows) {
        let delta = x - unit.flow_base;
        total_secondary += unit.secondary_base + k * (unit.flow_base - x) * unit.equivalence;
        total_output += delta * unit.output_per_flow
            - unit.equivalence * delta * unit.output_per_secondary
            + unit.output_base;
        quality.push(round_to(
            unit.quality_base + delta * unit.quality_gain(),
            quality_decimals,
        ));
    }

    Allocation {
        objective: round_to(objective_value(problem, flows), flow_decimals),
        gas_distribution: flows.iter().map(|&x| round_to(x, flow_decimals)).collect(),
        total_gas_consumption: round_to(flows.iter().sum(), flow_decimals),
        total_secondary_consumption: round_to(total_secondary, flow_decimals),
        total_output: round_to(total_output, flow_decimals),
        quality,
        status: AllocationStatus::Optimal,
    }
}
