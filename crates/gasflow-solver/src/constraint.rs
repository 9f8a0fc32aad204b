//! The three shop-wide constraints.
//!
//! Right-hand sides move every base-point term to the constant side so the
//! constraints are linear in the new flows only.

use gasflow_core::{AggregateConstraint, ProblemInstance};

use crate::lp::LinearConstraint;

/// Total gas flow within `[0, primary_cap]`.
pub fn primary_cap(problem: &ProblemInstance) -> LinearConstraint {
    LinearConstraint::between(
        AggregateConstraint::PrimaryCap.name(),
        vec![1.0; problem.unit_count()],
        0.0,
        problem.shop.primary_cap,
    )
}

/// Secondary stock row:
/// `Σ -k·equivalence·x ≤ secondary_cap - Σ secondary_base + k·Σ flow_base·equivalence`.
///
/// Consumption of furnace `i` at flow `x` is
/// `secondary_base + k·(flow_base - x)·equivalence`. The row's constant
/// carries the base-flow term with a positive sign, so it admits a reported
/// consumption up to `secondary_cap + 2k·Σ flow_base·equivalence`.
pub fn secondary_cap(problem: &ProblemInstance, k: f64) -> LinearConstraint {
    let coefficients = problem.units.iter().map(|u| -k * u.equivalence).collect();
    let upper = problem.shop.secondary_cap - problem.sum_by(|u| u.secondary_base)
        + k * problem.sum_by(|u| u.flow_base * u.equivalence);
    LinearConstraint::at_most(AggregateConstraint::SecondaryCap.name(), coefficients, upper)
}

/// Total output at least the requirement.
pub fn required_output(problem: &ProblemInstance) -> LinearConstraint {
    let coefficients = problem.units.iter().map(|u| u.output_gain()).collect();
    let lower = problem.shop.required_output - problem.sum_by(|u| u.output_base)
        + problem.sum_by(|u| u.flow_base * u.output_gain());
    LinearConstraint::at_least(
        AggregateConstraint::RequiredOutput.name(),
        coefficients,
        lower,
    )
}

/// Builds `kind` for `problem`.
pub fn build(kind: AggregateConstraint, problem: &ProblemInstance, k: f64) -> LinearConstraint {
    match kind {
        AggregateConstraint::PrimaryCap => primary_cap(problem),
        AggregateConstraint::SecondaryCap => secondary_cap(problem, k),
        AggregateConstraint::RequiredOutput => required_output(problem),
    }
}

/// All aggregate constraints, in [`AggregateConstraint::ALL`] order.
pub fn aggregate_constraints(problem: &ProblemInstance, k: f64) -> Vec<LinearConstraint> {
    AggregateConstraint::ALL
        .iter()
        .map(|&kind| build(kind, problem, k))
        .collect()
}
