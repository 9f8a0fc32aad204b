//! Objective coefficients.
//!
//! Each furnace contributes `c·x` to the maximized objective, where `c`
//! averages the net cost saving of substituting gas for coke with the
//! weighted output gain.

use gasflow_core::{ProblemInstance, ShopSpec, UnitSpec};

/// Objective coefficient of one furnace.
pub fn objective_coefficient(shop: &ShopSpec, unit: &UnitSpec) -> f64 {
    let cost = unit.equivalence * shop.primary_cost - shop.secondary_cost;
    0.5 * cost + 0.5 * shop.weight * unit.output_gain()
}

/// Objective coefficients in furnace order.
pub fn objective_coefficients(problem: &ProblemInstance) -> Vec<f64> {
    problem
        .units
        .iter()
        .map(|unit| objective_coefficient(&problem.shop, unit))
        .collect()
}

/// Objective value of `flows`.
pub fn objective_value(problem: &ProblemInstance, flows: &[f64]) -> f64 {
    problem
        .units
        .iter()
        .zip(flows)
        .map(|(unit, x)| objective_coefficient(&problem.shop, unit) * x)
        .sum()
}
