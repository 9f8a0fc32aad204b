//! The allocation record returned by a successful solve.

use std::fmt;

/// Outcome tag reported alongside an allocation or a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum AllocationStatus {
    /// The backend proved optimality.
    Optimal,
    /// No flow assignment satisfies every constraint.
    Infeasible,
    /// The backend failed to produce an optimal basis.
    SolverError,
}

impl AllocationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AllocationStatus::Optimal => "OPTIMAL",
            AllocationStatus::Infeasible => "INFEASIBLE",
            AllocationStatus::SolverError => "SOLVER_ERROR",
        }
    }
}

impl fmt::Display for AllocationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optimal gas distribution and the shop totals it implies.
///
/// Flow, consumption, output and objective figures are rounded for
/// reporting; quality figures keep more decimals because they are small
/// fractions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Allocation {
    /// Objective value of the distribution.
    pub objective: f64,
    /// New gas flow target per furnace, in furnace order.
    pub gas_distribution: Vec<f64>,
    /// Sum of the gas flow targets.
    pub total_gas_consumption: f64,
    /// Shop secondary-resource consumption after substitution.
    pub total_secondary_consumption: f64,
    /// Shop output at the new flow targets.
    pub total_output: f64,
    /// Linearized quality metric per furnace, in furnace order.
    pub quality: Vec<f64>,
    pub status: AllocationStatus,
}

impl Allocation {
    /// Number of furnaces in the distribution.
    pub fn unit_count(&self) -> usize {
        self.gas_distribution.len()
    }

    pub fn is_optimal(&self) -> bool {
        self.status == AllocationStatus::Optimal
    }
}
