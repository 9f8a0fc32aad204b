//! Assembly of the allocation LP.

use gasflow_config::AllocationConfig;
use gasflow_core::ProblemInstance;

use crate::bounds::{derive_all, DerivedBounds};
use crate::constraint::aggregate_constraints;
use crate::lp::{LinearModel, Sense};
use crate::objective::objective_coefficients;

/// The LP for one request together with the derived furnace domains.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationModel {
    pub lp: LinearModel,
    pub bounds: Vec<DerivedBounds>,
}

impl AllocationModel {
    /// Builds the model: one variable per furnace bounded by its
    /// quality-feasible domain, the maximized objective, and the three
    /// aggregate constraints.
    pub fn build(problem: &ProblemInstance, config: &AllocationConfig) -> Self {
        let bounds = derive_all(problem, config.degeneracy_threshold);
        let lp = LinearModel {
            sense: Sense::Maximize,
            objective: objective_coefficients(problem),
            bounds: bounds
                .iter()
                .map(|d| (d.bounds.lower, d.bounds.upper))
                .collect(),
            constraints: aggregate_constraints(problem, config.secondary_conversion),
        };
        Self { lp, bounds }
    }

    pub fn degenerate_count(&self) -> usize {
        self.bounds.iter().filter(|d| d.degenerate).count()
    }

    /// Indices of furnaces whose domain is empty.
    pub fn empty_domains(&self) -> impl Iterator<Item = usize> + '_ {
        self.bounds
            .iter()
            .enumerate()
            .filter(|(_, d)| d.bounds.is_empty())
            .map(|(i, _)| i)
    }
}
