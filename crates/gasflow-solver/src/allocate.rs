//! Solve orchestration.
//!
//! [`Allocator`] builds the LP for a request, hands it to its backend, and
//! turns the backend outcome into an [`Allocation`] or a typed
//! [`AllocationError`]. No partial result is ever returned.

use gasflow_config::AllocationConfig;
use gasflow_core::{Allocation, AllocationError, ProblemInstance};
use tracing::{debug, info};

use crate::clarabel_backend::ClarabelBackend;
use crate::diagnose::diagnose;
use crate::lp::{LinearProgram, LpStatus};
use crate::model::AllocationModel;
use crate::project::project;

/// Allocates gas flow across furnaces with a fixed configuration and LP
/// backend.
///
/// An allocator holds no per-request state; one instance can serve any
/// number of requests, from any number of threads.
///
/// # Example
///
/// ```
/// use gasflow_core::{ProblemInstance, ShopSpec, UnitSpec};
/// use gasflow_solver::Allocator;
///
/// let problem = ProblemInstance::new(
///     ShopSpec::new(1.8, 0.6, 1000.0, 100.0, 0.0),
///     vec![UnitSpec::fixed(250.0)],
/// );
///
/// let allocation = Allocator::default().allocate(&problem).unwrap();
/// assert!(allocation.is_optimal());
/// assert_eq!(allocation.gas_distribution, vec![250.0]);
/// ```
#[derive(Debug, Clone)]
pub struct Allocator<B: LinearProgram = ClarabelBackend> {
    config: AllocationConfig,
    backend: B,
}

impl Default for Allocator<ClarabelBackend> {
    fn default() -> Self {
        Self::new(AllocationConfig::default())
    }
}

impl Allocator<ClarabelBackend> {
    /// Creates an allocator using Clarabel configured from `config.backend`.
    pub fn new(config: AllocationConfig) -> Self {
        let backend = ClarabelBackend::from_config(&config.backend);
        Self { config, backend }
    }
}

impl<B: LinearProgram> Allocator<B> {
    /// Creates an allocator with a custom backend.
    pub fn with_backend(config: AllocationConfig, backend: B) -> Self {
        Self { config, backend }
    }

    pub fn config(&self) -> &AllocationConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Solves one allocation request.
    ///
    /// The request is expected to have passed
    /// [`ProblemInstance::validate`]; an unvalidated request still yields a
    /// result or a typed error, never a panic.
    ///
    /// # Errors
    ///
    /// - [`AllocationError::SolverUnavailable`] if the backend cannot be set
    ///   up for the model.
    /// - [`AllocationError::Infeasible`] if no flow satisfies every
    ///   constraint, with the diagnosed cause.
    /// - [`AllocationError::SolverFailed`] if the backend stops without an
    ///   optimal solution or an infeasibility certificate.
    pub fn allocate(&self, problem: &ProblemInstance) -> Result<Allocation, AllocationError> {
        let model = AllocationModel::build(problem, &self.config);

        info!(
            event = "solve_start",
            backend = self.backend.name(),
            unit_count = problem.unit_count(),
            constraint_count = model.lp.constraint_count(),
            degenerate_units = model.degenerate_count(),
            empty_domains = model.empty_domains().count(),
        );
        for (i, derived) in model.bounds.iter().enumerate() {
            debug!(
                event = "bounds",
                unit = i + 1,
                lower = derived.bounds.lower,
                upper = derived.bounds.upper,
                degenerate = derived.degenerate,
            );
        }

        let solution = self
            .backend
            .solve(&model.lp)
            .map_err(|e| AllocationError::SolverUnavailable(e.to_string()))?;

        match solution.status {
            LpStatus::Optimal => {}
            LpStatus::Infeasible => {
                return Err(AllocationError::Infeasible {
                    backend_status: solution.backend_status,
                    cause: diagnose(&model),
                });
            }
            LpStatus::Unbounded | LpStatus::Stopped => {
                return Err(AllocationError::SolverFailed {
                    status: solution.backend_status,
                });
            }
        }

        if solution.values.len() != problem.unit_count()
            || solution.values.iter().any(|x| !x.is_finite())
        {
            return Err(AllocationError::SolverFailed {
                status: format!(
                    "{} reported {} but returned an unusable point ({} values for {} furnaces)",
                    self.backend.name(),
                    solution.backend_status,
                    solution.values.len(),
                    problem.unit_count()
                ),
            });
        }

        // Interior-point iterates may sit a hair outside the box.
        let flows: Vec<f64> = solution
            .values
            .iter()
            .zip(&model.bounds)
            .map(|(&x, derived)| derived.bounds.clamp(x))
            .collect();

        let allocation = project(
            problem,
            self.config.secondary_conversion,
            &flows,
            &self.config.reporting,
        );

        info!(
            event = "solve_end",
            objective = allocation.objective,
            total_gas = allocation.total_gas_consumption,
            iterations = solution.iterations,
        );

        Ok(allocation)
    }
}

/// Solves `problem` with the default configuration and the Clarabel
/// backend.
pub fn allocate(problem: &ProblemInstance) -> Result<Allocation, AllocationError> {
    Allocator::default().allocate(problem)
}
