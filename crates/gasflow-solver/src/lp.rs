//! Bounded-variable linear programs and the backend seam.
//!
//! A [`LinearModel`] holds continuous variables with lower/upper bounds, a
//! linear objective, and ranged linear constraints. Any type implementing
//! [`LinearProgram`] can solve it; infinite bounds mean "no bound".

use std::fmt;

use thiserror::Error;

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Maximize,
    Minimize,
}

/// Ranged linear constraint `lower ≤ Σ coefficients[i]·x[i] ≤ upper`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    /// Name used in diagnostics.
    pub name: &'static str,
    /// One coefficient per variable.
    pub coefficients: Vec<f64>,
    pub lower: f64,
    pub upper: f64,
}

impl LinearConstraint {
    pub fn between(name: &'static str, coefficients: Vec<f64>, lower: f64, upper: f64) -> Self {
        Self {
            name,
            coefficients,
            lower,
            upper,
        }
    }

    pub fn at_most(name: &'static str, coefficients: Vec<f64>, upper: f64) -> Self {
        Self::between(name, coefficients, f64::NEG_INFINITY, upper)
    }

    pub fn at_least(name: &'static str, coefficients: Vec<f64>, lower: f64) -> Self {
        Self::between(name, coefficients, lower, f64::INFINITY)
    }

    /// Left-hand side at `x`.
    pub fn evaluate(&self, x: &[f64]) -> f64 {
        self.coefficients.iter().zip(x).map(|(a, v)| a * v).sum()
    }

    /// Whether `x` satisfies the constraint within `tolerance`.
    pub fn is_satisfied(&self, x: &[f64], tolerance: f64) -> bool {
        let lhs = self.evaluate(x);
        lhs >= self.lower - tolerance && lhs <= self.upper + tolerance
    }
}

/// A complete LP ready for a backend.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    pub sense: Sense,
    /// One objective coefficient per variable.
    pub objective: Vec<f64>,
    /// `(lower, upper)` per variable.
    pub bounds: Vec<(f64, f64)>,
    pub constraints: Vec<LinearConstraint>,
}

impl LinearModel {
    pub fn variable_count(&self) -> usize {
        self.objective.len()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Objective at `x`.
    pub fn objective_value(&self, x: &[f64]) -> f64 {
        self.objective.iter().zip(x).map(|(c, v)| c * v).sum()
    }
}

/// Outcome class of a solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LpStatus {
    /// An optimal point was found.
    Optimal,
    /// The constraints admit no point.
    Infeasible,
    /// The objective is unbounded over the feasible set.
    Unbounded,
    /// The backend stopped early (iteration or time limit, numerical
    /// trouble).
    Stopped,
}

impl fmt::Display for LpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LpStatus::Optimal => "optimal",
            LpStatus::Infeasible => "infeasible",
            LpStatus::Unbounded => "unbounded",
            LpStatus::Stopped => "stopped",
        };
        f.write_str(s)
    }
}

/// Result reported by a backend.
#[derive(Debug, Clone, PartialEq)]
pub struct LpSolution {
    pub status: LpStatus,
    /// Backend-specific status text, kept for error reporting.
    pub backend_status: String,
    /// Variable values; meaningful only when `status` is optimal.
    pub values: Vec<f64>,
    pub iterations: u32,
}

/// Failure to set up a backend for a model.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("invalid backend settings: {0}")]
    Settings(String),

    #[error("backend rejected the model: {0}")]
    Setup(String),
}

/// A bounded-variable LP capability.
///
/// Implementations must be deterministic: the same model yields the same
/// solution.
pub trait LinearProgram: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Solves `model`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] if the backend cannot be instantiated for
    /// this model. Infeasibility and early stops are reported through
    /// [`LpSolution::status`], not as errors.
    fn solve(&self, model: &LinearModel) -> Result<LpSolution, BackendError>;
}
