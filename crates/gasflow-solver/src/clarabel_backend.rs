//! [`LinearProgram`] backed by the Clarabel interior-point solver.
//!
//! Clarabel solves `minimize ½x'Px + q'x` subject to `Ax + s = b`, `s ∈ K`.
//! An LP maps onto it with `P = 0`, equality rows in a zero cone and every
//! other row (variable bounds included) as `a·x ≤ b` in a nonnegative cone.

use std::time::Duration;

use clarabel::algebra::CscMatrix;
use clarabel::solver::{
    DefaultSettingsBuilder, DefaultSolver, IPSolver, SolverStatus, SupportedConeT,
};
use gasflow_config::BackendConfig;

use crate::lp::{BackendError, LinearModel, LinearProgram, LpSolution, LpStatus, Sense};

/// Clarabel settings used for every solve.
#[derive(Debug, Clone, PartialEq)]
pub struct ClarabelBackend {
    pub max_iterations: u32,
    pub tolerance: f64,
    pub time_limit: Option<Duration>,
    pub verbose: bool,
}

impl Default for ClarabelBackend {
    fn default() -> Self {
        Self::from_config(&BackendConfig::default())
    }
}

impl ClarabelBackend {
    pub fn from_config(config: &BackendConfig) -> Self {
        Self {
            max_iterations: config.max_iterations,
            tolerance: config.tolerance,
            time_limit: config.time_limit(),
            verbose: config.verbose,
        }
    }
}

/// One row `coefficients·x (= or ≤) rhs` before conversion to CSC.
struct Row {
    entries: Vec<(usize, f64)>,
    rhs: f64,
}

impl Row {
    fn scaled(coefficients: &[f64], sign: f64, rhs: f64) -> Self {
        let entries = coefficients
            .iter()
            .enumerate()
            .filter(|&(_, &a)| a != 0.0)
            .map(|(j, &a)| (j, sign * a))
            .collect();
        Self { entries, rhs }
    }

    fn unit(variable: usize, sign: f64, rhs: f64) -> Self {
        Self {
            entries: vec![(variable, sign)],
            rhs,
        }
    }
}

/// Equality and inequality rows of `model`.
fn collect_rows(model: &LinearModel) -> (Vec<Row>, Vec<Row>) {
    let mut equalities = Vec::new();
    let mut inequalities = Vec::new();

    for (j, &(lower, upper)) in model.bounds.iter().enumerate() {
        if lower == upper {
            equalities.push(Row::unit(j, 1.0, upper));
            continue;
        }
        if upper.is_finite() {
            inequalities.push(Row::unit(j, 1.0, upper));
        }
        if lower.is_finite() {
            inequalities.push(Row::unit(j, -1.0, -lower));
        }
    }

    for constraint in &model.constraints {
        let (lower, upper) = (constraint.lower, constraint.upper);
        if lower == upper {
            equalities.push(Row::scaled(&constraint.coefficients, 1.0, upper));
            continue;
        }
        if upper.is_finite() {
            inequalities.push(Row::scaled(&constraint.coefficients, 1.0, upper));
        }
        if lower.is_finite() {
            inequalities.push(Row::scaled(&constraint.coefficients, -1.0, -lower));
        }
    }

    (equalities, inequalities)
}

/// Column-compressed form of `rows`.
fn to_csc(rows: &[Row], columns: usize) -> CscMatrix<f64> {
    let mut by_column: Vec<Vec<(usize, f64)>> = vec![Vec::new(); columns];
    for (i, row) in rows.iter().enumerate() {
        for &(j, a) in &row.entries {
            by_column[j].push((i, a));
        }
    }

    let mut colptr = Vec::with_capacity(columns + 1);
    let mut rowval = Vec::new();
    let mut nzval = Vec::new();
    colptr.push(0);
    for column in by_column {
        for (i, a) in column {
            rowval.push(i);
            nzval.push(a);
        }
        colptr.push(rowval.len());
    }

    CscMatrix::new(rows.len(), columns, colptr, rowval, nzval)
}

fn classify(status: SolverStatus) -> LpStatus {
    match status {
        SolverStatus::Solved | SolverStatus::AlmostSolved => LpStatus::Optimal,
        SolverStatus::PrimalInfeasible | SolverStatus::AlmostPrimalInfeasible => {
            LpStatus::Infeasible
        }
        SolverStatus::DualInfeasible | SolverStatus::AlmostDualInfeasible => LpStatus::Unbounded,
        _ => LpStatus::Stopped,
    }
}

impl LinearProgram for ClarabelBackend {
    fn name(&self) -> &str {
        "clarabel"
    }

    fn solve(&self, model: &LinearModel) -> Result<LpSolution, BackendError> {
        let n = model.variable_count();

        let (equalities, inequalities) = collect_rows(model);
        let mut cones: Vec<SupportedConeT<f64>> = Vec::with_capacity(2);
        if !equalities.is_empty() {
            cones.push(SupportedConeT::ZeroConeT(equalities.len()));
        }
        if !inequalities.is_empty() {
            cones.push(SupportedConeT::NonnegativeConeT(inequalities.len()));
        }
        let rows: Vec<Row> = equalities.into_iter().chain(inequalities).collect();

        let a = to_csc(&rows, n);
        let b: Vec<f64> = rows.iter().map(|r| r.rhs).collect();
        let p = CscMatrix::new(n, n, vec![0; n + 1], vec![], vec![]);
        let q: Vec<f64> = match model.sense {
            Sense::Minimize => model.objective.clone(),
            Sense::Maximize => model.objective.iter().map(|c| -c).collect(),
        };

        let time_limit = self
            .time_limit
            .map_or(f64::INFINITY, |limit| limit.as_secs_f64());
        let settings = DefaultSettingsBuilder::default()
            .verbose(self.verbose)
            .max_iter(self.max_iterations)
            .tol_feas(self.tolerance)
            .tol_gap_abs(self.tolerance)
            .tol_gap_rel(self.tolerance)
            .time_limit(time_limit)
            .build()
            .map_err(|e| BackendError::Settings(format!("{:?}", e)))?;

        let mut solver = DefaultSolver::new(&p, &q, &a, &b, &cones, settings)
            .map_err(|e| BackendError::Setup(format!("{:?}", e)))?;
        solver.solve();

        let solution = &solver.solution;
        Ok(LpSolution {
            status: classify(solution.status),
            backend_status: format!("{:?}", solution.status),
            values: solution.x.clone(),
            iterations: solution.iterations,
        })
    }
}
