//! Test utilities for gasflow-solver
//!
//! Re-exports the reference fixtures from gasflow-test and adds a scripted
//! LP backend for exercising status handling without a real solver.

use std::sync::atomic::{AtomicUsize, Ordering};

pub use gasflow_test::{reference_instance, single_fixed_unit};

use crate::lp::{BackendError, LinearModel, LinearProgram, LpSolution, LpStatus};

// ============================================================================
// ScriptedBackend - returns a canned outcome for every solve
// ============================================================================

/// Outcome a [`ScriptedBackend`] reports.
#[derive(Debug, Clone)]
pub enum Script {
    /// Report `status` with these values.
    Solution {
        status: LpStatus,
        backend_status: &'static str,
        values: Vec<f64>,
    },
    /// Fail to instantiate.
    Unavailable(&'static str),
}

/// A backend that ignores the model and replays a script.
#[derive(Debug)]
pub struct ScriptedBackend {
    script: Script,
    calls: AtomicUsize,
}

impl ScriptedBackend {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
        }
    }

    /// Reports `status` with no values.
    pub fn status(status: LpStatus, backend_status: &'static str) -> Self {
        Self::new(Script::Solution {
            status,
            backend_status,
            values: Vec::new(),
        })
    }

    /// Reports an optimal solution with `values`.
    pub fn optimal(values: Vec<f64>) -> Self {
        Self::new(Script::Solution {
            status: LpStatus::Optimal,
            backend_status: "Solved",
            values,
        })
    }

    pub fn unavailable(reason: &'static str) -> Self {
        Self::new(Script::Unavailable(reason))
    }

    /// Number of solves requested so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl LinearProgram for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    fn solve(&self, _model: &LinearModel) -> Result<LpSolution, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            Script::Solution {
                status,
                backend_status,
                values,
            } => Ok(LpSolution {
                status: status.clone(),
                backend_status: backend_status.to_string(),
                values: values.clone(),
                iterations: 0,
            }),
            Script::Unavailable(reason) => Err(BackendError::Setup(reason.to_string())),
        }
    }
}
