//! gasflow Solver Engine
//!
//! This crate turns a [`ProblemInstance`](gasflow_core::ProblemInstance)
//! into a bounded-variable linear program and back:
//! - Quality-feasible flow bounds per furnace
//! - Objective coefficients and the three aggregate constraints
//! - The [`LinearProgram`] backend seam and its Clarabel implementation
//! - Projection of the solved flows into shop totals
//! - Solve orchestration and infeasibility diagnosis

pub mod allocate;
pub mod bounds;
pub mod clarabel_backend;
pub mod constraint;
pub mod diagnose;
pub mod lp;
pub mod model;
pub mod objective;
pub mod project;

#[cfg(test)]
mod test_utils;

pub use allocate::{allocate, Allocator};
pub use bounds::{derive_flow_bounds, DerivedBounds, FlowBounds};
pub use clarabel_backend::ClarabelBackend;
pub use lp::{BackendError, LinearConstraint, LinearModel, LinearProgram, LpSolution, LpStatus, Sense};
pub use model::AllocationModel;
