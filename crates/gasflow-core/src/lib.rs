//! gasflow Core - Core types for furnace gas allocation
//!
//! This crate provides the data shared by every gasflow crate:
//! - Problem types describing the shop and its furnaces
//! - The allocation record produced by a successful solve
//! - The failure taxonomy for allocation and input validation
//! - The column-oriented payload accepted at the service boundary

pub mod allocation;
pub mod columnar;
pub mod error;
pub mod model;
pub mod validate;

pub use allocation::{Allocation, AllocationStatus};
pub use columnar::ParameterArrays;
pub use error::{AggregateConstraint, AllocationError, InfeasibilityCause, ValidationError};
pub use model::{ProblemInstance, ShopSpec, UnitSpec};
pub use validate::MAX_UNITS;
