//! gasflow - Furnace Gas Allocation in Rust
//!
//! Zero-wiring API: describe the shop and its furnaces, then call
//! [`solve`].
//!
//! # Example
//!
//! ```rust
//! use gasflow::prelude::*;
//!
//! let problem = ProblemInstance::new(
//!     ShopSpec::new(1.8, 0.6, 1000.0, 100.0, 0.0),
//!     vec![UnitSpec::fixed(250.0)],
//! );
//! assert!(problem.validate().is_ok());
//!
//! let allocation = solve(&problem).unwrap();
//! assert_eq!(allocation.status, AllocationStatus::Optimal);
//! ```

// Problem and result types
pub use gasflow_core::{
    AggregateConstraint, Allocation, AllocationError, AllocationStatus, InfeasibilityCause,
    ParameterArrays, ProblemInstance, ShopSpec, UnitSpec, ValidationError, MAX_UNITS,
};

// Configuration
pub use gasflow_config::{AllocationConfig, BackendConfig, ConfigError, ReportingConfig};

// Solver engine
pub use gasflow_solver::{Allocator, ClarabelBackend, LinearProgram};

#[cfg(feature = "console")]
pub use gasflow_console as console;

mod solver;
pub use solver::{solve, solve_with_config, CONFIG_FILE};

pub mod prelude {
    pub use super::{solve, solve_with_config};
    pub use super::{
        Allocation, AllocationError, AllocationStatus, ProblemInstance, ShopSpec, UnitSpec,
    };
    pub use super::{AllocationConfig, Allocator};
}
