//! Solve entry point that hides all internal wiring.

use gasflow_config::AllocationConfig;
use gasflow_core::{Allocation, AllocationError, ProblemInstance};
use gasflow_solver::Allocator;

/// Configuration file read by [`solve`] from the working directory.
pub const CONFIG_FILE: &str = "gasflow.toml";

/// Solves `problem` with the configuration in [`CONFIG_FILE`], or the
/// defaults if that file is missing or unreadable.
///
/// With the `console` feature, console logging is initialized on first use.
pub fn solve(problem: &ProblemInstance) -> Result<Allocation, AllocationError> {
    let config = AllocationConfig::load(CONFIG_FILE).unwrap_or_default();
    solve_with_config(problem, config)
}

/// Solves `problem` with an explicit configuration.
pub fn solve_with_config(
    problem: &ProblemInstance,
    config: AllocationConfig,
) -> Result<Allocation, AllocationError> {
    #[cfg(feature = "console")]
    gasflow_console::init();

    Allocator::new(config).allocate(problem)
}
