//! Quality-feasible flow bounds.
//!
//! The linearized quality of furnace `i` at flow `x` is
//! `quality_base + (x - flow_base)·s`, where `s` is the full quality
//! sensitivity (including the quality-vs-output cross term). Requiring it to
//! stay inside `[quality_min, quality_max]` bounds `x` on both sides; those
//! bounds are intersected with the physical range `[flow_min, flow_max]`.

use gasflow_core::{ProblemInstance, UnitSpec};

/// Closed flow interval. Empty when `lower > upper`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowBounds {
    pub lower: f64,
    pub upper: f64,
}

impl FlowBounds {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    pub fn is_empty(&self) -> bool {
        self.lower > self.upper
    }

    pub fn contains(&self, x: f64) -> bool {
        x >= self.lower && x <= self.upper
    }

    /// Moves `x` to the nearest point of a non-empty interval.
    pub fn clamp(&self, x: f64) -> f64 {
        if self.is_empty() {
            return x;
        }
        x.clamp(self.lower, self.upper)
    }
}

/// Effective flow domain of one furnace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedBounds {
    pub bounds: FlowBounds,
    /// Quality does not respond to flow; the physical range was kept as is.
    pub degenerate: bool,
}

/// Tightens the flow range of `unit` so its linearized quality stays in
/// band.
///
/// When the quality sensitivity is smaller than `threshold` in magnitude the
/// physical range is returned unchanged. An empty result is not an error:
/// the LP backend reports the infeasibility.
///
/// # Example
///
/// ```
/// use gasflow_core::UnitSpec;
/// use gasflow_solver::derive_flow_bounds;
///
/// // Quality rises by 0.001 per unit of flow; the band allows +0.005.
/// let unit = UnitSpec {
///     flow_min: 0.0,
///     flow_max: 100.0,
///     quality_base: 0.010,
///     quality_min: 0.0,
///     quality_max: 0.015,
///     quality_per_flow: 0.001,
///     ..UnitSpec::fixed(50.0)
/// };
///
/// let derived = derive_flow_bounds(&unit, 1e-10);
/// assert!(!derived.degenerate);
/// assert!((derived.bounds.lower - 40.0).abs() < 1e-9);
/// assert!((derived.bounds.upper - 55.0).abs() < 1e-9);
/// ```
pub fn derive_flow_bounds(unit: &UnitSpec, threshold: f64) -> DerivedBounds {
    let physical = FlowBounds::new(unit.flow_min, unit.flow_max);
    let sensitivity = unit.quality_sensitivity();
    if sensitivity.abs() < threshold {
        return DerivedBounds {
            bounds: physical,
            degenerate: true,
        };
    }

    let at_min = unit.flow_base + (unit.quality_min - unit.quality_base) / sensitivity;
    let at_max = unit.flow_base + (unit.quality_max - unit.quality_base) / sensitivity;

    DerivedBounds {
        bounds: FlowBounds::new(
            physical.lower.max(at_min.min(at_max)),
            physical.upper.min(at_min.max(at_max)),
        ),
        degenerate: false,
    }
}

/// Derives the flow domain of every furnace, in furnace order.
pub fn derive_all(problem: &ProblemInstance, threshold: f64) -> Vec<DerivedBounds> {
    problem
        .units
        .iter()
        .map(|unit| derive_flow_bounds(unit, threshold))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn furnace(quality_per_flow: f64) -> UnitSpec {
        UnitSpec {
            flow_min: 10000.0,
            flow_max: 20000.0,
            quality_base: 0.014,
            quality_min: 0.0,
            quality_max: 0.025,
            quality_per_flow,
            ..UnitSpec::fixed(17000.0)
        }
    }

    #[test]
    fn test_negative_sensitivity_raises_lower_bound() {
        // Less gas means more sulfur: the quality ceiling cuts the low end.
        let derived = derive_flow_bounds(&furnace(-1.863e-6), 1e-10);
        let expected_lower = 17000.0 + (0.025 - 0.014) / -1.863e-6;
        assert!((derived.bounds.lower - expected_lower).abs() < 1e-6);
        assert_eq!(derived.bounds.upper, 20000.0);
        assert!(!derived.degenerate);
    }

    #[test]
    fn test_positive_sensitivity_lowers_upper_bound() {
        let derived = derive_flow_bounds(&furnace(5e-6), 1e-10);
        assert!((derived.bounds.lower - 14200.0).abs() < 1e-6);
        assert!((derived.bounds.upper - 19200.0).abs() < 1e-6);
    }

    #[test]
    fn test_wide_band_keeps_physical_range() {
        let derived = derive_flow_bounds(&furnace(-1e-9), 1e-10);
        assert_eq!(derived.bounds, FlowBounds::new(10000.0, 20000.0));
        assert!(!derived.degenerate);
    }

    #[test]
    fn test_zero_sensitivity_is_degenerate() {
        let derived = derive_flow_bounds(&furnace(0.0), 1e-10);
        assert!(derived.degenerate);
        assert_eq!(derived.bounds, FlowBounds::new(10000.0, 20000.0));
    }

    #[test]
    fn test_sensitivity_below_threshold_is_degenerate() {
        let derived = derive_flow_bounds(&furnace(5e-11), 1e-10);
        assert!(derived.degenerate);

        let derived = derive_flow_bounds(&furnace(5e-11), 1e-11);
        assert!(!derived.degenerate);
    }

    #[test]
    fn test_cross_term_contributes() {
        let unit = UnitSpec {
            output_per_flow: 0.002,
            quality_per_output: -0.001,
            ..furnace(0.0)
        };
        // Sensitivity comes only from the output cross term: -2e-6.
        let derived = derive_flow_bounds(&unit, 1e-10);
        assert!(!derived.degenerate);
        let expected_lower: f64 = 17000.0 + (0.025 - 0.014) / -2e-6;
        assert!((derived.bounds.lower - expected_lower.max(10000.0)).abs() < 1e-6);
    }

    #[test]
    fn test_narrow_band_outside_range_is_empty() {
        // Base quality above the band: flow must exceed 40000 to bring it
        // down, while the furnace tops out at 20000.
        let unit = UnitSpec {
            quality_base: 0.024,
            quality_min: 0.0,
            quality_max: 0.021,
            flow_base: 10000.0,
            quality_per_flow: -1e-7,
            ..furnace(0.0)
        };
        let derived = derive_flow_bounds(&unit, 1e-10);
        assert!(derived.bounds.is_empty());
    }

    #[test]
    fn test_clamp() {
        let b = FlowBounds::new(1.0, 2.0);
        assert_eq!(b.clamp(0.5), 1.0);
        assert_eq!(b.clamp(1.5), 1.5);
        assert_eq!(b.clamp(2.0000001), 2.0);

        let empty = FlowBounds::new(2.0, 1.0);
        assert_eq!(empty.clamp(5.0), 5.0);
    }
}
