//! Builder for one-off furnaces.

use gasflow_core::UnitSpec;

/// Builds a [`UnitSpec`] starting from a furnace pinned at its base flow.
///
/// ```
/// use gasflow_test::UnitBuilder;
///
/// let unit = UnitBuilder::at(100.0)
///     .flow_range(50.0, 150.0)
///     .output(10.0, 0.01)
///     .build();
/// assert_eq!(unit.flow_min, 50.0);
/// assert_eq!(unit.output_per_flow, 0.01);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct UnitBuilder {
    unit: UnitSpec,
}

impl UnitBuilder {
    /// Starts from a furnace at `flow` with every sensitivity zero and a
    /// quality band of `[0, 1]`.
    pub fn at(flow: f64) -> Self {
        Self {
            unit: UnitSpec {
                quality_max: 1.0,
                ..UnitSpec::fixed(flow)
            },
        }
    }

    pub fn flow_range(mut self, min: f64, max: f64) -> Self {
        self.unit.flow_min = min;
        self.unit.flow_max = max;
        self
    }

    /// Base secondary consumption and gas-to-secondary equivalence.
    pub fn secondary(mut self, base: f64, equivalence: f64) -> Self {
        self.unit.secondary_base = base;
        self.unit.equivalence = equivalence;
        self
    }

    /// Base output and its sensitivity to gas flow.
    pub fn output(mut self, base: f64, per_flow: f64) -> Self {
        self.unit.output_base = base;
        self.unit.output_per_flow = per_flow;
        self
    }

    pub fn output_per_secondary(mut self, sensitivity: f64) -> Self {
        self.unit.output_per_secondary = sensitivity;
        self
    }

    /// Base quality, admissible band and sensitivity to gas flow.
    pub fn quality(mut self, base: f64, min: f64, max: f64, per_flow: f64) -> Self {
        self.unit.quality_base = base;
        self.unit.quality_min = min;
        self.unit.quality_max = max;
        self.unit.quality_per_flow = per_flow;
        self
    }

    pub fn quality_per_output(mut self, sensitivity: f64) -> Self {
        self.unit.quality_per_output = sensitivity;
        self
    }

    pub fn build(self) -> UnitSpec {
        self.unit
    }
}
