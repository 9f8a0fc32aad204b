//! Problem description: the shop, its furnaces, and their linearization.
//!
//! Every physical relationship is a first-order sensitivity around the base
//! operating point of a furnace (`flow_base`, `secondary_base`,
//! `output_base`, `quality_base`).

/// One furnace and its linearized response to a change in gas flow.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitSpec {
    /// Base primary-resource (gas) flow.
    pub flow_base: f64,
    /// Lowest admissible gas flow.
    pub flow_min: f64,
    /// Highest admissible gas flow.
    pub flow_max: f64,
    /// Base secondary-resource (coke) consumption.
    pub secondary_base: f64,
    /// Secondary resource displaced per unit of gas flow.
    pub equivalence: f64,
    /// Base output (hot metal production).
    pub output_base: f64,
    /// Base quality metric (sulfur content).
    pub quality_base: f64,
    /// Lowest admissible quality metric.
    pub quality_min: f64,
    /// Highest admissible quality metric.
    pub quality_max: f64,
    /// Output sensitivity to gas flow.
    pub output_per_flow: f64,
    /// Output sensitivity to secondary resource.
    pub output_per_secondary: f64,
    /// Quality sensitivity to gas flow.
    pub quality_per_flow: f64,
    /// Quality sensitivity to secondary resource.
    pub quality_per_secondary: f64,
    /// Quality sensitivity to output.
    pub quality_per_output: f64,
}

impl UnitSpec {
    /// Net output change per unit of gas flow once the displaced secondary
    /// resource is accounted for.
    ///
    /// # Example
    ///
    /// ```
    /// use gasflow_core::UnitSpec;
    ///
    /// let unit = UnitSpec {
    ///     equivalence: 0.5,
    ///     output_per_flow: -0.001,
    ///     output_per_secondary: -0.004,
    ///     ..UnitSpec::fixed(100.0)
    /// };
    /// assert!((unit.output_gain() - 0.001).abs() < 1e-12);
    /// ```
    pub fn output_gain(&self) -> f64 {
        self.output_per_flow - self.equivalence * self.output_per_secondary
    }

    /// Direct quality change per unit of gas flow, without the
    /// quality-vs-output cross term.
    pub fn quality_gain(&self) -> f64 {
        self.quality_per_flow - self.equivalence * self.quality_per_secondary
    }

    /// Full quality change per unit of gas flow, including the effect of
    /// the output change on quality.
    pub fn quality_sensitivity(&self) -> f64 {
        self.quality_gain() + self.output_gain() * self.quality_per_output
    }

    /// A furnace pinned at `flow` with every sensitivity zero.
    ///
    /// Useful as a base for struct-update syntax.
    pub fn fixed(flow: f64) -> Self {
        Self {
            flow_base: flow,
            flow_min: flow,
            flow_max: flow,
            secondary_base: 0.0,
            equivalence: 0.0,
            output_base: 0.0,
            quality_base: 0.0,
            quality_min: 0.0,
            quality_max: 0.0,
            output_per_flow: 0.0,
            output_per_secondary: 0.0,
            quality_per_flow: 0.0,
            quality_per_secondary: 0.0,
            quality_per_output: 0.0,
        }
    }
}

/// Shop-wide prices, limits, and the output requirement.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShopSpec {
    /// Cost term scaled by `equivalence` in the objective (price of the
    /// displaced coke, per kg).
    pub primary_cost: f64,
    /// Cost term charged per unit of gas flow in the objective.
    pub secondary_cost: f64,
    /// Shop-wide gas flow limit.
    pub primary_cap: f64,
    /// Shop-wide secondary-resource limit.
    pub secondary_cap: f64,
    /// Required aggregate output.
    pub required_output: f64,
    /// Weight of the output term relative to the cost term.
    #[cfg_attr(feature = "serde", serde(default = "default_weight"))]
    pub weight: f64,
}

/// Default weight balancing cost and output in the objective.
pub const DEFAULT_WEIGHT: f64 = 1.0;

#[cfg(feature = "serde")]
fn default_weight() -> f64 {
    DEFAULT_WEIGHT
}

impl ShopSpec {
    /// Creates a shop with the default objective weight.
    pub fn new(
        primary_cost: f64,
        secondary_cost: f64,
        primary_cap: f64,
        secondary_cap: f64,
        required_output: f64,
    ) -> Self {
        Self {
            primary_cost,
            secondary_cost,
            primary_cap,
            secondary_cap,
            required_output,
            weight: DEFAULT_WEIGHT,
        }
    }

    /// Sets the objective weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

/// A complete allocation request: one shop and its furnaces in order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProblemInstance {
    pub shop: ShopSpec,
    pub units: Vec<UnitSpec>,
}

impl ProblemInstance {
    pub fn new(shop: ShopSpec, units: Vec<UnitSpec>) -> Self {
        Self { shop, units }
    }

    /// Number of furnaces.
    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Returns a copy with a different output requirement.
    pub fn with_required_output(mut self, required_output: f64) -> Self {
        self.shop.required_output = required_output;
        self
    }

    /// Sum of `f` over all furnaces.
    pub fn sum_by(&self, f: impl Fn(&UnitSpec) -> f64) -> f64 {
        self.units.iter().map(f).sum()
    }
}
