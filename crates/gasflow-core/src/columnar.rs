//! Column-oriented request payload.
//!
//! Service clients send one array per furnace field plus an explicit
//! furnace count. [`ParameterArrays`] mirrors that layout and converts into
//! a [`ProblemInstance`] once every array has the declared length.

use crate::error::ValidationError;
use crate::model::{ProblemInstance, ShopSpec, UnitSpec};
use crate::validate::MAX_UNITS;

/// Shop scalars plus one array per furnace field.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParameterArrays {
    pub primary_cost: f64,
    pub secondary_cost: f64,
    pub primary_cap: f64,
    pub secondary_cap: f64,
    pub required_output: f64,
    #[cfg_attr(feature = "serde", serde(default = "default_weight"))]
    pub weight: f64,
    /// Declared number of furnaces.
    pub unit_count: usize,
    pub flow_base: Vec<f64>,
    pub flow_min: Vec<f64>,
    pub flow_max: Vec<f64>,
    pub secondary_base: Vec<f64>,
    pub equivalence: Vec<f64>,
    pub output_base: Vec<f64>,
    pub quality_base: Vec<f64>,
    pub quality_min: Vec<f64>,
    pub quality_max: Vec<f64>,
    pub output_per_flow: Vec<f64>,
    pub output_per_secondary: Vec<f64>,
    pub quality_per_flow: Vec<f64>,
    pub quality_per_secondary: Vec<f64>,
    pub quality_per_output: Vec<f64>,
}

#[cfg(feature = "serde")]
fn default_weight() -> f64 {
    crate::model::DEFAULT_WEIGHT
}

impl ParameterArrays {
    fn columns(&self) -> [(&'static str, &[f64]); 14] {
        [
            ("flow_base", self.flow_base.as_slice()),
            ("flow_min", self.flow_min.as_slice()),
            ("flow_max", self.flow_max.as_slice()),
            ("secondary_base", self.secondary_base.as_slice()),
            ("equivalence", self.equivalence.as_slice()),
            ("output_base", self.output_base.as_slice()),
            ("quality_base", self.quality_base.as_slice()),
            ("quality_min", self.quality_min.as_slice()),
            ("quality_max", self.quality_max.as_slice()),
            ("output_per_flow", self.output_per_flow.as_slice()),
            ("output_per_secondary", self.output_per_secondary.as_slice()),
            ("quality_per_flow", self.quality_per_flow.as_slice()),
            ("quality_per_secondary", self.quality_per_secondary.as_slice()),
            ("quality_per_output", self.quality_per_output.as_slice()),
        ]
    }

    /// Checks the furnace count and array lengths, then regroups the
    /// columns into per-furnace records.
    ///
    /// Value-level checks are left to [`ProblemInstance::validate`].
    pub fn into_instance(self) -> Result<ProblemInstance, ValidationError> {
        let n = self.unit_count;
        if n == 0 || n > MAX_UNITS {
            return Err(ValidationError::UnitCount {
                count: n,
                max: MAX_UNITS,
            });
        }
        for (field, column) in self.columns() {
            if column.len() != n {
                return Err(ValidationError::Length {
                    field,
                    expected: n,
                    actual: column.len(),
                });
            }
        }

        let units = (0..n)
            .map(|i| UnitSpec {
                flow_base: self.flow_base[i],
                flow_min: self.flow_min[i],
                flow_max: self.flow_max[i],
                secondary_base: self.secondary_base[i],
                equivalence: self.equivalence[i],
                output_base: self.output_base[i],
                quality_base: self.quality_base[i],
                quality_min: self.quality_min[i],
                quality_max: self.quality_max[i],
                output_per_flow: self.output_per_flow[i],
                output_per_secondary: self.output_per_secondary[i],
                quality_per_flow: self.quality_per_flow[i],
                quality_per_secondary: self.quality_per_secondary[i],
                quality_per_output: self.quality_per_output[i],
            })
            .collect();

        let shop = ShopSpec {
            primary_cost: self.primary_cost,
            secondary_cost: self.secondary_cost,
            primary_cap: self.primary_cap,
            secondary_cap: self.secondary_cap,
            required_output: self.required_output,
            weight: self.weight,
        };
        Ok(ProblemInstance::new(shop, units))
    }
}

impl TryFrom<ParameterArrays> for ProblemInstance {
    type Error = ValidationError;

    fn try_from(arrays: ParameterArrays) -> Result<Self, Self::Error> {
        arrays.into_instance()
    }
}

impl From<&ProblemInstance> for ParameterArrays {
    fn from(problem: &ProblemInstance) -> Self {
        let column = |f: fn(&UnitSpec) -> f64| problem.units.iter().map(f).collect::<Vec<_>>();
        Self {
            primary_cost: problem.shop.primary_cost,
            secondary_cost: problem.shop.secondary_cost,
            primary_cap: problem.shop.primary_cap,
            secondary_cap: problem.shop.secondary_cap,
            required_output: problem.shop.required_output,
            weight: problem.shop.weight,
            unit_count: problem.unit_count(),
            flow_base: column(|u| u.flow_base),
            flow_min: column(|u| u.flow_min),
            flow_max: column(|u| u.flow_max),
            secondary_base: column(|u| u.secondary_base),
            equivalence: column(|u| u.equivalence),
            output_base: column(|u| u.output_base),
            quality_base: column(|u| u.quality_base),
            quality_min: column(|u| u.quality_min),
            quality_max: column(|u| u.quality_max),
            output_per_flow: column(|u| u.output_per_flow),
            output_per_secondary: column(|u| u.output_per_secondary),
            quality_per_flow: column(|u| u.quality_per_flow),
            quality_per_secondary: column(|u| u.quality_per_secondary),
            quality_per_output: column(|u| u.quality_per_output),
        }
    }
}
