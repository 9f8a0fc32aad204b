//! Request validation performed before a problem reaches the solver.
//!
//! The allocation model assumes consistent input; this module is the gate
//! that guarantees it. Checks stop at the first violation.

use crate::error::ValidationError;
use crate::model::{ProblemInstance, ShopSpec, UnitSpec};

/// Largest number of furnaces accepted in one request.
pub const MAX_UNITS: usize = 20;

impl ProblemInstance {
    /// Checks the request against the invariants the allocation model
    /// relies on.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule: furnace count outside
    /// `1..=MAX_UNITS`, a non-finite or negative shop scalar, a non-finite
    /// furnace field, or a base flow or base quality outside its range.
    ///
    /// # Example
    ///
    /// ```
    /// use gasflow_core::{ProblemInstance, ShopSpec, UnitSpec, ValidationError};
    ///
    /// let shop = ShopSpec::new(1.8, 0.6, 100.0, 10.0, 0.0);
    /// let unit = UnitSpec { flow_min: 60.0, ..UnitSpec::fixed(50.0) };
    ///
    /// let problem = ProblemInstance::new(shop, vec![unit]);
    /// assert_eq!(problem.validate(), Err(ValidationError::FlowRange { unit: 0 }));
    /// ```
    pub fn validate(&self) -> Result<(), ValidationError> {
        let count = self.unit_count();
        if count == 0 || count > MAX_UNITS {
            return Err(ValidationError::UnitCount {
                count,
                max: MAX_UNITS,
            });
        }

        validate_shop(&self.shop)?;
        for (index, unit) in self.units.iter().enumerate() {
            validate_unit(index, unit)?;
        }
        Ok(())
    }
}

fn validate_shop(shop: &ShopSpec) -> Result<(), ValidationError> {
    let fields = [
        ("primary_cost", shop.primary_cost),
        ("secondary_cost", shop.secondary_cost),
        ("primary_cap", shop.primary_cap),
        ("secondary_cap", shop.secondary_cap),
        ("required_output", shop.required_output),
        ("weight", shop.weight),
    ];
    for (field, value) in fields {
        if !value.is_finite() {
            return Err(ValidationError::NotFinite { field, unit: None });
        }
        if value < 0.0 {
            return Err(ValidationError::Negative { field });
        }
    }
    Ok(())
}

fn validate_unit(index: usize, unit: &UnitSpec) -> Result<(), ValidationError> {
    let fields = [
        ("flow_base", unit.flow_base),
        ("flow_min", unit.flow_min),
        ("flow_max", unit.flow_max),
        ("secondary_base", unit.secondary_base),
        ("equivalence", unit.equivalence),
        ("output_base", unit.output_base),
        ("quality_base", unit.quality_base),
        ("quality_min", unit.quality_min),
        ("quality_max", unit.quality_max),
        ("output_per_flow", unit.output_per_flow),
        ("output_per_secondary", unit.output_per_secondary),
        ("quality_per_flow", unit.quality_per_flow),
        ("quality_per_secondary", unit.quality_per_secondary),
        ("quality_per_output", unit.quality_per_output),
    ];
    if let Some(&(field, _)) = fields.iter().find(|(_, value)| !value.is_finite()) {
        return Err(ValidationError::NotFinite {
            field,
            unit: Some(index),
        });
    }

    if unit.flow_min > unit.flow_max {
        return Err(ValidationError::FlowRange { unit: index });
    }
    if !(unit.flow_min..=unit.flow_max).contains(&unit.flow_base) {
        return Err(ValidationError::FlowBase { unit: index });
    }
    if unit.quality_min > unit.quality_max {
        return Err(ValidationError::QualityRange { unit: index });
    }
    if !(unit.quality_min..=unit.quality_max).contains(&unit.quality_base) {
        return Err(ValidationError::QualityBase { unit: index });
    }
    Ok(())
}
