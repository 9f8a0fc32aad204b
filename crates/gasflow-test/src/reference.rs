//! The reference blast-furnace shop.
//!
//! Eight furnaces, each allowed 10 000 to 20 000 units of gas and a sulfur
//! content between 0 and 0.025. The shop is feasible; its optimum pushes
//! total gas to the 120 000 cap.

use gasflow_core::{ProblemInstance, ShopSpec, UnitSpec};

const FLOW_BASE: [f64; 8] = [
    15000.0, 17000.0, 11000.0, 13000.0, 12000.0, 15000.0, 17000.0, 14000.0,
];
const SECONDARY_BASE: [f64; 8] = [64.25, 66.76, 56.08, 49.78, 62.92, 60.02, 81.68, 69.7];
const EQUIVALENCE: [f64; 8] = [0.59, 0.53, 0.85, 0.59, 0.75, 0.79, 0.87, 0.77];
const OUTPUT_BASE: [f64; 8] = [146.4, 136.4, 134.30, 122.3, 138.2, 138.8, 191.4, 151.6];
const QUALITY_BASE: [f64; 8] = [0.015, 0.014, 0.013, 0.014, 0.017, 0.016, 0.013, 0.014];
const OUTPUT_PER_FLOW: [f64; 8] = [
    -0.0007295, -0.0006695, 0.00, -0.00072373, -0.0007724, -0.0006872, -0.0007284, -0.0007305,
];
const OUTPUT_PER_SECONDARY: [f64; 8] = [
    -0.002970, -0.002970, -0.002928, -0.002897, -0.002970, -0.002970, -0.003316, -0.00356,
];
const QUALITY_PER_FLOW: [f64; 8] = [
    -0.0000034, -0.0000034, -0.0000035, -0.0000033, -0.0000034, -0.0000034, -0.0000034,
    -0.0000034,
];
const QUALITY_PER_SECONDARY: [f64; 8] = [
    -0.0000030, -0.0000029, -0.0000032, -0.0000029, -0.0000031, -0.0000028, -0.0000030,
    -0.0000031,
];

/// Prices, caps and output requirement of the reference shop.
pub fn reference_shop() -> ShopSpec {
    ShopSpec::new(1.8, 0.6, 120000.0, 520.0, 1100.0)
}

/// The eight reference furnaces in order.
pub fn reference_units() -> Vec<UnitSpec> {
    (0..FLOW_BASE.len())
        .map(|i| UnitSpec {
            flow_base: FLOW_BASE[i],
            flow_min: 10000.0,
            flow_max: 20000.0,
            secondary_base: SECONDARY_BASE[i],
            equivalence: EQUIVALENCE[i],
            output_base: OUTPUT_BASE[i],
            quality_base: QUALITY_BASE[i],
            quality_min: 0.0,
            quality_max: 0.025,
            output_per_flow: OUTPUT_PER_FLOW[i],
            output_per_secondary: OUTPUT_PER_SECONDARY[i],
            quality_per_flow: QUALITY_PER_FLOW[i],
            quality_per_secondary: QUALITY_PER_SECONDARY[i],
            quality_per_output: 0.0,
        })
        .collect()
}

/// The reference shop with its furnaces.
pub fn reference_instance() -> ProblemInstance {
    ProblemInstance::new(reference_shop(), reference_units())
}

/// The reference shop asked for far more output than it can make.
pub fn unreachable_output() -> ProblemInstance {
    reference_instance().with_required_output(5000.0)
}

/// The reference shop with furnace `index` made insensitive to gas flow in
/// quality.
///
/// # Panics
///
/// Panics if `index` is not a furnace of the reference shop.
pub fn with_flat_quality_unit(index: usize) -> ProblemInstance {
    let mut problem = reference_instance();
    let unit = &mut problem.units[index];
    unit.quality_per_flow = 0.0;
    unit.quality_per_secondary = 0.0;
    unit.quality_per_output = 0.0;
    problem
}

/// One furnace pinned at its base flow, with generous shop limits.
pub fn single_fixed_unit() -> ProblemInstance {
    let unit = UnitSpec {
        secondary_base: 60.0,
        equivalence: 0.6,
        output_base: 140.0,
        quality_base: 0.015,
        quality_min: 0.0,
        quality_max: 0.025,
        output_per_flow: -0.0007,
        output_per_secondary: -0.003,
        quality_per_flow: -0.0000034,
        quality_per_secondary: -0.000003,
        ..UnitSpec::fixed(15000.0)
    };
    ProblemInstance::new(ShopSpec::new(1.8, 0.6, 20000.0, 100.0, 100.0), vec![unit])
}
