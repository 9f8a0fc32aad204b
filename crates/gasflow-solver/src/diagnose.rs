//! Explains why an allocation model has no feasible point.
//!
//! Checks run from the most local to the most global: a single furnace with
//! an empty domain, then each aggregate constraint over the box of furnace
//! domains, and finally the joint case.

use gasflow_core::{AggregateConstraint, InfeasibilityCause};

use crate::lp::LinearConstraint;
use crate::model::AllocationModel;

/// Absolute slack allowed before a constraint range counts as unreachable.
const REACH_TOLERANCE: f64 = 1e-7;

/// Range of `constraint`'s left-hand side over the box `bounds`.
pub fn attainable_range(constraint: &LinearConstraint, bounds: &[(f64, f64)]) -> (f64, f64) {
    constraint
        .coefficients
        .iter()
        .zip(bounds)
        .fold((0.0, 0.0), |(min, max), (&a, &(lower, upper))| {
            let (at_lower, at_upper) = (a * lower, a * upper);
            (min + at_lower.min(at_upper), max + at_lower.max(at_upper))
        })
}

fn reachable(constraint: &LinearConstraint, bounds: &[(f64, f64)]) -> bool {
    let (min, max) = attainable_range(constraint, bounds);
    let scale = 1.0 + constraint.lower.abs().min(constraint.upper.abs());
    max >= constraint.lower - REACH_TOLERANCE * scale
        && min <= constraint.upper + REACH_TOLERANCE * scale
}

/// Most specific cause of infeasibility for `model`.
pub fn diagnose(model: &AllocationModel) -> InfeasibilityCause {
    if let Some((unit, derived)) = model
        .bounds
        .iter()
        .enumerate()
        .find(|(_, d)| d.bounds.is_empty())
    {
        return InfeasibilityCause::EmptyUnitDomain {
            unit,
            lower: derived.bounds.lower,
            upper: derived.bounds.upper,
        };
    }

    for (kind, constraint) in AggregateConstraint::ALL.iter().zip(&model.lp.constraints) {
        if !reachable(constraint, &model.lp.bounds) {
            return InfeasibilityCause::Constraint(*kind);
        }
    }

    InfeasibilityCause::Joint
}

#[cfg(test)]
mod tests {
    use super::*;
    use gasflow_config::AllocationConfig;
    use gasflow_core::{ProblemInstance, ShopSpec, UnitSpec};

    fn unit(flow_min: f64, flow_max: f64, output_per_flow: f64) -> UnitSpec {
        UnitSpec {
            flow_min,
            flow_max,
            output_base: 100.0,
            output_per_flow,
            ..UnitSpec::fixed(flow_min)
        }
    }

    fn model(shop: ShopSpec, units: Vec<UnitSpec>) -> AllocationModel {
        AllocationModel::build(&ProblemInstance::new(shop, units), &AllocationConfig::default())
    }

    #[test]
    fn test_attainable_range() {
        let c = LinearConstraint::at_most("c", vec![2.0, -1.0], 0.0);
        let (min, max) = attainable_range(&c, &[(0.0, 1.0), (1.0, 3.0)]);
        assert_eq!(min, -3.0);
        assert_eq!(max, 1.0);
    }

    #[test]
    fn test_primary_cap_below_minimum_flow() {
        let m = model(
            ShopSpec::new(1.0, 1.0, 15.0, 100.0, 0.0),
            vec![unit(10.0, 20.0, 0.0), unit(10.0, 20.0, 0.0)],
        );
        assert_eq!(
            diagnose(&m),
            InfeasibilityCause::Constraint(AggregateConstraint::PrimaryCap)
        );
    }

    #[test]
    fn test_required_output_out_of_reach() {
        // Best output: 200 + 0.01·10 at flow 20 on the first furnace.
        let m = model(
            ShopSpec::new(1.0, 1.0, 100.0, 100.0, 500.0),
            vec![unit(10.0, 20.0, 0.01), unit(10.0, 20.0, 0.0)],
        );
        assert_eq!(
            diagnose(&m),
            InfeasibilityCause::Constraint(AggregateConstraint::RequiredOutput)
        );
    }

    #[test]
    fn test_joint_infeasibility() {
        // Output needs flow 20 on the first furnace; the cap allows 25 total
        // but the second furnace needs at least 10.
        let m = model(
            ShopSpec::new(1.0, 1.0, 25.0, 100.0, 200.1),
            vec![unit(10.0, 20.0, 0.01), unit(10.0, 20.0, 0.0)],
        );
        assert_eq!(diagnose(&m), InfeasibilityCause::Joint);
    }

    #[test]
    fn test_empty_domain_wins() {
        let empty = UnitSpec {
            quality_base: 0.024,
            quality_max: 0.021,
            quality_per_flow: -1e-7,
            ..unit(10.0, 20.0, 0.0)
        };
        let m = model(
            ShopSpec::new(1.0, 1.0, 1.0, 100.0, 1e9),
            vec![unit(10.0, 20.0, 0.0), empty],
        );
        match diagnose(&m) {
            InfeasibilityCause::EmptyUnitDomain { unit, lower, upper } => {
                assert_eq!(unit, 1);
                assert!(lower > upper);
            }
            other => panic!("unexpected cause: {other:?}"),
        }
    }
}
