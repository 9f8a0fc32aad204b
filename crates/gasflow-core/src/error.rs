//! Error types for gasflow

use std::fmt;

use thiserror::Error;

use crate::allocation::AllocationStatus;

/// One of the three shop-wide constraints of the allocation model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateConstraint {
    /// Total gas flow stays within the shop limit.
    PrimaryCap,
    /// Secondary-resource consumption stays within the shop stock.
    SecondaryCap,
    /// Total output meets the requirement.
    RequiredOutput,
}

impl AggregateConstraint {
    pub const ALL: [AggregateConstraint; 3] = [
        AggregateConstraint::PrimaryCap,
        AggregateConstraint::SecondaryCap,
        AggregateConstraint::RequiredOutput,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AggregateConstraint::PrimaryCap => "primary_cap",
            AggregateConstraint::SecondaryCap => "secondary_cap",
            AggregateConstraint::RequiredOutput => "required_output",
        }
    }
}

impl fmt::Display for AggregateConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What made the allocation model infeasible.
#[derive(Debug, Clone, PartialEq)]
pub enum InfeasibilityCause {
    /// The quality band and the flow range of a furnace do not overlap.
    EmptyUnitDomain { unit: usize, lower: f64, upper: f64 },
    /// A single aggregate constraint cannot be met by any flow within the
    /// furnace domains.
    Constraint(AggregateConstraint),
    /// Every constraint can be met alone but not all together.
    Joint,
}

impl fmt::Display for InfeasibilityCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InfeasibilityCause::EmptyUnitDomain { unit, lower, upper } => write!(
                f,
                "furnace {} has no flow within its quality band ({} > {})",
                unit + 1,
                lower,
                upper
            ),
            InfeasibilityCause::Constraint(constraint) => {
                write!(f, "constraint {} cannot be satisfied", constraint)
            }
            InfeasibilityCause::Joint => f.write_str("constraints are jointly unsatisfiable"),
        }
    }
}

/// Failure of an allocation request.
#[derive(Debug, Error)]
pub enum AllocationError {
    /// The LP backend could not be instantiated.
    #[error("LP backend unavailable: {0}")]
    SolverUnavailable(String),

    /// No point satisfies the model.
    #[error("no optimal solution found ({backend_status}): {cause}")]
    Infeasible {
        backend_status: String,
        cause: InfeasibilityCause,
    },

    /// The backend stopped without an optimal basis or an infeasibility
    /// certificate.
    #[error("LP backend stopped without an optimal solution: {status}")]
    SolverFailed { status: String },
}

impl AllocationError {
    /// Status tag to report for this failure.
    pub fn status(&self) -> AllocationStatus {
        match self {
            AllocationError::Infeasible { .. } => AllocationStatus::Infeasible,
            AllocationError::SolverUnavailable(_) | AllocationError::SolverFailed { .. } => {
                AllocationStatus::SolverError
            }
        }
    }
}

/// Rejection of a request before it reaches the solver.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("furnace count must be between 1 and {max}, got {count}")]
    UnitCount { count: usize, max: usize },

    #[error("field {field} must contain exactly {expected} values (one per furnace), got {actual}")]
    Length {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("field {field} must be a finite number{}", unit_suffix(.unit))]
    NotFinite {
        field: &'static str,
        unit: Option<usize>,
    },

    #[error("field {field} must not be negative")]
    Negative { field: &'static str },

    #[error("minimum gas flow exceeds maximum (furnace {})", .unit + 1)]
    FlowRange { unit: usize },

    #[error("base gas flow is outside its admissible range (furnace {})", .unit + 1)]
    FlowBase { unit: usize },

    #[error("minimum quality exceeds maximum (furnace {})", .unit + 1)]
    QualityRange { unit: usize },

    #[error("base quality is outside its admissible range (furnace {})", .unit + 1)]
    QualityBase { unit: usize },
}

fn unit_suffix(unit: &Option<usize>) -> String {
    match unit {
        Some(unit) => format!(" (furnace {})", unit + 1),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        let infeasible = AllocationError::Infeasible {
            backend_status: "PrimalInfeasible".to_string(),
            cause: InfeasibilityCause::Joint,
        };
        assert_eq!(infeasible.status(), AllocationStatus::Infeasible);

        let unavailable = AllocationError::SolverUnavailable("no backend".to_string());
        assert_eq!(unavailable.status(), AllocationStatus::SolverError);

        let failed = AllocationError::SolverFailed {
            status: "MaxIterations".to_string(),
        };
        assert_eq!(failed.status(), AllocationStatus::SolverError);
    }

    #[test]
    fn test_infeasible_message_names_constraint() {
        let err = AllocationError::Infeasible {
            backend_status: "PrimalInfeasible".to_string(),
            cause: InfeasibilityCause::Constraint(AggregateConstraint::RequiredOutput),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("no optimal solution found"));
        assert!(msg.contains("required_output"));
    }

    #[test]
    fn test_empty_domain_message_is_one_based() {
        let cause = InfeasibilityCause::EmptyUnitDomain {
            unit: 2,
            lower: 5.0,
            upper: 4.0,
        };
        assert!(cause.to_string().starts_with("furnace 3 "));
    }

    #[test]
    fn test_validation_messages() {
        let err = ValidationError::FlowBase { unit: 0 };
        assert_eq!(
            err.to_string(),
            "base gas flow is outside its admissible range (furnace 1)"
        );

        let err = ValidationError::NotFinite {
            field: "primary_cap",
            unit: None,
        };
        assert_eq!(err.to_string(), "field primary_cap must be a finite number");
    }
}
