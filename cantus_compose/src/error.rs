// Construction-time validation errors.
//
// Every constructor in the tree checks its own invariants and returns
// `ValidationError` on failure. Once a node exists it is valid, so the
// compose pass has no error channel at all.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must not be negative (got {value})")]
    NegativeDuration { field: &'static str, value: f64 },
    #[error("{field} must be a finite number (got {value})")]
    NonFiniteValue { field: &'static str, value: f64 },
    #[error("tempo must be greater than zero (got {0})")]
    InvalidTempo(f64),
    #[error("layer has {melodies} melodies but {dynamics} dynamics values")]
    DynamicsMismatch { melodies: usize, dynamics: usize },
    #[error("dynamic must be within 0.0..=1.0 (got {0})")]
    DynamicOutOfRange(f64),
    #[error("scale degree {0} is outside the chromatic range 0..12")]
    DegreeOutOfRange(i64),
    #[error("scale degree {0} appears more than once in the scale")]
    DuplicateDegree(u8),
    #[error("{0} name must not be empty")]
    EmptyName(&'static str),
    #[error("a melody scale must contain at least one degree")]
    EmptyScale,
}

/// Check that a duration-like value is finite and non-negative.
pub(crate) fn check_duration(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    check_finite(field, value)?;
    if value < 0.0 {
        return Err(ValidationError::NegativeDuration { field, value });
    }
    Ok(value)
}

pub(crate) fn check_finite(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field, value });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_rules() {
        assert_eq!(check_duration("duration", 0.0), Ok(0.0));
        assert_eq!(check_duration("duration", 2.5), Ok(2.5));
        assert_eq!(
            check_duration("duration", -1.0),
            Err(ValidationError::NegativeDuration { field: "duration", value: -1.0 })
        );
        assert!(matches!(
            check_duration("duration", f64::NAN),
            Err(ValidationError::NonFiniteValue { field: "duration", .. })
        ));
        assert!(matches!(
            check_duration("duration", f64::INFINITY),
            Err(ValidationError::NonFiniteValue { .. })
        ));
    }

    #[test]
    fn messages_name_the_problem() {
        let err = ValidationError::DynamicsMismatch { melodies: 2, dynamics: 3 };
        assert_eq!(err.to_string(), "layer has 2 melodies but 3 dynamics values");
        assert_eq!(
            ValidationError::EmptyName("instrument").to_string(),
            "instrument name must not be empty"
        );
    }
}
