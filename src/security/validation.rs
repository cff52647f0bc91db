//! Request Validation Module
//!
//! Field-level checks for incoming journal requests.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::config::LimitsConfig;

/// Validation error types
#[derive(Debug, Error, Clone, Serialize, Deserialize, PartialEq)]
pub enum ValidationError {
    #[error("Field '{field}' is too long (max: {max}, got: {got})")]
    TooLong {
        field: String,
        max: usize,
        got: usize,
    },

    #[error("Field '{field}' exceeds maximum value: max={max}, got={got}")]
    ExceedsMax { field: String, max: i64, got: i64 },

    #[error("Field '{field}' is below minimum value: min={min}, got={got}")]
    BelowMin { field: String, min: i64, got: i64 },
}

impl ValidationError {
    pub fn field(&self) -> &str {
        match self {
            Self::TooLong { field, .. } => field.as_str(),
            Self::ExceedsMax { field, .. } => field.as_str(),
            Self::BelowMin { field, .. } => field.as_str(),
        }
    }
}

/// Validation result type
pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// Request validation trait
pub trait Validatable {
    /// Validate the request data against the configured limits
    fn validate(&self, limits: &LimitsConfig) -> ValidationResult<()>;
}

/// Length is counted in characters, not bytes. A zero limit disables the check.
pub fn check_max_chars(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let got = value.chars().count();
    if max > 0 && got > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
            got,
        });
    }
    Ok(())
}

pub fn check_range(field: &str, value: i64, min: i64, max: i64) -> ValidationResult<()> {
    if value < min {
        return Err(ValidationError::BelowMin {
            field: field.to_string(),
            min,
            got: value,
        });
    }
    if value > max {
        return Err(ValidationError::ExceedsMax {
            field: field.to_string(),
            max,
            got: value,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_max_chars_counts_chars() {
        assert!(check_max_chars("text", "😊😊😊", 3).is_ok());
        let err = check_max_chars("text", "abcd", 3).unwrap_err();
        assert_eq!(err.field(), "text");
        assert_eq!(
            err,
            ValidationError::TooLong {
                field: "text".into(),
                max: 3,
                got: 4
            }
        );
    }

    #[test]
    fn test_zero_limit_disables_check() {
        assert!(check_max_chars("text", "anything at all", 0).is_ok());
    }

    #[test]
    fn test_check_range() {
        assert!(check_range("rating", 1, 1, 5).is_ok());
        assert!(check_range("rating", 5, 1, 5).is_ok());
        assert!(matches!(
            check_range("rating", 0, 1, 5),
            Err(ValidationError::BelowMin { .. })
        ));
        assert!(matches!(
            check_range("rating", 6, 1, 5),
            Err(ValidationError::ExceedsMax { .. })
        ));
    }
}
