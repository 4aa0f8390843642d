//! Field-format checks shared by the account and application flows.
//!
//! Every check is pure: it either hands back the accepted value or a
//! [`ValidationError`] whose message is shown to the user verbatim.

use thiserror::Error;

use crate::constants::limits::MOBILE_DIGITS;

/// A user-correctable input problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Mobile number must be exactly 10 digits.")]
    InvalidMobile,

    #[error("{field} must be a valid integer.")]
    NotAnInteger { field: String },

    #[error("{field} must be a positive number.")]
    NotPositive { field: String },

    #[error("{field} cannot be empty.")]
    Empty { field: String },

    #[error("{field} must be at most {max} characters.")]
    TooLong { field: String, max: usize },
}

pub fn validate_mobile(mobile: &str) -> Result<&str, ValidationError> {
    if mobile.len() != MOBILE_DIGITS || !mobile.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidMobile);
    }
    Ok(mobile)
}

/// Parses `value` as an integer and requires it to be greater than zero.
pub fn validate_positive_integer(value: &str, field: &str) -> Result<i32, ValidationError> {
    let parsed: i32 = value
        .parse()
        .map_err(|_| ValidationError::NotAnInteger {
            field: field.to_string(),
        })?;

    if parsed <= 0 {
        return Err(ValidationError::NotPositive {
            field: field.to_string(),
        });
    }

    Ok(parsed)
}

/// Rejects empty and all-whitespace values. Returns the trimmed value.
pub fn validate_non_empty<'a>(value: &'a str, field: &str) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty {
            field: field.to_string(),
        });
    }
    Ok(trimmed)
}

/// Rejects values longer than `max` characters.
pub fn validate_max_len<'a>(
    value: &'a str,
    field: &str,
    max: usize,
) -> Result<&'a str, ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }
    Ok(value)
}
