//! Validation Error Types

use std::fmt;
use thiserror::Error;

/// A single rejected field in a sensor reading
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Value out of allowed range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Field not part of the sensor schema
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// Field present but not a JSON number
    #[error("{field} must be a number, got {found}")]
    NotANumber {
        field: &'static str,
        found: &'static str,
    },

    /// Value is NaN or infinite
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    /// Invalid data format
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}

impl ValidationError {
    /// Name of the offending field, if the error is tied to one
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::OutOfRange { field, .. }
            | ValidationError::NotANumber { field, .. }
            | ValidationError::NotFinite { field } => Some(*field),
            ValidationError::MissingField(field) => Some(*field),
            ValidationError::UnknownField(field) => Some(field.as_str()),
            ValidationError::InvalidFormat(_) => None,
        }
    }
}

/// Every failure found while validating one reading
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub(crate) fn new(errors: Vec<ValidationError>) -> Self {
        Self(errors)
    }

    /// Individual field errors, in schema order
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    /// Number of rejected fields
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether any error refers to `field`
    pub fn mentions(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field() == Some(field))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation error(s)", self.0.len())?;
        for (i, err) in self.0.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{}{}", sep, err)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationError> for ValidationErrors {
    fn from(err: ValidationError) -> Self {
        Self(vec![err])
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
