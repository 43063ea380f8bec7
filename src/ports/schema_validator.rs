//! Schema Validator Port - structural validation of completion payloads.
//!
//! The model is asked for strict JSON but nothing guarantees it complies;
//! every completion is parsed and checked against the reply shape before it
//! is returned to the client. Validation failures are never repaired or
//! retried, they surface as server errors.

use serde_json::Value;

/// Port for validating an untyped completion payload against the
/// [`crate::domain::chat::ChatResponse`] shape.
pub trait ChatResponseValidator: Send + Sync {
    /// Checks field presence, field types, enum membership, and value
    /// ranges. Returns the first violation found.
    fn validate(&self, payload: &Value) -> Result<(), SchemaValidationError>;
}

/// Structural validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaValidationError {
    /// A required field is absent.
    #[error("missing required field: {field}")]
    MissingRequired { field: String },

    /// A field holds a value of the wrong JSON type.
    #[error("invalid type for {field}: expected {expected}, got {actual}")]
    InvalidType {
        field: String,
        expected: String,
        actual: String,
    },

    /// A field holds a value outside its enumerated set.
    #[error("{field} must be one of {allowed}, got '{actual}'")]
    InvalidValue {
        field: String,
        allowed: String,
        actual: String,
    },

    /// A numeric field is outside its permitted range.
    #[error("{field} out of range: {value} not in [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: String,
        min: String,
        max: String,
    },

    /// An array holds more items than the shape permits.
    #[error("{field} has too many items: at most {max}, got {actual}")]
    ArrayTooLong {
        field: String,
        max: usize,
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_display_field_context() {
        let err = SchemaValidationError::MissingRequired {
            field: "summary".to_string(),
        };
        assert_eq!(err.to_string(), "missing required field: summary");

        let err = SchemaValidationError::OutOfRange {
            field: "confidence".to_string(),
            value: "1.5".to_string(),
            min: "0".to_string(),
            max: "1".to_string(),
        };
        assert_eq!(err.to_string(), "confidence out of range: 1.5 not in [0, 1]");

        let err = SchemaValidationError::ArrayTooLong {
            field: "actions".to_string(),
            max: 3,
            actual: 5,
        };
        assert_eq!(err.to_string(), "actions has too many items: at most 3, got 5");
    }
}
