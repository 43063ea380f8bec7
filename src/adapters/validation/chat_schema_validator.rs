//! Chat Schema Validator - implementation of ChatResponseValidator.
//!
//! Manual validation of completion payloads against the reply shape. No
//! external schema-validation dependency; the shape is small and fixed.
//!
//! The checks cover the overall type schema only: field presence, JSON
//! types, enum membership, the confidence range, and the array bounds.
//! Phase-specific cardinality (empty lists during exploration, 1-3 actions
//! and one evidence item during guidance) is requested via prompt text and
//! deliberately not enforced here.

use serde_json::Value;

use crate::ports::{ChatResponseValidator, SchemaValidationError};

const INTENTS: [&str; 4] = ["self-care", "refer", "escalate", "out-of-scope"];
const ACTION_TYPES: [&str; 3] = ["self-care", "seek-professional", "information"];
const EVIDENCE_SOURCES: [&str; 3] = ["WHO", "NHS", "APA"];

const MAX_ACTIONS: usize = 3;
const MAX_EVIDENCE: usize = 1;

/// Validator for the chat reply shape.
///
/// Stateless and `Send + Sync`; a single instance is shared across requests.
pub struct ChatSchemaValidator;

impl Default for ChatSchemaValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSchemaValidator {
    /// Creates a new validator.
    pub fn new() -> Self {
        Self
    }

    fn validate_action(&self, value: &Value, path: &str) -> Result<(), SchemaValidationError> {
        let obj = require_object(value, path)?;
        require_enum_field(obj, "type", &ACTION_TYPES, path)?;
        require_string_field(obj, "text", path)?;
        Ok(())
    }

    fn validate_evidence(&self, value: &Value, path: &str) -> Result<(), SchemaValidationError> {
        let obj = require_object(value, path)?;
        require_string_field(obj, "title", path)?;
        require_enum_field(obj, "source", &EVIDENCE_SOURCES, path)?;
        require_string_field(obj, "link", path)?;
        Ok(())
    }

    fn validate_confidence(
        &self,
        obj: &serde_json::Map<String, Value>,
    ) -> Result<(), SchemaValidationError> {
        require_field(obj, "confidence", "root")?;
        let value = &obj["confidence"];
        let number = value.as_f64().ok_or_else(|| SchemaValidationError::InvalidType {
            field: "confidence".to_string(),
            expected: "number".to_string(),
            actual: type_name(value),
        })?;

        if !(0.0..=1.0).contains(&number) {
            return Err(SchemaValidationError::OutOfRange {
                field: "confidence".to_string(),
                value: number.to_string(),
                min: "0".to_string(),
                max: "1".to_string(),
            });
        }
        Ok(())
    }
}

impl ChatResponseValidator for ChatSchemaValidator {
    fn validate(&self, payload: &Value) -> Result<(), SchemaValidationError> {
        let obj = require_object(payload, "root")?;

        require_enum_field(obj, "intent", &INTENTS, "root")?;
        require_string_field(obj, "summary", "root")?;
        self.validate_confidence(obj)?;

        let actions = require_array_field(obj, "actions", MAX_ACTIONS, "root")?;
        for (i, action) in actions.iter().enumerate() {
            self.validate_action(action, &format!("actions[{}]", i))?;
        }

        let evidence = require_array_field(obj, "evidence", MAX_EVIDENCE, "root")?;
        for (i, item) in evidence.iter().enumerate() {
            self.validate_evidence(item, &format!("evidence[{}]", i))?;
        }

        Ok(())
    }
}

// =========================================================================
// Helpers
// =========================================================================

fn require_object<'a>(
    value: &'a Value,
    path: &str,
) -> Result<&'a serde_json::Map<String, Value>, SchemaValidationError> {
    value.as_object().ok_or_else(|| SchemaValidationError::InvalidType {
        field: path.to_string(),
        expected: "object".to_string(),
        actual: type_name(value),
    })
}

fn require_field(
    obj: &serde_json::Map<String, Value>,
    field: &str,
    parent: &str,
) -> Result<(), SchemaValidationError> {
    if obj.contains_key(field) {
        Ok(())
    } else {
        Err(SchemaValidationError::MissingRequired {
            field: qualify(parent, field),
        })
    }
}

fn require_string_field(
    obj: &serde_json::Map<String, Value>,
    field: &str,
    parent: &str,
) -> Result<(), SchemaValidationError> {
    require_field(obj, field, parent)?;
    let value = &obj[field];
    if value.is_string() {
        Ok(())
    } else {
        Err(SchemaValidationError::InvalidType {
            field: qualify(parent, field),
            expected: "string".to_string(),
            actual: type_name(value),
        })
    }
}

fn require_enum_field(
    obj: &serde_json::Map<String, Value>,
    field: &str,
    allowed: &[&str],
    parent: &str,
) -> Result<(), SchemaValidationError> {
    require_string_field(obj, field, parent)?;
    let value = obj[field].as_str().unwrap_or_default();
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(SchemaValidationError::InvalidValue {
            field: qualify(parent, field),
            allowed: format!("{:?}", allowed),
            actual: value.to_string(),
        })
    }
}

fn require_array_field<'a>(
    obj: &'a serde_json::Map<String, Value>,
    field: &str,
    max_items: usize,
    parent: &str,
) -> Result<&'a Vec<Value>, SchemaValidationError> {
    require_field(obj, field, parent)?;
    let value = &obj[field];
    let array = value.as_array().ok_or_else(|| SchemaValidationError::InvalidType {
        field: qualify(parent, field),
        expected: "array".to_string(),
        actual: type_name(value),
    })?;

    if array.len() > max_items {
        return Err(SchemaValidationError::ArrayTooLong {
            field: qualify(parent, field),
            max: max_items,
            actual: array.len(),
        });
    }
    Ok(array)
}

fn qualify(parent: &str, field: &str) -> String {
    if parent == "root" {
        field.to_string()
    } else {
        format!("{}.{}", parent, field)
    }
}

fn type_name(value: &Value) -> String {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
    .to_string()
}
