//! Validation adapters.

mod chat_schema_validator;

pub use chat_schema_validator::ChatSchemaValidator;
