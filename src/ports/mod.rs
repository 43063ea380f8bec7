//! Ports - interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between the
//! domain and the outside world. Adapters implement these ports.
//!
//! - `CompletionProvider` - the external text-generation API
//! - `ChatResponseValidator` - structural validation of completion payloads

mod completion_provider;
mod schema_validator;

pub use completion_provider::{
    CompletionError, CompletionProvider, CompletionRequest, CompletionResponse, Message,
    ProviderInfo,
};
pub use schema_validator::{ChatResponseValidator, SchemaValidationError};
