//! Adapters - implementations of the ports for the outside world.

pub mod ai;
pub mod http;
pub mod validation;

pub use ai::{MockCompletionProvider, OpenAIConfig, OpenAIProvider};
pub use validation::ChatSchemaValidator;
