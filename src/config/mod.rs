//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment
//! variables using the `config` and `dotenvy` crates. Configuration is
//! loaded with the `WELLSPRING` prefix and nested values use double
//! underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use wellspring::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr());
//! ```

mod ai;
mod error;
mod server;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Completion API configuration
    #[serde(default)]
    pub ai: AiConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `WELLSPRING` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Falls back to a bare `OPENAI_API_KEY` variable for the credential
    ///
    /// # Environment Variable Format
    ///
    /// - `WELLSPRING__SERVER__PORT=8000` -> `server.port = 8000`
    /// - `WELLSPRING__AI__OPENAI_API_KEY=sk-...` -> `ai.openai_api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut config: AppConfig = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("WELLSPRING")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        // The unprefixed variable the original deployment used still works.
        if !config.ai.has_api_key() {
            if let Ok(key) = std::env::var("OPENAI_API_KEY") {
                if !key.is_empty() {
                    config.ai.openai_api_key = Some(key);
                }
            }
        }

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("WELLSPRING__SERVER__PORT");
        env::remove_var("WELLSPRING__SERVER__ENVIRONMENT");
        env::remove_var("WELLSPRING__AI__OPENAI_API_KEY");
        env::remove_var("WELLSPRING__AI__MODEL");
        env::remove_var("OPENAI_API_KEY");
    }

    #[test]
    fn test_load_with_no_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.ai.model, "gpt-4.1");
        assert!(!config.ai.has_api_key());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_prefixed_api_key() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("WELLSPRING__AI__OPENAI_API_KEY", "sk-prefixed");
        let config = AppConfig::load().unwrap();
        clear_env();

        assert_eq!(config.ai.openai_api_key.as_deref(), Some("sk-prefixed"));
    }

    #[test]
    fn test_bare_openai_key_fallback() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("OPENAI_API_KEY", "sk-bare");
        let config = AppConfig::load().unwrap();
        clear_env();

        assert_eq!(config.ai.openai_api_key.as_deref(), Some("sk-bare"));
    }

    #[test]
    fn test_prefixed_key_wins_over_bare() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("WELLSPRING__AI__OPENAI_API_KEY", "sk-prefixed");
        env::set_var("OPENAI_API_KEY", "sk-bare");
        let config = AppConfig::load().unwrap();
        clear_env();

        assert_eq!(config.ai.openai_api_key.as_deref(), Some("sk-prefixed"));
    }

    #[test]
    fn test_custom_server_port() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("WELLSPRING__SERVER__PORT", "3000");
        let config = AppConfig::load().unwrap();
        clear_env();

        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("WELLSPRING__SERVER__ENVIRONMENT", "production");
        let config = AppConfig::load().unwrap();
        clear_env();

        assert!(config.is_production());
    }
}
