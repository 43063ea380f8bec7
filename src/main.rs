//! Wellspring server binary.

use std::sync::Arc;
use std::time::Duration;

use http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use wellspring::adapters::http::chat::{routes, ChatAppState};
use wellspring::adapters::{ChatSchemaValidator, OpenAIConfig, OpenAIProvider};
use wellspring::config::AppConfig;
use wellspring::ports::CompletionProvider;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    // The credential is optional at startup; without one, /chat fails
    // lazily with a server error instead of refusing to boot.
    let provider: Option<Arc<dyn CompletionProvider>> = if config.ai.has_api_key() {
        let key = config.ai.openai_api_key.clone().unwrap_or_default();
        let provider = OpenAIProvider::new(
            OpenAIConfig::new(key)
                .with_model(config.ai.model.clone())
                .with_base_url(config.ai.base_url.clone())
                .with_timeout(config.ai.timeout()),
        );
        let info = provider.provider_info();
        info!(provider = %info.name, model = %info.model, "completion provider ready");
        Some(Arc::new(provider))
    } else {
        warn!("OPENAI_API_KEY environment variable not set; /chat will return errors until configured");
        None
    };

    let state = ChatAppState::new(
        provider,
        Arc::new(ChatSchemaValidator::new()),
        config.server.index_file.clone(),
    );

    let cors = match config.server.cors_origins_list() {
        origins if origins.is_empty() => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        origins => {
            let origins: Vec<HeaderValue> =
                origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        }
    };

    let app = routes()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )));

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "wellspring listening");

    axum::serve(listener, app).await?;

    Ok(())
}
