use std::sync::Arc;
use tracing::{error, info, warn};

use exoplanet_ai::config::AppConfig;
use exoplanet_ai::llm::{GeminiClient, LlmProvider, ProviderClient};
use exoplanet_ai::routes::configure_routes;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env()?;
    let provider_config = Arc::new(config.provider.clone());

    if !provider_config.has_credential() {
        warn!("GOOGLE_API_KEY is not set; /api/ask and /api/chat will fail until it is");
    }

    // A missing capability is reported per request, not at startup.
    let provider: Option<Arc<dyn LlmProvider>> = match GeminiClient::new(provider_config.clone()) {
        Ok(client) => Some(Arc::new(client) as Arc<dyn LlmProvider>),
        Err(e) => {
            error!(error = %e, "Gemini client unavailable");
            None
        }
    };

    let client = Arc::new(ProviderClient::new(provider_config, provider));
    let routes = configure_routes(client, &config.cors_allowlist);

    let addr = config.socket_addr();
    info!(
        addr = %addr,
        model = %config.provider.model,
        origins = ?config.cors_allowlist,
        "Starting exoplanet AI gateway"
    );
    warp::serve(routes).run(addr).await;

    Ok(())
}
