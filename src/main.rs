mod config;
mod errors;
mod handlers;
mod models;
mod services;
#[cfg(feature = "http-server")]
mod server; // JSON API for the mobile client

use anyhow::Result;
use dotenv::dotenv;
use std::sync::Arc;

use config::Config;
use handlers::ConversionSession;
use services::{GeminiService, RecipeConverter};

#[tokio::main]
async fn main() -> Result<()> {
    // .env first so RUST_LOG from it is honoured
    dotenv().ok();
    env_logger::init();

    log::info!("🚀 Starting SmartCook recipe converter...");

    let config = Config::from_env()?;

    let gemini = GeminiService::new(config.gemini_api_key.clone(), config.gemini_model.clone())
        .with_base_url(config.gemini_base_url.clone())
        .with_timeout(config.request_timeout)?;
    log::info!("✅ Gemini service initialized with model: {}", config.gemini_model);

    let converter = Arc::new(RecipeConverter::new(Arc::new(gemini)));
    let session = Arc::new(ConversionSession::new(converter));

    run(config, session).await
}

#[cfg(feature = "http-server")]
async fn run(config: Config, session: Arc<ConversionSession>) -> Result<()> {
    let app = server::create_router(session, config.max_body_bytes);
    let listener = tokio::net::TcpListener::bind(config.server_addr.as_str()).await?;

    log::info!("🌐 API server listening on {}", config.server_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            log::info!("🛑 Shutting down...");
        })
        .await?;

    Ok(())
}

/// Without the server, convert one recipe from stdin with default preferences
/// and print it as JSON.
#[cfg(not(feature = "http-server"))]
async fn run(_config: Config, session: Arc<ConversionSession>) -> Result<()> {
    use handlers::ConversionOutcome;
    use tokio::io::AsyncReadExt;

    let mut text = String::new();
    tokio::io::stdin().read_to_string(&mut text).await?;

    match session.convert(models::ConversionInput::text(text)).await {
        ConversionOutcome::Applied(recipe) => {
            println!("{}", serde_json::to_string_pretty(&recipe)?);
            Ok(())
        }
        ConversionOutcome::Failed(err) => {
            log::error!("❌ {:?}", err);
            anyhow::bail!("{}", err.user_message())
        }
        ConversionOutcome::Superseded => anyhow::bail!("conversion was superseded"),
    }
}
