use axum::http::HeaderValue;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gpt_translator::{ClientConfig, CompletionProvider, MockMode, MockProvider, OpenAiProvider};

mod routes;

use routes::{AppState, router};

/// Serve the translator page and proxy its requests to the completion API
#[derive(Debug, Parser)]
#[command(name = "gpt-translator-web", version, about)]
struct Args {
    /// Address to listen on
    #[arg(long, env = "GPT_TRANSLATOR_ADDR", default_value = "127.0.0.1:3000")]
    addr: SocketAddr,

    /// Origin allowed to call the API cross-site (same-origin only when unset)
    #[arg(long, env = "GPT_TRANSLATOR_ALLOW_ORIGIN")]
    allow_origin: Option<String>,

    /// Answer with the mock provider instead of calling the API
    #[arg(long)]
    mock: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let provider: Arc<dyn CompletionProvider> = if args.mock {
        Arc::new(MockProvider::new(MockMode::Echo))
    } else {
        let config = ClientConfig::from_env()
            .map_err(|e| format!("Failed to read client configuration: {}", e))?;
        Arc::new(
            OpenAiProvider::new(config).map_err(|e| format!("Failed to initialize provider: {}", e))?,
        )
    };

    let allow_origin = args
        .allow_origin
        .as_deref()
        .map(HeaderValue::from_str)
        .transpose()
        .map_err(|e| format!("Invalid allowed origin: {}", e))?;

    info!(provider = provider.provider_name(), "🌍 Starting gpt-translator web server");

    let app = router(AppState { provider }, allow_origin);

    let listener = tokio::net::TcpListener::bind(args.addr).await?;
    info!("🚀 Server running at http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl+c: {e}");
        std::future::pending::<()>().await;
    }
    info!("🛑 Shutdown requested");
}
