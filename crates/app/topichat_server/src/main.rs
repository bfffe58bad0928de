//! Topichat HTTP server binary.
//!
//! Loads `.env`, requires `GEMINI_API_KEY`, and serves the chat relay on
//! `HOST:PORT` (default `0.0.0.0:5000`).

use clap::Parser;
use topichat_core::config::RelayConfig;
use tracing::{error, info};

/// CLI arguments for the server.
#[derive(Parser, Debug)]
#[command(name = "topichat_server", about = "Topic-constrained chat relay server")]
struct Args {
    /// Interface to bind.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 5000)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("info,topichat_api=debug,topichat_core=debug")
            }),
        )
        .init();

    let args = Args::parse();

    let config = RelayConfig::from_env().inspect_err(|e| {
        error!("{e}");
    })?;

    info!(
        model = %config.model,
        max_output_tokens = config.model_config.generation_config.max_output_tokens,
        "configured Gemini model"
    );

    let app = topichat_api::router(topichat_api::AppState::from_config(&config));

    let bind_addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    let local_addr = listener.local_addr()?;

    info!(addr = %local_addr, version = topichat_core::version(), "chat relay listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
