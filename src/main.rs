use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod error;
mod speech;
mod vision;

use api::routes::{create_router, AppState};
use config::Config;
use speech::MurfSpeaker;
use vision::GeminiDescriber;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Configuration from environment; without provider credentials the
    // server refuses to start instead of failing per-request
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Invalid address");

    tracing::info!("Vision Companion Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Starting server on http://{}", addr);

    // One HTTP client shared by both provider integrations; each call
    // carries its own timeout
    let http = reqwest::Client::new();

    let state = Arc::new(AppState {
        describer: Arc::new(GeminiDescriber::new(
            http.clone(),
            config.gemini_api_key,
            config.vision_timeout,
        )),
        speaker: Arc::new(MurfSpeaker::new(
            http,
            config.murf_api_key,
            config.tts_timeout,
        )),
    });

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .await
        .expect("Server error");
}
