//! Pomodoro Server - A single-user Pomodoro timer served over HTTP
//!
//! This is the main entry point for the pomodoro-server application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use pomodoro_server::{
    api::create_router,
    config::Config,
    state::{AppState, Phase},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("pomodoro_server={},tower_http=info", config.log_level()))
        .init();

    info!("Starting pomodoro-server v{}", env!("CARGO_PKG_VERSION"));

    // Create application state
    let state = Arc::new(AppState::from_config(&config));
    state.assets.ensure_dir().await?;

    let durations = state.durations;
    info!(
        "Configuration: host={}, port={}, pomodoro={}s, short_break={}s, long_break={}s{}",
        config.host,
        config.port,
        durations.seconds(Phase::Pomodoro),
        durations.seconds(Phase::ShortBreak),
        durations.seconds(Phase::LongBreak),
        if config.demo { " (demo)" } else { "" },
    );
    info!("Uploads stored in {}", state.upload_dir().display());

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /status                - Current timer snapshot");
    info!("  GET  /start, /pause, /reset - Timer controls");
    info!("  POST /switch_to_*           - Force a phase change");
    info!("  POST /upload                - Upload a background image");
    info!("  POST /remove_background     - Remove the background image");
    info!("  GET  /health                - Health check");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
