//! Room Timer - countdown timer panel service
//!
//! This is the main entry point for the room-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::info;

use room_timer::{
    api::create_router,
    config::{Config, TimerConfig},
    device::LogDevice,
    engine::TimerEngine,
    events::TimerCommand,
    state::AppState,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("room_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting room-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}", config.host, config.port);

    // Load the timer panel configuration, or fall back to built-in defaults
    let timer_config = match &config.config {
        Some(path) => match TimerConfig::load(path) {
            Ok(timer_config) => timer_config,
            Err(e) => {
                tracing::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => TimerConfig::default(),
    };
    let timer_config = Arc::new(timer_config);
    info!(
        "Timer panel '{}', default countdown {}s",
        timer_config.panel_id, timer_config.default_seconds
    );

    // Start the timer engine task against the logging device transport
    let (command_tx, command_rx) = mpsc::channel(32);
    let (engine, snapshot_rx) = TimerEngine::new(LogDevice::new(), Arc::clone(&timer_config));
    let engine_task = tokio::spawn(engine.run(command_rx));

    // Create application state shared with the HTTP handlers
    let state = Arc::new(AppState::new(
        timer_config,
        command_tx.clone(),
        snapshot_rx,
        config.host.clone(),
        config.port,
    ));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /events - UI event webhook");
    info!("  GET  /status - Timer snapshot and server info");
    info!("  GET  /health - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    // Let the engine take its artifacts off the device before exiting
    let _ = command_tx.send(TimerCommand::Shutdown).await;
    let _ = engine_task.await;

    info!("Server shutdown complete");
    Ok(())
}
