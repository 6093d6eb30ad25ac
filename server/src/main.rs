use std::process::ExitCode;

use canvas::consts::{GRID_COLS, GRID_ROWS};
use server::config::ServerConfig;
use server::persistence;
use server::state::{AppState, Mural};

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv = dotenvy::dotenv();
    tracing_subscriber::fmt::init();
    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "loaded .env");
    }

    let config = ServerConfig::from_env();

    let mural = match &config.snapshot_path {
        Some(path) => match persistence::load_snapshot(path).await {
            Ok(pixels) => {
                let mural = Mural::from_snapshot(GRID_ROWS, GRID_COLS, pixels);
                tracing::info!(path = %path.display(), count = mural.len(), "snapshot loaded");
                mural
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "snapshot unreadable; refusing to start");
                return ExitCode::FAILURE;
            }
        },
        None => {
            tracing::warn!("PIXEL_STORE_PATH not set; pixels are kept in memory only");
            Mural::default()
        }
    };

    let state = AppState::new(mural, config.snapshot_path.clone());
    let flusher = persistence::spawn_persistence_task(state.clone(), config.flush_interval_ms);

    let app = server::routes::app(state.clone());
    let listener = match tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(port = config.port, error = %e, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(port = config.port, "pixel store listening");
    let served = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await;

    flusher.shutdown().await;
    if let Err(e) = persistence::flush_if_dirty(&state).await {
        tracing::error!(error = %e, "final snapshot flush failed");
        return ExitCode::FAILURE;
    }

    match served {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "server failed");
            ExitCode::FAILURE
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
