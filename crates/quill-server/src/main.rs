//! # Quill Server
//!
//! Main entry point for the Quill blog platform backend.

use quill_config::ConfigLoader;
use quill_core::{QuillError, QuillResult};
use quill_realtime::NotificationHub;
use quill_repository::DatabasePoolInterface;
use quill_rest::{create_router, AppState};
use quill_rest::middleware::AuthMiddlewareState;
use shaku::HasComponent;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

mod di;

#[tokio::main]
async fn main() {
    init_logging();

    info!("Starting Quill server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run().await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> QuillResult<()> {
    let config = ConfigLoader::from_default_location().load()?;

    info!("Environment: {}", config.app.environment);
    info!("Cache enabled: {}", config.redis.enabled);

    // The hub is shared between the notification service (producer side)
    // and the SSE endpoint (consumer side).
    let hub = Arc::new(NotificationHub::new());

    let module = di::build_app_module(&config, Arc::clone(&hub)).await?;

    let db_pool: Arc<dyn DatabasePoolInterface> = module.resolve();
    db_pool.run_migrations().await?;

    let app_state = AppState::from_module(
        module.as_ref(),
        hub,
        config.notifications.heartbeat_interval(),
    );
    let auth_state = AuthMiddlewareState::new(module.resolve(), module.resolve());

    let router = create_router(app_state, auth_state, &config.server);

    let addr = config.server.addr();
    info!("Starting REST server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| QuillError::Internal(format!("Failed to bind {addr}: {e}")))?;

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| QuillError::Internal(format!("REST server error: {e}")))?;

    db_pool.close().await;

    info!("Server shutdown complete");
    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,quill=debug,tower_http=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
