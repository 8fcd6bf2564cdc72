//! Room Token Service
//!
//! Entry point for the token server.

use std::future::Future;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use token_service::config::{Config, Environment};
use token_service::crypto::HmacGrantSigner;
use token_service::observability::metrics::init_metrics_recorder;
use token_service::routes::{self, AppState};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // The environment picks the log format, so it is read before tracing exists
    let environment = Environment::from_env().map_err(|e| {
        eprintln!("Failed to read ENVIRONMENT: {}", e);
        e
    })?;

    let json_logs = environment.is_production();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| environment.default_log_filter().into()),
        )
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json_logs).then(|| tracing_subscriber::fmt::layer()))
        .init();

    info!(environment = environment.as_str(), "Starting Room Token Service");

    let config = Config::from_env().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    info!(
        bind_address = %config.bind_address,
        token_ttl_seconds = config.token_ttl_seconds,
        "Configuration loaded successfully"
    );

    if config.uses_development_credentials() {
        warn!("Using development API credentials; set LIVEKIT_API_KEY and LIVEKIT_API_SECRET");
    }

    let metrics_handle = init_metrics_recorder().map_err(|e| {
        error!("Failed to initialize metrics: {}", e);
        e
    })?;

    let addr = config.bind_address;
    let drain = Duration::from_secs(config.shutdown_drain_seconds);

    let signer = Arc::new(HmacGrantSigner::from_config(&config));
    let state = Arc::new(AppState { config, signer });

    let app = routes::build_routes(state, metrics_handle);

    info!("Room Token Service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(drain))
        .await?;

    info!("Room Token Service shutdown complete");

    Ok(())
}

/// Resolves once SIGINT or SIGTERM arrives and the drain period has elapsed.
async fn shutdown_signal(drain: Duration) {
    let ctrl_c = await_signal("SIGINT", signal::ctrl_c());

    #[cfg(unix)]
    let terminate = await_signal("SIGTERM", async {
        let mut stream = signal::unix::signal(signal::unix::SignalKind::terminate())?;
        stream.recv().await;
        Ok::<(), io::Error>(())
    });

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    if !drain.is_zero() {
        warn!("Draining connections for {} seconds...", drain.as_secs());
        tokio::time::sleep(drain).await;
        info!("Drain period complete");
    }
}

/// Resolves when `signal` fires. A listener that failed to install never
/// resolves, so it cannot start a shutdown by itself.
async fn await_signal<F>(name: &str, signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("Received {}, starting graceful shutdown...", name),
        Err(e) => {
            error!("Failed to listen for {}: {}", name, e);
            std::future::pending::<()>().await;
        }
    }
}
