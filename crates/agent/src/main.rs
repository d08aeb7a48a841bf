//! `hostwatch-agent` -- host health watcher.
//!
//! Polls a Glances-compatible metrics API, classifies host health on a fixed
//! interval and serves an on-demand status report over HTTP. See
//! [`hostwatch_agent::config`] for the environment variables it reads.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hostwatch_agent::config::AgentConfig;
use hostwatch_agent::fetcher::GlancesClient;
use hostwatch_agent::pipeline::Pipeline;
use hostwatch_agent::routes;
use hostwatch_agent::scheduler;
use hostwatch_agent::sink::WatchSink;
use hostwatch_agent::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hostwatch_agent=info,hostwatch_core=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AgentConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    });

    let client = GlancesClient::new(config.glances_url.clone()).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to build HTTP client");
        std::process::exit(1);
    });

    tracing::info!(
        glances_url = %config.glances_url,
        interval_secs = config.interval.as_secs(),
        "Starting hostwatch-agent",
    );

    let pipeline = Arc::new(Pipeline::new(client, config.thresholds));

    // --- Periodic status loop ---
    let (sink, presence) = WatchSink::channel();
    let cancel = CancellationToken::new();
    let scheduler_handle = tokio::spawn(scheduler::run(
        Arc::clone(&pipeline),
        Arc::new(sink),
        config.interval,
        cancel.clone(),
    ));

    // --- HTTP surface ---
    let listener = match routes::bind(&config.host, config.port).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(host = %config.host, port = config.port, error = %e, "Failed to bind");
            std::process::exit(1);
        }
    };
    match listener.local_addr() {
        Ok(addr) => tracing::info!(%addr, "Serving status API"),
        Err(_) => tracing::info!(host = %config.host, port = config.port, "Serving status API"),
    }

    let state = AppState {
        config: Arc::new(config),
        pipeline,
        presence,
    };
    let app = routes::build_app(state);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel.clone()))
        .await
    {
        tracing::error!(error = %e, "Server error");
    }

    // --- Post-shutdown cleanup ---
    cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), scheduler_handle).await;
    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT or SIGTERM, then cancel background work.
async fn shutdown_signal(cancel: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }

    cancel.cancel();
}
