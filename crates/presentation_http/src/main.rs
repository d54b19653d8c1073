//! glue HTTP server
//!
//! Main entry point: load config, initialize tracing, build the backend
//! client and router, serve until a termination signal arrives, then
//! drain gracefully.

use std::{net::SocketAddr, sync::Arc};

use clap::Parser;
use infrastructure::{AppConfig, BackendClient, CliOverrides, init_tracing};
use presentation_http::{PROG, routes, state::AppState};
use tokio::{net::TcpListener, signal};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliOverrides::parse();
    let config = Arc::new(AppConfig::load(&cli)?);

    init_tracing(config.verbose);

    info!(
        prog = PROG,
        version = env!("CARGO_PKG_VERSION"),
        addr = %config.addr,
        verbose = config.verbose,
        "starting the service"
    );

    // Fail fast: the backend client is constructed once at startup.
    let backend = BackendClient::new(&config)?;
    let state = AppState::new(Arc::clone(&config), backend);

    let app = routes::create_router(state)
        .into_make_service_with_connect_info::<SocketAddr>();

    let listener = TcpListener::bind(&config.addr).await?;
    info!(addr = %listener.local_addr()?, "listening for requests");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shutdown complete");
    Ok(())
}

/// Wait for any termination signal
///
/// SIGHUP, SIGINT, SIGTERM, and SIGQUIT are all treated identically: the
/// server stops accepting connections and drains in-flight requests
/// before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = wait_for(signal::unix::SignalKind::terminate());
    #[cfg(unix)]
    let hangup = wait_for(signal::unix::SignalKind::hangup());
    #[cfg(unix)]
    let quit = wait_for(signal::unix::SignalKind::quit());

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();
    #[cfg(not(unix))]
    let hangup = std::future::pending::<()>();
    #[cfg(not(unix))]
    let quit = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received Ctrl+C, draining"),
        () = terminate => info!("received SIGTERM, draining"),
        () = hangup => info!("received SIGHUP, draining"),
        () = quit => info!("received SIGQUIT, draining"),
    }
}

#[cfg(unix)]
async fn wait_for(kind: signal::unix::SignalKind) {
    match signal::unix::signal(kind) {
        Ok(mut signal) => {
            signal.recv().await;
        }
        Err(e) => {
            tracing::error!("failed to install signal handler: {e}");
            std::future::pending::<()>().await;
        }
    }
}
