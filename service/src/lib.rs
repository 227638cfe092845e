mod booking;
mod deadline;
mod service;

use std::{future::Future, net::SocketAddr};

use abi::{booking_service_server::BookingServiceServer, BookingConfig, Config, LogConfig};
use anyhow::Result;
use reservation::ReservationManager;
use tonic::transport::Server;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

pub use booking::ReservationService;
pub use deadline::{deadline_for, CLIENT_DEADLINE_MARGIN};

/// gRPC front of the booking service.
pub struct RsvpService<S = ReservationManager> {
    service: ReservationService<S>,
    config: BookingConfig,
}

pub async fn start_server(config: &Config) -> Result<()> {
    start_server_with_shutdown(config, shutdown_signal()).await
}

pub async fn start_server_with_shutdown(
    config: &Config,
    signal: impl Future<Output = ()>,
) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    let manager = ReservationManager::from_config(&config.db, &config.booking).await?;
    let svc = RsvpService::new(manager, config.booking.clone());

    info!(%addr, "gRPC server is running");
    Server::builder()
        .add_service(BookingServiceServer::new(svc))
        .serve_with_shutdown(addr, signal)
        .await?;
    warn!("gRPC server shutdown complete");
    Ok(())
}

/// Install the global subscriber. `RUST_LOG` overrides the default `info` filter.
pub fn init_tracing(config: &LogConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt().with_env_filter(filter).with_target(false);
    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };
    if let Err(e) = result {
        debug!(error = %e, "tracing subscriber already installed, keeping it");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    warn!("shutdown signal received, initiating graceful shutdown");
}
