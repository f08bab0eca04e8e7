//! # Kiosk Server
//!
//! Binary entry point: configuration, database, scheduler, HTTP.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Kiosk UI ───► HTTP (8080) ───► Services ───► SQLite                    │
//! │                                    ▲                                    │
//! │               ReportScheduler ─────┘ (daily, when report.enabled)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use kiosk_db::{Database, DbConfig};
use kiosk_server::scheduler::{ReportSchedule, ReportScheduler};
use kiosk_server::{build_router, AppState, KioskConfig, LoggingMailClient, MailSendClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("Starting kiosk server...");

    // Load configuration
    let config = KioskConfig::load().context("loading configuration")?;
    info!(
        addr = %config.listen_addr(),
        database = %config.database.path,
        report_enabled = config.report.enabled,
        "Configuration loaded"
    );

    // Open database (migrations run on connect)
    let db = Database::new(
        DbConfig::new(&config.database.path).max_connections(config.database.max_connections),
    )
    .await
    .with_context(|| format!("opening database {}", config.database.path))?;
    info!("Database ready");

    let mail_client: Arc<dyn MailSendClient> = Arc::new(LoggingMailClient);
    let state = AppState::new(db.clone(), mail_client, &config.report.from_email);

    // Daily statistics mail
    let scheduler = if config.report.enabled {
        let schedule = ReportSchedule {
            run_at: config.report.run_at_time()?,
            recipient: config.report.recipient.clone(),
        };
        Some(ReportScheduler::new(schedule, state.statistics.clone()).start())
    } else {
        info!("Daily report disabled");
        None
    };

    let app = build_router(state);

    let listener = TcpListener::bind(config.listen_addr())
        .await
        .with_context(|| format!("binding {}", config.listen_addr()))?;
    info!(addr = %config.listen_addr(), "Starting HTTP server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    if let Some(scheduler) = scheduler {
        scheduler.shutdown().await;
    }
    db.close().await;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
