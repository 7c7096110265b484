//! Server lifecycle: initialization, startup, graceful shutdown.

use tokio::net::TcpListener;
use tokio::signal;

use crate::api::routes::create_router;
use crate::config::{Environment, settings::Settings};
use crate::db::establish_async_connection_pool;
use crate::jobs::ReportScheduler;
use crate::jobs::tasks::DailyReportTask;
use crate::repositories::Repositories;
use crate::services::Services;
use crate::state::AppState;

/// HTTP server manager
pub struct Server {
    settings: Settings,
}

impl Server {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Start the server and run until a shutdown signal.
    ///
    /// Initializes the connection pool, application state, the digest
    /// scheduler, and the router, then serves until Ctrl+C or SIGTERM.
    pub async fn run(self) -> anyhow::Result<()> {
        tracing::info!(
            app_name = %self.settings.application.name,
            app_version = %self.settings.application.version,
            environment = %Environment::from_env().as_str(),
            "Application starting"
        );

        tracing::info!(
            host = %self.settings.server.host,
            port = %self.settings.server.port,
            "Server configuration loaded"
        );

        self.settings.jwt.validate().map_err(|e| {
            tracing::error!(error = %e, "JWT configuration validation failed");
            anyhow::anyhow!("JWT configuration validation failed: {}", e)
        })?;

        tracing::info!("Initializing database connection pool...");
        let pool = establish_async_connection_pool(&self.settings.database).await?;
        tracing::info!("Database connection pool initialized");

        let repos = Repositories::new(pool.clone());
        let services = Services::new(repos.clone(), &self.settings);
        let state = AppState::new(
            services.clone(),
            pool,
            self.settings.jwt.clone(),
            self.settings.application.clone(),
        );
        tracing::info!("Application state created");

        // Morning digest scheduler.
        let scheduler = if self.settings.digest.enabled {
            let scheduler = ReportScheduler::new().await?;
            let task = DailyReportTask::new(
                repos.users.clone(),
                services.todo.clone(),
                services.notifications.clone(),
            );
            scheduler
                .schedule_digest(&self.settings.digest.cron, task)
                .await?;
            scheduler.start().await?;
            tracing::info!(cron = %self.settings.digest.cron, "Digest scheduler started");
            Some(scheduler)
        } else {
            None
        };

        let router = create_router(state);
        tracing::info!("Router configured");

        let address = self.settings.server.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!(error = %e, address = %address, "Failed to bind to address");
            anyhow::anyhow!("Failed to bind to {}: {}", address, e)
        })?;

        tracing::info!(address = %address, "Server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        // Stop background work before exiting.
        services.plates.shutdown_token().cancel();
        if let Some(scheduler) = scheduler {
            if let Err(e) = scheduler.stop().await {
                tracing::warn!(error = %e, "Scheduler shutdown failed");
            }
        }

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

/// Waits for a shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
