//! Cron scheduler wrapper around tokio-cron-scheduler.

use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler as TokioCronScheduler};

use crate::error::{AppError, AppResult};
use crate::jobs::tasks::DailyReportTask;

/// Schedules the recurring background work, currently the morning digest.
pub struct ReportScheduler {
    scheduler: Arc<Mutex<TokioCronScheduler>>,
}

impl ReportScheduler {
    pub async fn new() -> AppResult<Self> {
        let scheduler = TokioCronScheduler::new()
            .await
            .map_err(|e| AppError::Internal {
                source: anyhow::Error::from(e),
            })?;

        Ok(Self {
            scheduler: Arc::new(Mutex::new(scheduler)),
        })
    }

    /// Register the digest task under the given cron expression.
    pub async fn schedule_digest(&self, cron: &str, task: DailyReportTask) -> AppResult<()> {
        let task = Arc::new(task);

        let cron_job = Job::new_async(cron, move |_uuid, _lock| {
            let task = Arc::clone(&task);
            Box::pin(async move {
                match task.run().await {
                    Ok(delivered) => {
                        tracing::info!(delivered, "Morning digest dispatched");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Morning digest failed");
                    }
                }
            })
        })
        .map_err(|e| AppError::BadRequest {
            message: format!("Invalid cron expression: {}", e),
        })?;

        self.scheduler
            .lock()
            .await
            .add(cron_job)
            .await
            .map_err(|e| AppError::Internal {
                source: anyhow::Error::from(e),
            })?;

        Ok(())
    }

    pub async fn start(&self) -> AppResult<()> {
        self.scheduler
            .lock()
            .await
            .start()
            .await
            .map_err(|e| AppError::Internal {
                source: anyhow::Error::from(e),
            })?;
        Ok(())
    }

    pub async fn stop(&self) -> AppResult<()> {
        self.scheduler
            .lock()
            .await
            .shutdown()
            .await
            .map_err(|e| AppError::Internal {
                source: anyhow::Error::from(e),
            })?;
        Ok(())
    }
}
