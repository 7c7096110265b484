//! Morning digest: a per-user summary of the daily production report,
//! delivered through the notification bridge.

use crate::error::AppResult;
use crate::models::NotifyCategory;
use crate::repositories::UserRepository;
use crate::services::{NotificationService, TodoService};

pub struct DailyReportTask {
    users: UserRepository,
    todo: TodoService,
    notifications: NotificationService,
}

impl DailyReportTask {
    pub fn new(
        users: UserRepository,
        todo: TodoService,
        notifications: NotificationService,
    ) -> Self {
        Self {
            users,
            todo,
            notifications,
        }
    }

    /// Build each recipient's report and deliver a one-line summary.
    ///
    /// Per-user failures are logged and skipped; one bad report or one
    /// unreachable desktop never stops the rest of the run. Returns the
    /// delivery count.
    pub async fn run(&self) -> AppResult<usize> {
        let recipients = self.users.digest_recipients().await?;
        let mut delivered = 0;

        for user in recipients {
            let workflows = user.permitted_workflows();
            if workflows.is_empty() {
                continue;
            }

            let report = match self.todo.daily_report(&workflows, false).await {
                Ok(report) => report,
                Err(e) => {
                    tracing::warn!(user = %user.username, error = %e, "Digest report failed");
                    continue;
                }
            };

            let message = format!(
                "{} jobs due today, {} revisions due today, {} jobs overdue",
                report.jobs_due[0].len(),
                report.revisions_due[0].len(),
                report.overdue_jobs.len()
            );

            if self
                .notifications
                .notify_user(
                    &user,
                    "GOLD daily report",
                    &message,
                    false,
                    Some(NotifyCategory::DailyDigest),
                )
                .await
            {
                delivered += 1;
            }
        }

        Ok(delivered)
    }
}
