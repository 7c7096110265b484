use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Item, Job, JobStatus, Revision, Workflow};
use crate::schema::{items, jobs, revisions};

#[derive(Clone)]
pub struct RevisionRepository {
    pool: AsyncDbPool,
}

impl RevisionRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Outstanding revisions due inside [start, end] with their item and
    /// job, skipping jobs on hold or cancelled. The range deliberately
    /// reaches back before today so overdue revisions surface.
    pub async fn open_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        workflows: &[Workflow],
    ) -> AppResult<Vec<(Revision, (Item, Job))>> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| AppError::ConnectionPool {
                source: anyhow::Error::from(e),
            })?;

        revisions::table
            .inner_join(items::table.inner_join(jobs::table))
            .filter(revisions::complete_date.is_null())
            .filter(revisions::due_date.between(start, end))
            .filter(jobs::status.ne_all(vec![JobStatus::Hold, JobStatus::Cancelled]))
            .filter(jobs::workflow.eq_any(workflows.to_vec()))
            .order((revisions::due_date.asc(), revisions::id.asc()))
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
