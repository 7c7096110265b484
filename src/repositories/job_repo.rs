use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Job, JobStatus, Workflow};
use crate::schema::jobs;

/// Prepress suppliers whose jobs are handled outside the hub and excluded
/// from the daily report.
pub const EXCLUDED_PREPRESS_SUPPLIERS: &[&str] = &[
    "Phototype",
    "PHT",
    "SGS",
    "SHK",
    "Schawk",
    "Southern Graphics",
];

#[derive(Clone)]
pub struct JobRepository {
    pool: AsyncDbPool,
}

impl JobRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Job>> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| AppError::ConnectionPool {
                source: anyhow::Error::from(e),
            })?;

        jobs::table
            .find(id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Active and pending jobs due inside [start, end], visible to the
    /// given workflow set, outside suppliers excluded, ordered by workflow
    /// then id. Bucket order downstream depends on this ordering.
    pub async fn due_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        workflows: &[Workflow],
    ) -> AppResult<Vec<Job>> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| AppError::ConnectionPool {
                source: anyhow::Error::from(e),
            })?;

        jobs::table
            .filter(jobs::real_due_date.between(start, end))
            .filter(jobs::status.eq_any(vec![JobStatus::Active, JobStatus::Pending]))
            .filter(jobs::workflow.eq_any(workflows.to_vec()))
            .filter(
                jobs::prepress_supplier
                    .is_null()
                    .or(jobs::prepress_supplier.ne_all(EXCLUDED_PREPRESS_SUPPLIERS)),
            )
            .order((jobs::workflow.asc(), jobs::id.asc()))
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Jobs still active or pending whose due date fell in the trailing
    /// window; candidates for the overdue list.
    pub async fn overdue_candidates(
        &self,
        start: NaiveDate,
        yesterday: NaiveDate,
        workflows: &[Workflow],
    ) -> AppResult<Vec<Job>> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| AppError::ConnectionPool {
                source: anyhow::Error::from(e),
            })?;

        jobs::table
            .filter(jobs::real_due_date.between(start, yesterday))
            .filter(jobs::status.eq_any(vec![JobStatus::Active, JobStatus::Pending]))
            .filter(jobs::workflow.eq_any(workflows.to_vec()))
            .filter(
                jobs::prepress_supplier
                    .is_null()
                    .or(jobs::prepress_supplier.ne_all(EXCLUDED_PREPRESS_SUPPLIERS)),
            )
            .order(jobs::id.desc())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Jobs on hold due within [start, end]. Hold jobs track the stated
    /// due date, not the computed one.
    pub async fn on_hold(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        workflows: &[Workflow],
    ) -> AppResult<Vec<Job>> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| AppError::ConnectionPool {
                source: anyhow::Error::from(e),
            })?;

        jobs::table
            .filter(jobs::due_date.between(start, end))
            .filter(jobs::status.eq(JobStatus::Hold))
            .filter(jobs::workflow.eq_any(workflows.to_vec()))
            .order(jobs::id.desc())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn pending(&self, workflows: &[Workflow]) -> AppResult<Vec<Job>> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| AppError::ConnectionPool {
                source: anyhow::Error::from(e),
            })?;

        jobs::table
            .filter(jobs::status.eq(JobStatus::Pending))
            .filter(jobs::workflow.eq_any(workflows.to_vec()))
            .filter(
                jobs::prepress_supplier
                    .is_null()
                    .or(jobs::prepress_supplier.ne_all(EXCLUDED_PREPRESS_SUPPLIERS)),
            )
            .order(jobs::id.desc())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
