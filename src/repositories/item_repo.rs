use chrono::NaiveDate;
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Item, Job, JobStatus, Workflow};
use crate::repositories::job_repo::EXCLUDED_PREPRESS_SUPPLIERS;
use crate::schema::{items, jobs};

#[derive(Clone)]
pub struct ItemRepository {
    pool: AsyncDbPool,
}

impl ItemRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// All items belonging to the given jobs, grouped client-side.
    pub async fn for_jobs(&self, job_ids: &[i32]) -> AppResult<Vec<Item>> {
        if job_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| AppError::ConnectionPool {
                source: anyhow::Error::from(e),
            })?;

        items::table
            .filter(items::job_id.eq_any(job_ids.to_vec()))
            .order((items::job_id.asc(), items::id.asc()))
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Item counts per job, one row per job id.
    pub async fn counts_by_job(&self, job_ids: &[i32]) -> AppResult<Vec<(i32, i64)>> {
        if job_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| AppError::ConnectionPool {
                source: anyhow::Error::from(e),
            })?;

        items::table
            .filter(items::job_id.eq_any(job_ids.to_vec()))
            .group_by(items::job_id)
            .select((items::job_id, count_star()))
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Items sitting in "File Out" status with their jobs, for the file-out
    /// buckets: nine-digit entered after the cutoff (or any carton item),
    /// job not hold/cancelled/complete, visible workflow.
    pub async fn file_out_candidates(
        &self,
        nine_digit_cutoff: NaiveDate,
        workflows: &[Workflow],
    ) -> AppResult<Vec<(Item, Job)>> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| AppError::ConnectionPool {
                source: anyhow::Error::from(e),
            })?;

        items::table
            .inner_join(jobs::table)
            .filter(items::item_status.eq("File Out"))
            .filter(
                jobs::workflow.eq(Workflow::Carton).or(items::nine_digit
                    .is_not_null()
                    .and(items::nine_digit_date.gt(nine_digit_cutoff))),
            )
            .filter(jobs::status.ne_all(vec![
                JobStatus::Hold,
                JobStatus::Cancelled,
                JobStatus::Complete,
            ]))
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
