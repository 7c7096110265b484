use bigdecimal::BigDecimal;
use diesel::dsl::sum;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Job, JobComplexity};
use crate::schema::{job_complexities, jobs, timesheets};

#[derive(Clone)]
pub struct ComplexityRepository {
    pool: AsyncDbPool,
}

impl ComplexityRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn for_job(&self, job_id: i32) -> AppResult<Option<JobComplexity>> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| AppError::ConnectionPool {
                source: anyhow::Error::from(e),
            })?;

        job_complexities::table
            .filter(job_complexities::job_id.eq(job_id))
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// All graded jobs in a complexity category, the population the hour
    /// averages are computed over.
    pub async fn jobs_in_category(
        &self,
        category: &str,
    ) -> AppResult<Vec<(JobComplexity, Job)>> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| AppError::ConnectionPool {
                source: anyhow::Error::from(e),
            })?;

        job_complexities::table
            .inner_join(jobs::table)
            .filter(job_complexities::category.eq(category))
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Total logged hours per job.
    pub async fn hours_by_job(&self, job_ids: &[i32]) -> AppResult<Vec<(i32, Option<BigDecimal>)>> {
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

        timesheets::table
            .filter(timesheets::job_id.eq_any(job_ids.to_vec()))
            .group_by(timesheets::job_id)
            .select((timesheets::job_id, sum(timesheets::hours)))
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
