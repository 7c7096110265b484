//! Job complexity grading and timesheet models.
//!
//! Complexity rows grade foodservice-style jobs for the workload estimate;
//! timesheets are the historical hours the averages are computed from.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use diesel::prelude::*;
use serde::Serialize;

/// Complexity grade for a job, keyed by a category describing the kind of
/// work (rebuild, new template, creative, ...) and a letter grade.
#[derive(Debug, Queryable, Selectable, Serialize, Clone)]
#[diesel(table_name = crate::schema::job_complexities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct JobComplexity {
    pub id: i32,
    pub job_id: i32,
    pub category: String,
    pub complexity: String,
}

/// Logged artist hours against a job.
#[derive(Debug, Queryable, Selectable, Serialize, Clone)]
#[diesel(table_name = crate::schema::timesheets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Timesheet {
    pub id: i32,
    pub job_id: i32,
    pub artist_id: i32,
    pub hours: BigDecimal,
    pub logged_on: NaiveDate,
}
