//! Daily report DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Job, JobStatus, Workflow};
use crate::services::todo::TodoReport;

/// Query flags for the report endpoint.
#[derive(Debug, Default, Deserialize, Validate, utoipa::IntoParams)]
pub struct TodoQuery {
    /// Include workload estimates and totals.
    #[serde(default)]
    pub manager_tools: bool,
}

/// A job reduced to the columns the dashboard shows.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct JobSummary {
    pub id: i32,
    pub name: String,
    pub workflow: Workflow,
    pub status: JobStatus,
    pub due_date: Option<NaiveDate>,
    pub artist_id: Option<i32>,
}

impl From<&Job> for JobSummary {
    fn from(job: &Job) -> Self {
        Self {
            id: job.id,
            name: job.name.clone(),
            workflow: job.workflow,
            status: job.status,
            due_date: job.real_due_date.or(job.due_date),
            artist_id: job.artist_id,
        }
    }
}

fn summaries(jobs: &[Job]) -> Vec<JobSummary> {
    jobs.iter().map(JobSummary::from).collect()
}

/// One day of the look-ahead window.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct DayBucketResponse {
    pub date: NaiveDate,
    pub jobs_due: Vec<JobSummary>,
    pub revisions_due: Vec<JobSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_artist_hours: Option<f64>,
}

/// File-out buckets with optional per-bucket hour totals.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct FileOutResponse {
    pub today: Vec<JobSummary>,
    pub tomorrow: Vec<JobSummary>,
    pub plus_two: Vec<JobSummary>,
    pub plus_three: Vec<JobSummary>,
    pub later: Vec<JobSummary>,
    pub overdue: Vec<JobSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<[f64; 6]>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct TodoReportResponse {
    /// First day of the window (today).
    pub day_one: NaiveDate,
    pub manager_tools: bool,
    pub days: Vec<DayBucketResponse>,
    pub overdue_revisions: Vec<JobSummary>,
    pub overdue_jobs: Vec<JobSummary>,
    pub jobs_on_hold: Vec<JobSummary>,
    pub jobs_pending: Vec<JobSummary>,
    pub file_out: FileOutResponse,
}

impl From<TodoReport> for TodoReportResponse {
    fn from(report: TodoReport) -> Self {
        let days = report
            .window
            .days()
            .iter()
            .enumerate()
            .map(|(index, date)| DayBucketResponse {
                date: *date,
                jobs_due: summaries(&report.jobs_due[index]),
                revisions_due: summaries(&report.revisions_due[index]),
                artist_hours: report
                    .manager_tools
                    .then_some(report.bucket_hours[index].artist_hours),
                all_artist_hours: report
                    .manager_tools
                    .then_some(report.bucket_hours[index].all_artist_hours),
            })
            .collect();

        let file_out = FileOutResponse {
            today: summaries(&report.file_out.today),
            tomorrow: summaries(&report.file_out.tomorrow),
            plus_two: summaries(&report.file_out.plus_two),
            plus_three: summaries(&report.file_out.plus_three),
            later: summaries(&report.file_out.later),
            overdue: summaries(&report.file_out.overdue),
            hours: report.manager_tools.then_some([
                report.file_out.today_hours,
                report.file_out.tomorrow_hours,
                report.file_out.plus_two_hours,
                report.file_out.plus_three_hours,
                report.file_out.later_hours,
                report.file_out.overdue_hours,
            ]),
        };

        Self {
            day_one: report.window.first(),
            manager_tools: report.manager_tools,
            days,
            overdue_revisions: summaries(&report.overdue_revisions),
            overdue_jobs: summaries(&report.overdue_jobs),
            jobs_on_hold: summaries(&report.jobs_on_hold),
            jobs_pending: summaries(&report.jobs_pending),
            file_out,
        }
    }
}
