//! Daily report assembly: queries, completeness checks, bucketing.

use std::collections::{HashMap, HashSet};

use chrono::{Days, Local, NaiveDate};

use crate::error::AppResult;
use crate::models::{Item, Job, Workflow};
use crate::repositories::{ItemRepository, JobRepository, RevisionRepository};
use crate::services::todo::buckets::{
    BucketHours, JobWithItems, TodoReport, bucket_file_out, bucket_jobs_by_due,
    bucket_revision_jobs, filter_overdue,
};
use crate::services::todo::estimates::EstimateService;
use crate::services::todo::window::{DayWindow, WINDOW_DAYS};

/// How far back overdue jobs and revisions are collected.
const LOOKBACK_DAYS: u64 = 60;

/// Nine-digit numbers older than this no longer count as file-out work.
const NINE_DIGIT_LOOKBACK_DAYS: u64 = 180;

#[derive(Clone)]
pub struct TodoService {
    jobs: JobRepository,
    items: ItemRepository,
    revisions: RevisionRepository,
    estimates: EstimateService,
}

impl TodoService {
    pub fn new(
        jobs: JobRepository,
        items: ItemRepository,
        revisions: RevisionRepository,
        estimates: EstimateService,
    ) -> Self {
        Self {
            jobs,
            items,
            revisions,
            estimates,
        }
    }

    /// Build the report for the current date.
    pub async fn daily_report(
        &self,
        workflows: &[Workflow],
        manager_tools: bool,
    ) -> AppResult<TodoReport> {
        self.daily_report_as_of(Local::now().date_naive(), workflows, manager_tools)
            .await
    }

    /// Build the report for an explicit "today"; split out so the
    /// aggregation is reproducible in tests and the digest job.
    pub async fn daily_report_as_of(
        &self,
        today: NaiveDate,
        workflows: &[Workflow],
        manager_tools: bool,
    ) -> AppResult<TodoReport> {
        let window = DayWindow::starting(today);

        if workflows.is_empty() {
            return Ok(Self::empty_report(window, manager_tools));
        }

        let lookback_start = today
            .checked_sub_days(Days::new(LOOKBACK_DAYS))
            .unwrap_or(today);
        let yesterday = today.checked_sub_days(Days::new(1)).unwrap_or(today);

        // Jobs due inside the window, reduced to the incomplete ones.
        let due_jobs = self
            .jobs
            .due_between(window.first(), window.last(), workflows)
            .await?;
        let due_entries = self.attach_items(due_jobs).await?;
        let jobs_due = bucket_jobs_by_due(&window, &due_entries);

        // Outstanding revisions, including the trailing lookback so overdue
        // ones surface.
        let revision_rows = self
            .revisions
            .open_between(lookback_start, window.last(), workflows)
            .await?;
        let revision_jobs: Vec<(NaiveDate, Job)> = revision_rows
            .into_iter()
            .map(|(revision, (_item, job))| (revision.due_date, job))
            .collect();
        let (revisions_due, overdue_revisions) = bucket_revision_jobs(&window, &revision_jobs);

        // Workload estimates only when manager tools are on; due jobs and
        // revision jobs both count against the day's totals.
        let mut bucket_hours = [BucketHours::default(); WINDOW_DAYS];
        if manager_tools {
            for (index, bucket) in jobs_due.iter().enumerate() {
                for job in bucket {
                    let (artist, all_artists) = self.estimates.job_estimates(job).await;
                    bucket_hours[index].add(artist, all_artists);
                }
            }
            for (index, bucket) in revisions_due.iter().enumerate() {
                for job in bucket {
                    let (artist, all_artists) = self.estimates.job_estimates(job).await;
                    bucket_hours[index].add(artist, all_artists);
                }
            }
        }

        // File-out readiness, bucketed by the derived final-file due date.
        let nine_digit_cutoff = today
            .checked_sub_days(Days::new(NINE_DIGIT_LOOKBACK_DAYS))
            .unwrap_or(today);
        let file_out_pairs = self
            .items
            .file_out_candidates(nine_digit_cutoff, workflows)
            .await?;
        let mut seen = HashSet::new();
        let mut file_out_jobs = Vec::new();
        for (_item, job) in file_out_pairs {
            if seen.insert(job.id) {
                file_out_jobs.push(job);
            }
        }
        let file_out_entries = self.attach_items(file_out_jobs).await?;
        let file_out = bucket_file_out(&window, &file_out_entries);

        // Trailing-window jobs that never got fully proofed.
        let overdue_candidates = self
            .jobs
            .overdue_candidates(lookback_start, yesterday, workflows)
            .await?;
        let overdue_entries = self.attach_items(overdue_candidates).await?;
        let overdue_jobs = filter_overdue(&overdue_entries);

        let hold_end = today
            .checked_add_days(Days::new(LOOKBACK_DAYS))
            .unwrap_or(today);
        let jobs_on_hold = self.jobs.on_hold(lookback_start, hold_end, workflows).await?;
        let jobs_pending = self.jobs.pending(workflows).await?;

        Ok(TodoReport {
            window,
            jobs_due,
            bucket_hours,
            revisions_due,
            overdue_revisions,
            file_out,
            overdue_jobs,
            jobs_on_hold,
            jobs_pending,
            manager_tools,
        })
    }

    async fn attach_items(&self, jobs: Vec<Job>) -> AppResult<Vec<JobWithItems>> {
        let job_ids: Vec<i32> = jobs.iter().map(|job| job.id).collect();
        let items = self.items.for_jobs(&job_ids).await?;

        let mut by_job: HashMap<i32, Vec<Item>> = HashMap::new();
        for item in items {
            by_job.entry(item.job_id).or_default().push(item);
        }

        Ok(jobs
            .into_iter()
            .map(|job| {
                let items = by_job.remove(&job.id).unwrap_or_default();
                JobWithItems { job, items }
            })
            .collect())
    }

    fn empty_report(window: DayWindow, manager_tools: bool) -> TodoReport {
        TodoReport {
            window,
            jobs_due: std::array::from_fn(|_| Vec::new()),
            bucket_hours: [BucketHours::default(); WINDOW_DAYS],
            revisions_due: std::array::from_fn(|_| Vec::new()),
            overdue_revisions: Vec::new(),
            file_out: Default::default(),
            overdue_jobs: Vec::new(),
            jobs_on_hold: Vec::new(),
            jobs_pending: Vec::new(),
            manager_tools,
        }
    }
}
