//! Pure bucketing logic for the daily production report.
//!
//! Everything here operates on rows already fetched; no queries, no
//! mutation. Bucket order preserves the incoming row order.

use chrono::NaiveDate;

use crate::models::{Item, Job, Workflow};
use crate::services::todo::window::{DayWindow, WINDOW_DAYS};

/// A job with its items, the unit the completeness rules operate on.
#[derive(Debug, Clone)]
pub struct JobWithItems {
    pub job: Job,
    pub items: Vec<Item>,
}

impl JobWithItems {
    /// A job is incomplete while any item still needs its first proof.
    pub fn is_incomplete(&self) -> bool {
        self.items.iter().any(|item| item.needs_proof())
    }

    /// Final-file due date for the whole job: the soonest across items.
    pub fn final_file_due_date(&self) -> Option<NaiveDate> {
        self.items
            .iter()
            .filter_map(|item| item.final_file_due_date(self.job.workflow))
            .min()
    }

    /// Estimated hours to final-file this job: half an hour per item that
    /// has a nine-digit number.
    pub fn avg_fileout_hours(&self) -> f64 {
        let with_nine_digit = self
            .items
            .iter()
            .filter(|item| item.nine_digit.is_some())
            .count();
        0.5 * with_nine_digit as f64
    }
}

/// Per-bucket workload estimate totals (manager tools only).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BucketHours {
    /// Sum of the assigned artists' estimated hours
    pub artist_hours: f64,
    /// Sum of the office-wide average hours
    pub all_artist_hours: f64,
}

impl BucketHours {
    pub fn add(&mut self, artist: f64, all_artists: f64) {
        self.artist_hours += artist;
        self.all_artist_hours += all_artists;
    }
}

/// File-out work split by derived final-file due date.
#[derive(Debug, Clone, Default)]
pub struct FileOutBuckets {
    pub today: Vec<Job>,
    pub tomorrow: Vec<Job>,
    pub plus_two: Vec<Job>,
    pub plus_three: Vec<Job>,
    pub later: Vec<Job>,
    pub overdue: Vec<Job>,
    pub today_hours: f64,
    pub tomorrow_hours: f64,
    pub plus_two_hours: f64,
    pub plus_three_hours: f64,
    pub later_hours: f64,
    pub overdue_hours: f64,
}

/// The assembled daily report.
#[derive(Debug, Clone)]
pub struct TodoReport {
    pub window: DayWindow,
    pub jobs_due: [Vec<Job>; WINDOW_DAYS],
    pub bucket_hours: [BucketHours; WINDOW_DAYS],
    pub revisions_due: [Vec<Job>; WINDOW_DAYS],
    pub overdue_revisions: Vec<Job>,
    pub file_out: FileOutBuckets,
    pub overdue_jobs: Vec<Job>,
    pub jobs_on_hold: Vec<Job>,
    pub jobs_pending: Vec<Job>,
    pub manager_tools: bool,
}

/// Partition incomplete jobs into the window's day buckets by real due
/// date. One linear pass; jobs whose items are all proofed (or exempt)
/// never appear.
pub fn bucket_jobs_by_due(
    window: &DayWindow,
    jobs: &[JobWithItems],
) -> [Vec<Job>; WINDOW_DAYS] {
    let mut buckets: [Vec<Job>; WINDOW_DAYS] = std::array::from_fn(|_| Vec::new());

    for entry in jobs {
        if !entry.is_incomplete() {
            continue;
        }
        let Some(due) = entry.job.real_due_date else {
            continue;
        };
        if let Some(index) = window.index_of(due) {
            buckets[index].push(entry.job.clone());
        }
    }

    buckets
}

/// Bucket jobs with outstanding revisions by revision due date.
///
/// A job appears at most once per bucket even when several of its items
/// have revisions due the same day. Revisions due before today collect
/// into the separate overdue list, deduplicated the same way.
pub fn bucket_revision_jobs(
    window: &DayWindow,
    rows: &[(NaiveDate, Job)],
) -> ([Vec<Job>; WINDOW_DAYS], Vec<Job>) {
    let mut buckets: [Vec<Job>; WINDOW_DAYS] = std::array::from_fn(|_| Vec::new());
    let mut overdue: Vec<Job> = Vec::new();

    for (due, job) in rows {
        if let Some(index) = window.index_of(*due) {
            if !buckets[index].iter().any(|existing| existing.id == job.id) {
                buckets[index].push(job.clone());
            }
        } else if *due < window.first() {
            if !overdue.iter().any(|existing| existing.id == job.id) {
                overdue.push(job.clone());
            }
        }
    }

    (buckets, overdue)
}

/// Bucket file-out work by the job's derived final-file due date into
/// today / tomorrow / +2 / +3 / later / overdue. Jobs with no derivable
/// date are dropped.
pub fn bucket_file_out(window: &DayWindow, jobs: &[JobWithItems]) -> FileOutBuckets {
    let days = window.days();
    let mut buckets = FileOutBuckets::default();

    for entry in jobs {
        let Some(due) = entry.final_file_due_date() else {
            continue;
        };
        let hours = entry.avg_fileout_hours();
        let (bucket, total) = if due == days[0] {
            (&mut buckets.today, &mut buckets.today_hours)
        } else if due == days[1] {
            (&mut buckets.tomorrow, &mut buckets.tomorrow_hours)
        } else if due == days[2] {
            (&mut buckets.plus_two, &mut buckets.plus_two_hours)
        } else if due == days[3] {
            (&mut buckets.plus_three, &mut buckets.plus_three_hours)
        } else if due > days[3] {
            (&mut buckets.later, &mut buckets.later_hours)
        } else {
            (&mut buckets.overdue, &mut buckets.overdue_hours)
        };
        bucket.push(entry.job.clone());
        *total += hours;
    }

    buckets
}

/// Jobs from the trailing window that still have an unproofed item.
pub fn filter_overdue(candidates: &[JobWithItems]) -> Vec<Job> {
    candidates
        .iter()
        .filter(|entry| entry.is_incomplete())
        .map(|entry| entry.job.clone())
        .collect()
}

/// True when the estimate model applies to this job's workflow. Beverage
/// has no complexity grading, so no estimate.
pub fn has_estimate_model(workflow: Workflow) -> bool {
    workflow != Workflow::Beverage
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::item::test_item;
    use crate::models::job::test_job;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn unproofed_entry(job_id: i32, due: NaiveDate) -> JobWithItems {
        JobWithItems {
            job: test_job(job_id, Workflow::Foodservice, Some(due)),
            items: vec![test_item(job_id * 10, job_id)],
        }
    }

    #[test]
    fn incomplete_jobs_land_in_their_due_bucket() {
        let window = DayWindow::starting(date(2025, 6, 2));
        let jobs = vec![
            unproofed_entry(1, date(2025, 6, 2)),
            unproofed_entry(2, date(2025, 6, 9)),
            unproofed_entry(3, date(2025, 6, 5)),
        ];

        let buckets = bucket_jobs_by_due(&window, &jobs);
        assert_eq!(buckets[0].len(), 1);
        assert_eq!(buckets[0][0].id, 1);
        assert_eq!(buckets[7][0].id, 2);
        assert_eq!(buckets[3][0].id, 3);
    }

    #[test]
    fn fully_proofed_jobs_never_appear() {
        let window = DayWindow::starting(date(2025, 6, 2));
        let mut entry = unproofed_entry(1, date(2025, 6, 3));
        for item in &mut entry.items {
            item.first_proof_at = date(2025, 6, 1).and_hms_opt(9, 0, 0);
        }

        let buckets = bucket_jobs_by_due(&window, &[entry]);
        assert!(buckets.iter().all(|bucket| bucket.is_empty()));
    }

    #[test]
    fn exempt_items_do_not_make_a_job_incomplete() {
        let window = DayWindow::starting(date(2025, 6, 2));
        let mut entry = unproofed_entry(1, date(2025, 6, 3));
        entry.items[0].overdue_exempt = true;

        let buckets = bucket_jobs_by_due(&window, &[entry]);
        assert!(buckets.iter().all(|bucket| bucket.is_empty()));
    }

    #[test]
    fn one_unproofed_item_is_enough() {
        let window = DayWindow::starting(date(2025, 6, 2));
        let mut entry = unproofed_entry(1, date(2025, 6, 3));
        let mut proofed = test_item(11, 1);
        proofed.first_proof_at = date(2025, 6, 1).and_hms_opt(9, 0, 0);
        entry.items.push(proofed);

        let buckets = bucket_jobs_by_due(&window, &[entry]);
        assert_eq!(buckets[1].len(), 1);
    }

    #[test]
    fn bucket_order_follows_row_order() {
        let window = DayWindow::starting(date(2025, 6, 2));
        let jobs = vec![
            unproofed_entry(5, date(2025, 6, 2)),
            unproofed_entry(2, date(2025, 6, 2)),
            unproofed_entry(9, date(2025, 6, 2)),
        ];

        let buckets = bucket_jobs_by_due(&window, &jobs);
        let ids: Vec<i32> = buckets[0].iter().map(|job| job.id).collect();
        assert_eq!(ids, vec![5, 2, 9]);
    }

    #[test]
    fn revision_jobs_are_deduplicated_per_bucket() {
        let window = DayWindow::starting(date(2025, 6, 2));
        let job = test_job(1, Workflow::Foodservice, None);
        let rows = vec![
            (date(2025, 6, 3), job.clone()),
            (date(2025, 6, 3), job.clone()),
            (date(2025, 6, 4), job.clone()),
        ];

        let (buckets, overdue) = bucket_revision_jobs(&window, &rows);
        assert_eq!(buckets[1].len(), 1);
        assert_eq!(buckets[2].len(), 1);
        assert!(overdue.is_empty());
    }

    #[test]
    fn past_due_revisions_collect_separately() {
        let window = DayWindow::starting(date(2025, 6, 2));
        let job = test_job(1, Workflow::Foodservice, None);
        let rows = vec![
            (date(2025, 5, 28), job.clone()),
            (date(2025, 5, 30), job.clone()),
        ];

        let (buckets, overdue) = bucket_revision_jobs(&window, &rows);
        assert!(buckets.iter().all(|bucket| bucket.is_empty()));
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].id, 1);
    }

    #[test]
    fn file_out_buckets_split_on_derived_due_date() {
        // Monday window start.
        let window = DayWindow::starting(date(2025, 6, 9));

        let mut entry = unproofed_entry(1, date(2025, 6, 9));
        // Approval + nine digit on Friday June 6th: base Friday, +5 days
        // lands Wednesday June 11th.
        entry.items[0].approved_at = date(2025, 6, 6).and_hms_opt(10, 0, 0);
        entry.items[0].nine_digit = Some("123456789".to_string());
        entry.items[0].nine_digit_date = Some(date(2025, 6, 6));

        let buckets = bucket_file_out(&window, &[entry]);
        assert_eq!(buckets.plus_two.len(), 1);
        assert_eq!(buckets.plus_two_hours, 0.5);
        assert!(buckets.today.is_empty());
    }

    #[test]
    fn jobs_without_derivable_date_are_dropped() {
        let window = DayWindow::starting(date(2025, 6, 9));
        let entry = unproofed_entry(1, date(2025, 6, 9)); // no approval
        let buckets = bucket_file_out(&window, &[entry]);
        assert!(buckets.today.is_empty() && buckets.later.is_empty() && buckets.overdue.is_empty());
    }

    #[test]
    fn overdue_filter_keeps_only_incomplete() {
        let complete = {
            let mut entry = unproofed_entry(1, date(2025, 5, 20));
            entry.items[0].first_proof_at = date(2025, 5, 19).and_hms_opt(9, 0, 0);
            entry
        };
        let incomplete = unproofed_entry(2, date(2025, 5, 21));

        let overdue = filter_overdue(&[complete, incomplete]);
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].id, 2);
    }

    #[test]
    fn fileout_hours_count_only_nine_digit_items() {
        let mut entry = unproofed_entry(1, date(2025, 6, 9));
        entry.items[0].nine_digit = Some("123456789".to_string());
        entry.items.push(test_item(12, 1));
        assert_eq!(entry.avg_fileout_hours(), 0.5);
    }
}
