//! Workload estimates for manager tools.
//!
//! An estimate is the average timesheet hours per item across historical
//! jobs sharing a (complexity category, job type[, artist]) key, times the
//! job's item count. The lookup walks timesheet history, so results are
//! memoized with a freshness window instead of being recomputed for every
//! bucket of every report.

use std::sync::Arc;
use std::time::{Duration, Instant};

use bigdecimal::ToPrimitive;
use cached::{Cached, SizedCache};
use tokio::sync::Mutex;

use crate::error::AppResult;
use crate::models::Job;
use crate::repositories::{ComplexityRepository, ItemRepository};
use crate::services::todo::buckets::has_estimate_model;

/// (category, complexity, job type, artist) lookup key.
type EstimateKey = (String, String, String, Option<i32>);

const CACHE_CAPACITY: usize = 256;
const CACHE_FRESHNESS: Duration = Duration::from_secs(300);

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Clone)]
pub struct EstimateService {
    complexities: ComplexityRepository,
    items: ItemRepository,
    cache: Arc<Mutex<SizedCache<EstimateKey, (Instant, f64)>>>,
}

impl EstimateService {
    pub fn new(complexities: ComplexityRepository, items: ItemRepository) -> Self {
        Self {
            complexities,
            items,
            cache: Arc::new(Mutex::new(SizedCache::with_size(CACHE_CAPACITY))),
        }
    }

    /// (artist hours, all-artists hours) estimated for a job.
    ///
    /// Best-effort: a job without a complexity row, without history, or
    /// whose lookup fails contributes (0, 0). Report generation never
    /// fails because an estimate is missing.
    pub async fn job_estimates(&self, job: &Job) -> (f64, f64) {
        if !has_estimate_model(job.workflow) {
            return (0.0, 0.0);
        }

        match self.try_job_estimates(job).await {
            Ok(estimates) => estimates,
            Err(e) => {
                tracing::debug!(job_id = job.id, error = %e, "Workload estimate unavailable");
                (0.0, 0.0)
            }
        }
    }

    async fn try_job_estimates(&self, job: &Job) -> AppResult<(f64, f64)> {
        let Some(complexity) = self.complexities.for_job(job.id).await? else {
            return Ok((0.0, 0.0));
        };

        let item_count = self
            .items
            .counts_by_job(&[job.id])
            .await?
            .first()
            .map(|(_, count)| *count)
            .unwrap_or(0);
        if item_count == 0 {
            return Ok((0.0, 0.0));
        }

        let artist_avg = match job.artist_id {
            Some(artist) => {
                self.average_hours_per_item(
                    &complexity.category,
                    &complexity.complexity,
                    &job.job_type,
                    Some(artist),
                )
                .await?
            }
            None => 0.0,
        };
        let all_artists_avg = self
            .average_hours_per_item(
                &complexity.category,
                &complexity.complexity,
                &job.job_type,
                None,
            )
            .await?;

        Ok((
            round2(artist_avg * item_count as f64),
            round2(all_artists_avg * item_count as f64),
        ))
    }

    /// Average hours per item across the historical population for the
    /// key. Memoized; stale entries are recomputed after the freshness
    /// window so timesheet updates eventually show up.
    async fn average_hours_per_item(
        &self,
        category: &str,
        complexity: &str,
        job_type: &str,
        artist: Option<i32>,
    ) -> AppResult<f64> {
        let key: EstimateKey = (
            category.to_string(),
            complexity.to_string(),
            job_type.to_string(),
            artist,
        );

        {
            let mut cache = self.cache.lock().await;
            if let Some(&(computed_at, value)) = cache.cache_get(&key) {
                if computed_at.elapsed() < CACHE_FRESHNESS {
                    return Ok(value);
                }
            }
        }

        let population = self.complexities.jobs_in_category(category).await?;
        let job_ids: Vec<i32> = population
            .iter()
            .filter(|(graded, job)| {
                graded.complexity == complexity
                    && job.job_type == job_type
                    && artist.is_none_or(|a| job.artist_id == Some(a))
            })
            .map(|(_, job)| job.id)
            .collect();

        let average = if job_ids.is_empty() {
            0.0
        } else {
            let total_items: i64 = self
                .items
                .counts_by_job(&job_ids)
                .await?
                .iter()
                .map(|(_, count)| *count)
                .sum();
            let total_hours: f64 = self
                .complexities
                .hours_by_job(&job_ids)
                .await?
                .iter()
                .filter_map(|(_, hours)| hours.as_ref().and_then(|h| h.to_f64()))
                .sum();

            if total_items > 0 {
                round2(total_hours / total_items as f64)
            } else {
                0.0
            }
        };

        let mut cache = self.cache.lock().await;
        cache.cache_set(key, (Instant::now(), average));
        Ok(average)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_is_two_decimals() {
        assert_eq!(round2(2.0 / 3.0), 0.67);
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(0.0), 0.0);
    }
}
