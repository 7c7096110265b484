//! Daily production report aggregation.
//!
//! Buckets incomplete jobs, outstanding revisions, and file-out work into
//! an 8-day look-ahead window, with optional workload estimates for
//! manager tools. Pure read-side aggregation: nothing is mutated, so the
//! report is safe to build concurrently and repeatedly.

mod buckets;
mod estimates;
mod service;
mod window;

pub use buckets::{BucketHours, FileOutBuckets, JobWithItems, TodoReport};
pub use estimates::EstimateService;
pub use service::TodoService;
pub use window::{DayWindow, WINDOW_DAYS};
