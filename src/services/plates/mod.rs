//! Plate order handling: barcode readiness polling and PDF generation.

mod pdf;
mod poller;
mod service;

pub use pdf::{render_box_pdf, render_label_pdf};
pub use poller::{PollOutcome, PollerConfig, wait_for_artifact};
pub use service::{GeneratedPdf, PlateService};
