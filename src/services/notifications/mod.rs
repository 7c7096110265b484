//! Desktop notification dispatch.
//!
//! Best-effort bridge from in-process events to a user's desktop session.
//! Failures are logged and surfaced as `false`, never as errors.

mod desktop_provider;
mod provider;
mod service;

pub use desktop_provider::DesktopToastProvider;
pub use provider::{
    NORMAL_DURATION_SECONDS, NotificationMessage, NotificationProvider, NotificationResult,
    STICKY_DURATION_SECONDS,
};
pub use service::NotificationService;
