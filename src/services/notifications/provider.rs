//! Core notification provider trait and types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Presentation time for a normal notification.
pub const NORMAL_DURATION_SECONDS: u32 = 10;

/// Presentation time for a sticky notification: the platform maximum.
pub const STICKY_DURATION_SECONDS: u32 = 60;

/// Message handed to a notification provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationMessage {
    pub title: String,
    pub message: String,
    /// Presentation duration in seconds, already resolved from the sticky
    /// flag and the user's preference.
    pub duration_seconds: u32,
}

/// Outcome of a delivery attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationResult {
    pub delivered: bool,
    pub status_code: Option<u16>,
    pub detail: Option<String>,
}

impl NotificationResult {
    pub fn failed(detail: impl Into<String>) -> Self {
        Self {
            delivered: false,
            status_code: None,
            detail: Some(detail.into()),
        }
    }
}

/// Delivery channel for desktop notifications.
///
/// Implementations must be non-blocking from the caller's point of view:
/// bounded by a short timeout and infallible (failures are reported in the
/// result, not raised).
#[async_trait]
pub trait NotificationProvider: Send + Sync {
    /// Attempt delivery. Never returns an error and never blocks past the
    /// provider's configured timeout.
    async fn send(&self, message: &NotificationMessage) -> NotificationResult;

    /// Provider name for logging.
    fn name(&self) -> &'static str;
}
