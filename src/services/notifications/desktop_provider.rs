//! Provider delivering through the local desktop notification daemon.
//!
//! OS toast APIs are main-thread-affine, so presentation is delegated to an
//! out-of-process daemon reached over a short-timeout HTTP call; the
//! calling task is never stalled waiting on the desktop.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use super::provider::{NotificationMessage, NotificationProvider, NotificationResult};
use crate::config::settings::NotifierConfig;
use crate::external::client::HTTP_CLIENT;

pub struct DesktopToastProvider {
    endpoint: String,
    timeout: Duration,
    icon: Option<String>,
}

impl DesktopToastProvider {
    pub fn new(config: &NotifierConfig) -> Self {
        Self {
            endpoint: config.endpoint(),
            timeout: Duration::from_millis(config.timeout_ms),
            icon: config.icon.clone(),
        }
    }
}

#[async_trait]
impl NotificationProvider for DesktopToastProvider {
    async fn send(&self, message: &NotificationMessage) -> NotificationResult {
        let response = HTTP_CLIENT
            .post(&self.endpoint)
            .timeout(self.timeout)
            .json(&json!({
                "title": message.title,
                "message": message.message,
                "duration": message.duration_seconds,
                "icon": self.icon,
            }))
            .send()
            .await;

        match response {
            Ok(resp) => {
                let status_code = resp.status().as_u16();
                let delivered = resp.status().is_success();
                if !delivered {
                    tracing::warn!(
                        endpoint = %self.endpoint,
                        status = status_code,
                        "Notification daemon rejected delivery"
                    );
                }
                NotificationResult {
                    delivered,
                    status_code: Some(status_code),
                    detail: None,
                }
            }
            Err(e) => {
                tracing::warn!(endpoint = %self.endpoint, error = %e, "Notification daemon unreachable");
                NotificationResult::failed(e.to_string())
            }
        }
    }

    fn name(&self) -> &'static str {
        "desktop-toast"
    }
}
