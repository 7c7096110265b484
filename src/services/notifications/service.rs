//! Notification service: preference resolution and dispatch.

use std::sync::Arc;

use futures::stream::{self, StreamExt};

use super::provider::{
    NORMAL_DURATION_SECONDS, NotificationMessage, NotificationProvider, STICKY_DURATION_SECONDS,
};
use crate::models::{NotifyCategory, NotifyPref, User};

/// How many bulk deliveries run at once.
const BULK_CONCURRENCY: usize = 4;

/// Best-effort notification dispatch with per-user preference checks.
#[derive(Clone)]
pub struct NotificationService {
    provider: Arc<dyn NotificationProvider>,
}

impl NotificationService {
    pub fn new(provider: Arc<dyn NotificationProvider>) -> Self {
        Self { provider }
    }

    /// Deliver a notification to one user, honoring the master toggle and
    /// the per-category preference.
    ///
    /// Returns whether the notification was delivered. Suppression by
    /// preference and delivery failure both return `false`; nothing here
    /// ever raises to the caller.
    pub async fn notify_user(
        &self,
        user: &User,
        title: &str,
        message: &str,
        sticky: bool,
        category: Option<NotifyCategory>,
    ) -> bool {
        if !user.notifications_enabled {
            return false;
        }

        let mut sticky = sticky;
        if let Some(category) = category {
            match user.pref_for(category) {
                NotifyPref::Disabled => return false,
                NotifyPref::Sticky => sticky = true,
                NotifyPref::Enabled => {}
            }
        }

        let duration_seconds = if sticky {
            STICKY_DURATION_SECONDS
        } else {
            NORMAL_DURATION_SECONDS
        };

        let outgoing = NotificationMessage {
            title: title.to_string(),
            message: message.to_string(),
            duration_seconds,
        };

        let result = self.provider.send(&outgoing).await;
        if !result.delivered {
            tracing::debug!(
                user = %user.username,
                provider = self.provider.name(),
                detail = ?result.detail,
                "Notification not delivered"
            );
        }
        result.delivered
    }

    /// Deliver to a collection of users, isolating per-user failures.
    ///
    /// Returns the number of successful deliveries.
    pub async fn notify_users(
        &self,
        users: &[User],
        title: &str,
        message: &str,
        sticky: bool,
        category: Option<NotifyCategory>,
    ) -> usize {
        let futures = users
            .iter()
            .map(|user| self.notify_user(user, title, message, sticky, category))
            .collect::<Vec<_>>();
        let delivered = stream::iter(futures)
            .buffer_unordered(BULK_CONCURRENCY)
            .collect::<Vec<bool>>()
            .await;

        let count = delivered.into_iter().filter(|ok| *ok).count();
        tracing::info!(
            delivered = count,
            total = users.len(),
            "Bulk notification dispatched"
        );
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::test_user;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records every message it is asked to deliver; optionally reports
    /// every delivery as failed.
    struct RecordingProvider {
        sent: Mutex<Vec<NotificationMessage>>,
        fail: bool,
    }

    impl RecordingProvider {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                sent: Mutex::new(Vec::new()),
                fail: false,
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                sent: Mutex::new(Vec::new()),
                fail: true,
            })
        }

        fn sent(&self) -> Vec<NotificationMessage> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl NotificationProvider for RecordingProvider {
        async fn send(&self, message: &NotificationMessage) -> super::super::NotificationResult {
            self.sent.lock().unwrap().push(message.clone());
            if self.fail {
                super::super::NotificationResult::failed("daemon down")
            } else {
                super::super::NotificationResult {
                    delivered: true,
                    status_code: Some(200),
                    detail: None,
                }
            }
        }

        fn name(&self) -> &'static str {
            "recording"
        }
    }

    #[tokio::test]
    async fn master_toggle_suppresses_without_calling_provider() {
        let provider = RecordingProvider::new();
        let service = NotificationService::new(provider.clone());

        let mut user = test_user(1);
        user.notifications_enabled = false;

        let delivered = service
            .notify_user(&user, "Proof ready", "Job 1", true, Some(NotifyCategory::Approvals))
            .await;

        assert!(!delivered);
        assert!(provider.sent().is_empty());
    }

    #[tokio::test]
    async fn disabled_category_suppresses() {
        let provider = RecordingProvider::new();
        let service = NotificationService::new(provider.clone());

        let mut user = test_user(1);
        user.notify_revisions = NotifyPref::Disabled;

        let delivered = service
            .notify_user(&user, "Revision", "Job 1", false, Some(NotifyCategory::Revisions))
            .await;

        assert!(!delivered);
        assert!(provider.sent().is_empty());
    }

    #[tokio::test]
    async fn sticky_preference_forces_max_duration() {
        let provider = RecordingProvider::new();
        let service = NotificationService::new(provider.clone());

        let mut user = test_user(1);
        user.notify_approvals = NotifyPref::Sticky;

        // Caller asked for a normal notification; the preference wins.
        let delivered = service
            .notify_user(&user, "Approved", "Job 1", false, Some(NotifyCategory::Approvals))
            .await;

        assert!(delivered);
        let sent = provider.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].duration_seconds, STICKY_DURATION_SECONDS);
    }

    #[tokio::test]
    async fn enabled_preference_honors_caller_flag() {
        let provider = RecordingProvider::new();
        let service = NotificationService::new(provider.clone());

        let mut user = test_user(1);
        user.notify_approvals = NotifyPref::Enabled;

        service
            .notify_user(&user, "Approved", "Job 1", false, Some(NotifyCategory::Approvals))
            .await;
        service
            .notify_user(&user, "Approved", "Job 1", true, Some(NotifyCategory::Approvals))
            .await;

        let sent = provider.sent();
        assert_eq!(sent[0].duration_seconds, NORMAL_DURATION_SECONDS);
        assert_eq!(sent[1].duration_seconds, STICKY_DURATION_SECONDS);
    }

    #[tokio::test]
    async fn no_category_skips_preference_check() {
        let provider = RecordingProvider::new();
        let service = NotificationService::new(provider.clone());

        let mut user = test_user(1);
        user.notify_approvals = NotifyPref::Disabled;

        let delivered = service
            .notify_user(&user, "System", "Maintenance tonight", false, None)
            .await;

        assert!(delivered);
        assert_eq!(provider.sent().len(), 1);
    }

    #[tokio::test]
    async fn delivery_failure_is_a_false_not_an_error() {
        let provider = RecordingProvider::failing();
        let service = NotificationService::new(provider.clone());

        let user = test_user(1);
        let delivered = service.notify_user(&user, "Hello", "World", false, None).await;

        assert!(!delivered);
        assert_eq!(provider.sent().len(), 1);
    }

    #[tokio::test]
    async fn bulk_counts_only_successes() {
        let provider = RecordingProvider::new();
        let service = NotificationService::new(provider.clone());

        let enabled = test_user(1);
        let mut muted = test_user(2);
        muted.notifications_enabled = false;
        let mut category_off = test_user(3);
        category_off.notify_approvals = NotifyPref::Disabled;

        let count = service
            .notify_users(
                &[enabled, muted, category_off],
                "Approved",
                "Job 9",
                false,
                Some(NotifyCategory::Approvals),
            )
            .await;

        assert_eq!(count, 1);
        assert_eq!(provider.sent().len(), 1);
    }
}
