//! Bounded wait for the automation engine to produce a barcode artifact.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::config::settings::AutomationConfig;
use crate::error::AppResult;
use crate::external::automation::{ArtifactKind, ArtifactStore};

/// Polling cadence and bound.
///
/// The engine scans its hotfolder roughly once a minute, so the default
/// bound of 90 one-second polls gives it ~1.5x its own cadence before we
/// give up. Both knobs come from configuration.
#[derive(Debug, Clone, Copy)]
pub struct PollerConfig {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl PollerConfig {
    pub fn from_settings(config: &AutomationConfig) -> Self {
        Self {
            interval: Duration::from_secs(config.poll_interval_seconds),
            max_attempts: config.poll_max_attempts,
        }
    }
}

/// Distinguishable poll outcomes; only `Ready` may be followed by PDF
/// generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Artifact present; `attempts` is the number of polls taken (0 when
    /// it already existed).
    Ready { attempts: u32 },
    /// The bound elapsed without the artifact appearing.
    TimedOut,
    /// The wait was cancelled (service shutdown).
    Cancelled,
}

/// Ensure the artifact exists, triggering creation and polling if needed.
///
/// Returns immediately when the artifact is already present. Otherwise a
/// single creation request is handed to the engine and existence is
/// re-checked once per interval up to the configured bound.
pub async fn wait_for_artifact(
    store: &dyn ArtifactStore,
    order_id: i32,
    kind: ArtifactKind,
    config: &PollerConfig,
    cancel: &CancellationToken,
) -> AppResult<PollOutcome> {
    if store.exists(order_id, kind) {
        return Ok(PollOutcome::Ready { attempts: 0 });
    }

    store.trigger(order_id, kind)?;

    for attempt in 1..=config.max_attempts {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!(order_id, artifact = %kind, "Barcode wait cancelled");
                return Ok(PollOutcome::Cancelled);
            }
            _ = tokio::time::sleep(config.interval) => {}
        }

        if store.exists(order_id, kind) {
            return Ok(PollOutcome::Ready { attempts: attempt });
        }
    }

    tracing::warn!(
        order_id,
        artifact = %kind,
        attempts = config.max_attempts,
        "Barcode artifact never appeared"
    );
    Ok(PollOutcome::TimedOut)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppResult;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Artifact appears after a fixed number of existence checks following
    /// the trigger; u32::MAX means never.
    struct ScriptedStore {
        appear_after: u32,
        polls: AtomicU32,
        triggers: AtomicU32,
        triggered_gate: bool,
    }

    impl ScriptedStore {
        fn appearing_after(polls: u32) -> Self {
            Self {
                appear_after: polls,
                polls: AtomicU32::new(0),
                triggers: AtomicU32::new(0),
                triggered_gate: true,
            }
        }

        fn already_present() -> Self {
            Self {
                appear_after: 0,
                polls: AtomicU32::new(0),
                triggers: AtomicU32::new(0),
                triggered_gate: false,
            }
        }

        fn never_appearing() -> Self {
            Self::appearing_after(u32::MAX)
        }
    }

    impl ArtifactStore for ScriptedStore {
        fn exists(&self, _order_id: i32, _kind: ArtifactKind) -> bool {
            if self.triggered_gate && self.triggers.load(Ordering::SeqCst) == 0 {
                // Not triggered yet: the initial existence probe.
                return false;
            }
            let polls = self.polls.fetch_add(1, Ordering::SeqCst) + 1;
            polls >= self.appear_after
        }

        fn trigger(&self, _order_id: i32, _kind: ArtifactKind) -> AppResult<()> {
            self.triggers.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn fast_config() -> PollerConfig {
        PollerConfig {
            interval: Duration::from_secs(1),
            max_attempts: 90,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn present_artifact_returns_without_polling() {
        let store = ScriptedStore::already_present();
        let outcome = wait_for_artifact(
            &store,
            1,
            ArtifactKind::BoxPdf,
            &fast_config(),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

        assert_eq!(outcome, PollOutcome::Ready { attempts: 0 });
        assert_eq!(store.triggers.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn artifact_appearing_mid_poll_is_ready() {
        let store = ScriptedStore::appearing_after(5);
        let outcome = wait_for_artifact(
            &store,
            1,
            ArtifactKind::BoxPdf,
            &fast_config(),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

        assert_eq!(outcome, PollOutcome::Ready { attempts: 5 });
        assert_eq!(store.triggers.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn bound_exhaustion_times_out_after_exact_attempts() {
        let store = ScriptedStore::never_appearing();
        let outcome = wait_for_artifact(
            &store,
            1,
            ArtifactKind::Label,
            &fast_config(),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

        assert_eq!(outcome, PollOutcome::TimedOut);
        assert_eq!(store.polls.load(Ordering::SeqCst), 90);
        assert_eq!(store.triggers.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_aborts_the_wait() {
        let store = ScriptedStore::never_appearing();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let outcome =
            wait_for_artifact(&store, 1, ArtifactKind::Label, &fast_config(), &cancel)
                .await
                .unwrap();

        assert_eq!(outcome, PollOutcome::Cancelled);
    }
}
