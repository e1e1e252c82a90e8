// SPDX-FileCopyrightText: 2026 Gripe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rotation dispatcher.
//!
//! Drains the durable queue into the moderation channel, one entry per
//! cycle. The queue entry is removed only after the channel confirms
//! delivery, so a crash or send failure re-dispatches the entry on a
//! later cycle (at-least-once).

use std::sync::Arc;

use gripe_config::ConfigHandle;
use gripe_core::{GripeError, MessageRef, TriageChannel, VoteControl};
use gripe_queue::FeedbackQueue;
use tokio::time::{Duration, sleep};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::render;

/// Pulls pending feedback entries into the moderation channel on a
/// fixed rotation interval.
pub struct RotationDispatcher {
    queue: Arc<FeedbackQueue>,
    channel: Arc<dyn TriageChannel>,
    config: ConfigHandle,
}

impl RotationDispatcher {
    pub fn new(
        queue: Arc<FeedbackQueue>,
        channel: Arc<dyn TriageChannel>,
        config: ConfigHandle,
    ) -> Self {
        Self {
            queue,
            channel,
            config,
        }
    }

    /// Runs the rotation loop until `cancel` fires.
    ///
    /// The interval is re-read from config every cycle, so an admin
    /// change takes effect on the next sleep. Cancellation during the
    /// sleep returns immediately; an in-flight cycle always finishes,
    /// keeping the deliver-then-remove pair intact.
    pub async fn run(&self, cancel: CancellationToken) {
        info!("rotation dispatcher started");
        loop {
            if let Err(e) = self.run_cycle().await {
                error!(error = %e, "rotation cycle failed; entry stays queued");
            }

            let interval = self.config.snapshot().await.rotation_interval_seconds;
            tokio::select! {
                _ = sleep(Duration::from_secs(interval)) => {}
                _ = cancel.cancelled() => {
                    info!("rotation dispatcher stopped");
                    return;
                }
            }
        }
    }

    /// Dispatches at most one pending entry.
    ///
    /// Returns the delivered message reference, or `None` when there is
    /// nothing to do (empty queue, or no target channel registered yet).
    pub async fn run_cycle(&self) -> Result<Option<MessageRef>, GripeError> {
        let config = self.config.snapshot().await;
        let Some(target) = config.target_channel else {
            debug!("no target channel registered; skipping cycle");
            return Ok(None);
        };

        let Some((id, record)) = self.queue.peek_pending().await? else {
            return Ok(None);
        };

        let text = render::render_feedback(&record);
        let message = self
            .channel
            .deliver(target, &text, &VoteControl::fresh())
            .await?;

        // Removal comes after confirmed delivery. A failure here leaves
        // the entry queued and it will be dispatched again.
        self.queue.remove(&id).await?;
        debug!(entry = %id.0, channel = target.0, "entry dispatched");
        Ok(Some(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gripe_config::ConfigStore;
    use gripe_core::{ChannelId, FeedbackKind, FeedbackRecord};
    use gripe_test_utils::MockChannel;

    fn record(body: &str) -> FeedbackRecord {
        FeedbackRecord {
            kind: FeedbackKind::Bug,
            contact: "@reporter".into(),
            location: "/checkout".into(),
            body: body.into(),
        }
    }

    struct Fixture {
        queue: Arc<FeedbackQueue>,
        channel: Arc<MockChannel>,
        config: ConfigHandle,
        dispatcher: RotationDispatcher,
        _dir: tempfile::TempDir,
    }

    async fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let queue = Arc::new(FeedbackQueue::new(dir.path().join("rotation")));
        queue.ensure_dir().await.unwrap();
        let config: ConfigHandle = Arc::new(
            ConfigStore::load(dir.path().join("config.json"))
                .await
                .unwrap(),
        );
        config
            .update(|c| c.target_channel = Some(ChannelId(-100200)))
            .await
            .unwrap();

        let channel = Arc::new(MockChannel::new());
        let dispatcher =
            RotationDispatcher::new(queue.clone(), channel.clone(), config.clone());
        Fixture {
            queue,
            channel,
            config,
            dispatcher,
            _dir: dir,
        }
    }

    #[tokio::test]
    async fn cycle_delivers_and_removes_one_entry() {
        let fx = fixture().await;
        fx.queue.enqueue(&record("cart is broken")).await.unwrap();

        let delivered = fx.dispatcher.run_cycle().await.unwrap();
        assert!(delivered.is_some());
        assert_eq!(fx.queue.pending_count().await.unwrap(), 0);

        let deliveries = fx.channel.deliveries().await;
        assert_eq!(deliveries.len(), 1);
        assert_eq!(deliveries[0].channel, ChannelId(-100200));
        assert!(deliveries[0].text.contains("cart is broken"));
        assert_eq!(deliveries[0].control.label, "New issue");
    }

    #[tokio::test]
    async fn cycle_is_a_noop_on_an_empty_queue() {
        let fx = fixture().await;
        assert!(fx.dispatcher.run_cycle().await.unwrap().is_none());
        assert!(fx.channel.deliveries().await.is_empty());
    }

    #[tokio::test]
    async fn cycle_skips_until_a_target_channel_is_registered() {
        let fx = fixture().await;
        fx.config.update(|c| c.target_channel = None).await.unwrap();
        fx.queue.enqueue(&record("lost feedback?")).await.unwrap();

        assert!(fx.dispatcher.run_cycle().await.unwrap().is_none());
        assert_eq!(fx.queue.pending_count().await.unwrap(), 1);

        fx.config
            .update(|c| c.target_channel = Some(ChannelId(-7)))
            .await
            .unwrap();
        assert!(fx.dispatcher.run_cycle().await.unwrap().is_some());
        assert_eq!(fx.queue.pending_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn failed_delivery_keeps_the_entry_queued() {
        let fx = fixture().await;
        fx.queue.enqueue(&record("flaky network")).await.unwrap();
        fx.channel.fail_next_deliveries(2);

        assert!(fx.dispatcher.run_cycle().await.is_err());
        assert_eq!(fx.queue.pending_count().await.unwrap(), 1);
        assert!(fx.dispatcher.run_cycle().await.is_err());
        assert_eq!(fx.queue.pending_count().await.unwrap(), 1);

        // Third attempt succeeds and only then is the entry removed.
        assert!(fx.dispatcher.run_cycle().await.unwrap().is_some());
        assert_eq!(fx.queue.pending_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn one_entry_per_cycle() {
        let fx = fixture().await;
        fx.queue.enqueue(&record("first")).await.unwrap();
        fx.queue.enqueue(&record("second")).await.unwrap();

        fx.dispatcher.run_cycle().await.unwrap();
        assert_eq!(fx.channel.deliveries().await.len(), 1);
        assert_eq!(fx.queue.pending_count().await.unwrap(), 1);

        fx.dispatcher.run_cycle().await.unwrap();
        assert_eq!(fx.channel.deliveries().await.len(), 2);
        assert_eq!(fx.queue.pending_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn run_stops_on_cancellation() {
        let fx = fixture().await;
        let cancel = CancellationToken::new();
        let dispatcher = RotationDispatcher::new(
            fx.queue.clone(),
            fx.channel.clone(),
            fx.config.clone(),
        );

        let token = cancel.clone();
        let handle = tokio::spawn(async move { dispatcher.run(token).await });
        // Give the loop a moment to enter its sleep, then cancel.
        sleep(Duration::from_millis(50)).await;
        cancel.cancel();
        handle.await.unwrap();
    }
}
