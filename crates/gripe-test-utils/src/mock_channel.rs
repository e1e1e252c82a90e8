// SPDX-FileCopyrightText: 2026 Gripe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock chat channel for deterministic testing.
//!
//! `MockChannel` implements [`TriageChannel`] with captured deliveries,
//! control updates, and rewrites, plus injectable failures for
//! exercising the at-least-once dispatch loop.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use gripe_core::traits::{Collaborator, TriageChannel};
use gripe_core::types::{ChannelId, HealthStatus, MessageId, MessageRef, VoteControl};
use gripe_core::GripeError;

/// A delivery captured by [`MockChannel::deliver`].
#[derive(Debug, Clone)]
pub struct Delivery {
    pub channel: ChannelId,
    pub text: String,
    pub control: VoteControl,
    pub message: MessageRef,
}

/// A mock moderation channel for testing.
///
/// Captures everything the pipeline sends and lets tests inject
/// delivery failures or unchanged-edit rejections.
pub struct MockChannel {
    next_message_id: AtomicU64,
    deliveries: Arc<Mutex<Vec<Delivery>>>,
    control_updates: Arc<Mutex<Vec<(MessageRef, VoteControl)>>>,
    rewrites: Arc<Mutex<Vec<(MessageRef, String)>>>,
    failing_deliveries: AtomicU64,
    reject_updates_as_unchanged: std::sync::atomic::AtomicBool,
}

impl MockChannel {
    pub fn new() -> Self {
        Self {
            next_message_id: AtomicU64::new(1),
            deliveries: Arc::new(Mutex::new(Vec::new())),
            control_updates: Arc::new(Mutex::new(Vec::new())),
            rewrites: Arc::new(Mutex::new(Vec::new())),
            failing_deliveries: AtomicU64::new(0),
            reject_updates_as_unchanged: std::sync::atomic::AtomicBool::new(false),
        }
    }

    /// Makes the next `n` calls to `deliver` fail with a channel error.
    pub fn fail_next_deliveries(&self, n: u64) {
        self.failing_deliveries.store(n, Ordering::SeqCst);
    }

    /// Makes every `update_control` call return [`GripeError::UnchangedEdit`].
    pub fn reject_updates_as_unchanged(&self, reject: bool) {
        self.reject_updates_as_unchanged
            .store(reject, Ordering::SeqCst);
    }

    /// All captured deliveries, in order.
    pub async fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries.lock().await.clone()
    }

    /// All captured control updates, in order.
    pub async fn control_updates(&self) -> Vec<(MessageRef, VoteControl)> {
        self.control_updates.lock().await.clone()
    }

    /// All captured terminal rewrites, in order.
    pub async fn rewrites(&self) -> Vec<(MessageRef, String)> {
        self.rewrites.lock().await.clone()
    }
}

impl Default for MockChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Collaborator for MockChannel {
    fn name(&self) -> &str {
        "mock-channel"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, GripeError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl TriageChannel for MockChannel {
    async fn deliver(
        &self,
        channel: ChannelId,
        text: &str,
        control: &VoteControl,
    ) -> Result<MessageRef, GripeError> {
        let remaining = self.failing_deliveries.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failing_deliveries.store(remaining - 1, Ordering::SeqCst);
            return Err(GripeError::channel("simulated delivery failure"));
        }

        let id = self.next_message_id.fetch_add(1, Ordering::SeqCst);
        let message = MessageRef {
            channel,
            message: MessageId(id.to_string()),
        };
        self.deliveries.lock().await.push(Delivery {
            channel,
            text: text.to_string(),
            control: control.clone(),
            message: message.clone(),
        });
        Ok(message)
    }

    async fn update_control(
        &self,
        message: &MessageRef,
        control: &VoteControl,
    ) -> Result<(), GripeError> {
        if self.reject_updates_as_unchanged.load(Ordering::SeqCst) {
            return Err(GripeError::UnchangedEdit);
        }
        self.control_updates
            .lock()
            .await
            .push((message.clone(), control.clone()));
        Ok(())
    }

    async fn rewrite(&self, message: &MessageRef, text: &str) -> Result<(), GripeError> {
        self.rewrites
            .lock()
            .await
            .push((message.clone(), text.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn deliver_captures_and_assigns_sequential_ids() {
        let channel = MockChannel::new();
        let control = VoteControl::fresh();

        let a = channel
            .deliver(ChannelId(-1), "first", &control)
            .await
            .unwrap();
        let b = channel
            .deliver(ChannelId(-1), "second", &control)
            .await
            .unwrap();

        assert_ne!(a, b);
        let deliveries = channel.deliveries().await;
        assert_eq!(deliveries.len(), 2);
        assert_eq!(deliveries[0].text, "first");
    }

    #[tokio::test]
    async fn injected_failures_are_consumed_in_order() {
        let channel = MockChannel::new();
        channel.fail_next_deliveries(2);
        let control = VoteControl::fresh();

        assert!(channel.deliver(ChannelId(-1), "x", &control).await.is_err());
        assert!(channel.deliver(ChannelId(-1), "x", &control).await.is_err());
        assert!(channel.deliver(ChannelId(-1), "x", &control).await.is_ok());
        assert_eq!(channel.deliveries().await.len(), 1);
    }

    #[tokio::test]
    async fn unchanged_rejection_is_togglable() {
        let channel = MockChannel::new();
        let msg = channel
            .deliver(ChannelId(-1), "x", &VoteControl::fresh())
            .await
            .unwrap();

        channel.reject_updates_as_unchanged(true);
        assert!(matches!(
            channel.update_control(&msg, &VoteControl::fresh()).await,
            Err(GripeError::UnchangedEdit)
        ));

        channel.reject_updates_as_unchanged(false);
        assert!(channel.update_control(&msg, &VoteControl::fresh()).await.is_ok());
        assert_eq!(channel.control_updates().await.len(), 1);
    }
}
