// SPDX-FileCopyrightText: 2026 Gripe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Escalation sender: forwards a vote-approved message to the issue
//! tracker and rewrites it to its terminal display.
//!
//! The tracker call runs on its own spawned task so a slow network call
//! never stalls vote processing or dispatch. There is no retry and no
//! cancellation bound on the call; a failure is fatal to this single
//! escalation flow only.

use std::sync::Arc;

use gripe_core::{token, GripeError, IssueReference, IssueTracker, MessageRef, TriageChannel};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::render;

/// Creates an issue titled with a fresh random token and rewrites the
/// source message with the issue link. The rewrite is irreversible.
pub async fn escalate(
    channel: &dyn TriageChannel,
    tracker: &dyn IssueTracker,
    repository: &str,
    message: &MessageRef,
    body: &str,
) -> Result<IssueReference, GripeError> {
    let title = token::title_token();
    let issue = tracker.create_issue(repository, &title, body).await?;
    channel
        .rewrite(message, &render::render_escalated(&issue))
        .await?;
    Ok(issue)
}

/// Runs [`escalate`] off the main scheduling path.
///
/// The returned handle is only awaited by tests and shutdown paths; the
/// task logs its own outcome.
pub fn spawn_escalation(
    channel: Arc<dyn TriageChannel>,
    tracker: Arc<dyn IssueTracker>,
    repository: String,
    message: MessageRef,
    body: String,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        match escalate(
            channel.as_ref(),
            tracker.as_ref(),
            &repository,
            &message,
            &body,
        )
        .await
        {
            Ok(issue) => {
                info!(url = %issue.url, title = %issue.title, "feedback escalated");
            }
            Err(e) => {
                // No retry and no re-queue: the message keeps its vote
                // control and this flow ends here.
                error!(error = %e, "escalation failed");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gripe_core::{ChannelId, MessageId};
    use gripe_test_utils::{MockChannel, MockTracker};

    fn message_ref() -> MessageRef {
        MessageRef {
            channel: ChannelId(-100),
            message: MessageId("1".into()),
        }
    }

    #[tokio::test]
    async fn escalate_creates_issue_and_rewrites_message() {
        let channel = MockChannel::new();
        let tracker = MockTracker::new();

        let issue = escalate(&channel, &tracker, "octo/feedback", &message_ref(), "body text")
            .await
            .unwrap();

        assert_eq!(issue.title.len(), token::TOKEN_LEN);
        assert_eq!(issue.url, "https://github.com/octo/feedback/issues/1");

        let created = tracker.created().await;
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].body, "body text");

        let rewrites = channel.rewrites().await;
        assert_eq!(rewrites.len(), 1);
        assert!(rewrites[0].1.contains(&issue.url));
    }

    #[tokio::test]
    async fn tracker_failure_leaves_message_untouched() {
        let channel = MockChannel::new();
        let tracker = MockTracker::new();
        tracker.fail(true);

        let result = escalate(&channel, &tracker, "octo/feedback", &message_ref(), "body").await;
        assert!(matches!(result, Err(GripeError::Tracker { .. })));
        assert!(channel.rewrites().await.is_empty());
    }

    #[tokio::test]
    async fn spawned_escalation_swallows_its_own_failure() {
        let channel = Arc::new(MockChannel::new());
        let tracker = Arc::new(MockTracker::new());
        tracker.fail(true);

        let handle = spawn_escalation(
            channel.clone(),
            tracker.clone(),
            "octo/feedback".into(),
            message_ref(),
            "body".into(),
        );
        // The task logs the failure and completes without panicking.
        handle.await.unwrap();
        assert_eq!(tracker.created_count().await, 0);
    }
}
