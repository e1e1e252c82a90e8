// SPDX-FileCopyrightText: 2026 Gripe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Triage state machine.
//!
//! Tracks distinct voters per delivered message and drives the one-way
//! `Voting -> Escalated` transition. Votes for a given message are
//! serialized by the board mutex in arrival order; the transition is
//! guarded by observing `Voting` and flipping to `Escalated` before the
//! escalation sender is invoked, so a burst of votes crossing the
//! threshold, or a threshold lowered after the fact, cannot create a
//! second issue.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use gripe_config::ConfigHandle;
use gripe_core::{
    EscalationState, GripeError, IssueTracker, MessageRef, TriageChannel, VoteControl, VoteEvent,
    VotePayload,
};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::escalation;

/// Outcome of registering a single vote.
#[derive(Debug)]
pub enum VoteOutcome {
    /// The vote was accepted; the message now has this many distinct voters.
    Counted(usize),
    /// The voter had already voted on this message; nothing changed.
    Duplicate,
    /// The message was already escalated; the vote is ignored.
    AlreadyEscalated,
    /// This vote crossed the threshold and triggered the escalation
    /// task. The handle is awaited by tests and shutdown paths only.
    Escalated(tokio::task::JoinHandle<()>),
}

/// Per-message triage state. `voters` only grows; once `Escalated` the
/// state is terminal and the entry is never mutated again.
struct TriageMessage {
    voters: BTreeSet<String>,
    state: EscalationState,
}

impl TriageMessage {
    /// Seeds the voter set from the control payload. This is what makes
    /// pre-restart votes count: the payload is the only vote state that
    /// survives a process restart.
    fn seeded(payload: &VotePayload) -> Self {
        Self {
            voters: payload.voters.iter().cloned().collect(),
            state: EscalationState::Voting,
        }
    }
}

/// The triage state machine over all delivered messages.
pub struct TriageBoard {
    channel: Arc<dyn TriageChannel>,
    tracker: Arc<dyn IssueTracker>,
    config: ConfigHandle,
    messages: Mutex<HashMap<MessageRef, TriageMessage>>,
}

impl TriageBoard {
    pub fn new(
        channel: Arc<dyn TriageChannel>,
        tracker: Arc<dyn IssueTracker>,
        config: ConfigHandle,
    ) -> Self {
        Self {
            channel,
            tracker,
            config,
            messages: Mutex::new(HashMap::new()),
        }
    }

    /// Registers one moderator vote.
    ///
    /// Idempotent per voter: a repeated vote is a no-op no matter how
    /// many times it is cast. After every accepted vote the count is
    /// compared against the *current* configured threshold, so an admin
    /// lowering the threshold mid-vote takes effect immediately.
    pub async fn register_vote(&self, event: VoteEvent) -> VoteOutcome {
        let mut messages = self.messages.lock().await;
        let entry = messages
            .entry(event.message.clone())
            .or_insert_with(|| TriageMessage::seeded(&event.payload));

        if entry.state == EscalationState::Escalated {
            debug!(voter = %event.voter, "vote on already-escalated message ignored");
            return VoteOutcome::AlreadyEscalated;
        }

        if !entry.voters.insert(event.voter.clone()) {
            debug!(voter = %event.voter, "duplicate vote ignored");
            return VoteOutcome::Duplicate;
        }
        let count = entry.voters.len();

        // Re-render the control label to the new count. The count in
        // memory is authoritative; a rejected no-op edit is cosmetic.
        let control = VoteControl::with_voters(entry.voters.iter().cloned().collect());
        match self.channel.update_control(&event.message, &control).await {
            Ok(()) => {}
            Err(GripeError::UnchangedEdit) => {
                debug!("control edit rejected as unchanged");
            }
            Err(e) => {
                warn!(error = %e, "failed to re-render vote control");
            }
        }

        let config = self.config.snapshot().await;
        if count >= config.triage_threshold as usize {
            // Flip before invoking the sender: the exactly-once guard.
            entry.state = EscalationState::Escalated;
            let handle = escalation::spawn_escalation(
                self.channel.clone(),
                self.tracker.clone(),
                config.issue_repository,
                event.message,
                event.text,
            );
            return VoteOutcome::Escalated(handle);
        }

        VoteOutcome::Counted(count)
    }

    /// Distinct-voter count for a message, if the board has seen it.
    pub async fn vote_count(&self, message: &MessageRef) -> Option<usize> {
        self.messages
            .lock()
            .await
            .get(message)
            .map(|m| m.voters.len())
    }

    /// Triage state of a message, if the board has seen it.
    pub async fn state(&self, message: &MessageRef) -> Option<EscalationState> {
        self.messages.lock().await.get(message).map(|m| m.state)
    }
}
