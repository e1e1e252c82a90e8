// SPDX-FileCopyrightText: 2026 Gripe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Gripe feedback triage bot.
//!
//! This crate provides the shared error type, domain types, random token
//! generation, and the collaborator traits the pipeline components are
//! written against. The concrete chat and tracker adapters implement the
//! traits defined here.

pub mod error;
pub mod token;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::GripeError;
pub use types::{
    ChannelId, EntryId, EscalationState, FeedbackKind, FeedbackRecord, HealthStatus,
    IssueReference, MessageId, MessageRef, VoteControl, VoteEvent, VotePayload,
};

// Re-export collaborator traits at crate root.
pub use traits::{Collaborator, IssueTracker, TriageChannel};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escalation_state_is_two_variant() {
        let voting = EscalationState::Voting;
        let escalated = EscalationState::Escalated;
        assert_ne!(voting, escalated);
    }

    #[test]
    fn message_ref_is_hashable_map_key() {
        use std::collections::HashMap;

        let a = MessageRef {
            channel: ChannelId(-100123),
            message: MessageId("1".into()),
        };
        let b = MessageRef {
            channel: ChannelId(-100123),
            message: MessageId("2".into()),
        };

        let mut map = HashMap::new();
        map.insert(a.clone(), "first");
        map.insert(b, "second");
        assert_eq!(map.len(), 2);
        assert_eq!(map[&a], "first");
    }

    #[test]
    fn collaborator_traits_are_object_safe() {
        fn _assert_channel(_: &dyn TriageChannel) {}
        fn _assert_tracker(_: &dyn IssueTracker) {}
    }
}
