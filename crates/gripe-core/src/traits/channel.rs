// SPDX-FileCopyrightText: 2026 Gripe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Moderation chat channel trait.

use async_trait::async_trait;

use crate::error::GripeError;
use crate::traits::collaborator::Collaborator;
use crate::types::{ChannelId, MessageRef, VoteControl};

/// Adapter for the moderation chat the pipeline delivers feedback into.
///
/// Implementations connect Gripe to a concrete chat platform; the
/// dispatcher and triage board only ever talk through this trait.
#[async_trait]
pub trait TriageChannel: Collaborator {
    /// Delivers a rendered feedback message with its vote control
    /// attached, returning a reference to the created message.
    async fn deliver(
        &self,
        channel: ChannelId,
        text: &str,
        control: &VoteControl,
    ) -> Result<MessageRef, GripeError>;

    /// Replaces the vote control on a delivered message (label and
    /// payload), leaving the message text untouched.
    ///
    /// Returns [`GripeError::UnchangedEdit`] when the platform rejects
    /// the edit because nothing changed.
    async fn update_control(
        &self,
        message: &MessageRef,
        control: &VoteControl,
    ) -> Result<(), GripeError>;

    /// Rewrites a delivered message to its terminal display, dropping
    /// the vote control. Irreversible.
    async fn rewrite(&self, message: &MessageRef, text: &str) -> Result<(), GripeError>;
}
