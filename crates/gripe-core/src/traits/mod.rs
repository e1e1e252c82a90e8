// SPDX-FileCopyrightText: 2026 Gripe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator trait definitions.
//!
//! Collaborators are the external system boundaries the pipeline depends
//! on but does not implement: the moderation chat and the issue tracker.

pub mod channel;
pub mod collaborator;
pub mod tracker;

pub use channel::TriageChannel;
pub use collaborator::Collaborator;
pub use tracker::IssueTracker;
