// SPDX-FileCopyrightText: 2026 Gripe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Triage pipeline: rotation dispatch, vote tracking, and escalation.
//!
//! This crate is platform-agnostic. It drives the [`TriageChannel`] and
//! [`IssueTracker`] traits from `gripe-core`; the Telegram and GitHub
//! adapters plug in behind those traits.
//!
//! [`TriageChannel`]: gripe_core::TriageChannel
//! [`IssueTracker`]: gripe_core::IssueTracker

pub mod board;
pub mod dispatcher;
pub mod escalation;
pub mod render;

pub use board::{TriageBoard, VoteOutcome};
pub use dispatcher::RotationDispatcher;
