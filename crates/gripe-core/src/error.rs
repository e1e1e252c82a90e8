// SPDX-FileCopyrightText: 2026 Gripe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Gripe triage bot.

use thiserror::Error;

/// The primary error type used across all Gripe collaborator traits and
/// core operations.
///
/// Each pipeline component owns one error class; there is no centralized
/// error channel. A failed escalation, for example, is fatal to that
/// single escalation flow only, never to the process.
#[derive(Debug, Error)]
pub enum GripeError {
    /// Configuration errors (unreadable file, invalid JSON, out-of-range values).
    #[error("configuration error: {0}")]
    Config(String),

    /// A submission failed validation (missing fields, malformed JSON).
    /// Nothing is enqueued for these.
    #[error("invalid submission: {0}")]
    Validation(String),

    /// Durable queue errors (permission, encoding, or I/O failure).
    #[error("queue error: {message}")]
    Queue {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Chat channel errors (delivery failure, edit failure, bad identifiers).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The channel rejected an edit because the rendered content did not
    /// change. Benign transport artifact; the authoritative vote count
    /// lives in process memory, so callers swallow this variant.
    #[error("edit rejected: message content unchanged")]
    UnchangedEdit,

    /// Issue tracker errors (unreachable, auth failure, unknown repository).
    #[error("issue tracker error: {message}")]
    Tracker {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GripeError {
    /// Build a channel error without an underlying source.
    pub fn channel(message: impl Into<String>) -> Self {
        Self::Channel {
            message: message.into(),
            source: None,
        }
    }

    /// Build a tracker error without an underlying source.
    pub fn tracker(message: impl Into<String>) -> Self {
        Self::Tracker {
            message: message.into(),
            source: None,
        }
    }
}
