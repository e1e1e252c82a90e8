// SPDX-FileCopyrightText: 2026 Gripe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model for the Gripe triage bot.
//!
//! The struct uses `#[serde(deny_unknown_fields)]` to reject
//! unrecognized config keys at startup, providing actionable error
//! messages instead of silently ignored settings.

use gripe_core::{ChannelId, GripeError};
use serde::{Deserialize, Serialize};

/// Shared, live-mutable settings read by the dispatcher and triage
/// board and written by admin commands.
///
/// Loaded at startup, mutated in place through [`ConfigStore`], and
/// persisted in full after every mutation.
///
/// [`ConfigStore`]: crate::ConfigStore
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TriageConfig {
    /// Number of distinct moderator votes required to escalate. Must be >= 1.
    #[serde(default = "default_threshold")]
    pub triage_threshold: u32,

    /// Seconds between rotation dispatch cycles. Must be > 0. Re-read
    /// at the start of every cycle, so a live change takes effect on
    /// the next one.
    #[serde(default = "default_interval")]
    pub rotation_interval_seconds: u64,

    /// Issue tracker repository in `"owner/name"` form.
    #[serde(default)]
    pub issue_repository: String,

    /// The moderation channel feedback is delivered into. `None` until
    /// a moderator runs the register command; the dispatcher idles
    /// without it.
    #[serde(default)]
    pub target_channel: Option<ChannelId>,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            triage_threshold: default_threshold(),
            rotation_interval_seconds: default_interval(),
            issue_repository: String::new(),
            target_channel: None,
            log_level: default_log_level(),
        }
    }
}

fn default_threshold() -> u32 {
    3
}

fn default_interval() -> u64 {
    1
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TriageConfig {
    /// Validates value ranges and formats, returning a descriptive
    /// [`GripeError::Config`] on the first violation.
    pub fn validate(&self) -> Result<(), GripeError> {
        if self.triage_threshold < 1 {
            return Err(GripeError::Config(
                "triage_threshold must be at least 1".into(),
            ));
        }
        if self.rotation_interval_seconds == 0 {
            return Err(GripeError::Config(
                "rotation_interval_seconds must be greater than 0".into(),
            ));
        }
        if !self.issue_repository.is_empty() && !is_owner_name(&self.issue_repository) {
            return Err(GripeError::Config(format!(
                "issue_repository must look like \"owner/name\", got \"{}\"",
                self.issue_repository
            )));
        }
        Ok(())
    }
}

/// Checks the `"owner/name"` shape: exactly one slash, both parts non-empty.
pub fn is_owner_name(repository: &str) -> bool {
    match repository.split_once('/') {
        Some((owner, name)) => {
            !owner.is_empty() && !name.is_empty() && !name.contains('/')
        }
        None => false,
    }
}
