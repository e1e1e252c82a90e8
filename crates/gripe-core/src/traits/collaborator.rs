// SPDX-FileCopyrightText: 2026 Gripe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base trait that all collaborator adapters implement.

use async_trait::async_trait;

use crate::error::GripeError;
use crate::types::HealthStatus;

/// The base trait for Gripe collaborator adapters.
///
/// Every collaborator (chat channel, issue tracker) implements this,
/// providing identity and a health probe.
#[async_trait]
pub trait Collaborator: Send + Sync + 'static {
    /// Returns the human-readable name of this collaborator instance.
    fn name(&self) -> &str;

    /// Returns the semantic version of this adapter.
    fn version(&self) -> semver::Version;

    /// Performs a health check and returns the collaborator's current status.
    async fn health_check(&self) -> Result<HealthStatus, GripeError>;
}
