// SPDX-FileCopyrightText: 2026 Gripe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Issue tracker trait.

use async_trait::async_trait;

use crate::error::GripeError;
use crate::traits::collaborator::Collaborator;
use crate::types::IssueReference;

/// Adapter for the external issue tracker escalations are forwarded to.
#[async_trait]
pub trait IssueTracker: Collaborator {
    /// Creates an issue in `repository` (a string of the form
    /// `"owner/name"`) and returns its reference.
    ///
    /// There is no retry on failure; the caller's escalation flow fails
    /// and that is the end of it.
    async fn create_issue(
        &self,
        repository: &str,
        title: &str,
        body: &str,
    ) -> Result<IssueReference, GripeError>;
}
