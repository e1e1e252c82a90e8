// SPDX-FileCopyrightText: 2026 Gripe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock issue tracker for deterministic testing.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use gripe_core::traits::{Collaborator, IssueTracker};
use gripe_core::types::{HealthStatus, IssueReference};
use gripe_core::GripeError;

/// An issue creation captured by [`MockTracker::create_issue`].
#[derive(Debug, Clone)]
pub struct CreatedIssue {
    pub repository: String,
    pub title: String,
    pub body: String,
    pub reference: IssueReference,
}

/// A mock issue tracker that counts creations and can be made to fail.
pub struct MockTracker {
    next_number: AtomicU64,
    created: Arc<Mutex<Vec<CreatedIssue>>>,
    failing: AtomicBool,
}

impl MockTracker {
    pub fn new() -> Self {
        Self {
            next_number: AtomicU64::new(1),
            created: Arc::new(Mutex::new(Vec::new())),
            failing: AtomicBool::new(false),
        }
    }

    /// Makes every subsequent `create_issue` call fail.
    pub fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// All captured issue creations, in order.
    pub async fn created(&self) -> Vec<CreatedIssue> {
        self.created.lock().await.clone()
    }

    /// Number of `create_issue` calls that succeeded.
    pub async fn created_count(&self) -> usize {
        self.created.lock().await.len()
    }
}

impl Default for MockTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Collaborator for MockTracker {
    fn name(&self) -> &str {
        "mock-tracker"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, GripeError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl IssueTracker for MockTracker {
    async fn create_issue(
        &self,
        repository: &str,
        title: &str,
        body: &str,
    ) -> Result<IssueReference, GripeError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(GripeError::tracker("simulated tracker outage"));
        }

        let number = self.next_number.fetch_add(1, Ordering::SeqCst);
        let reference = IssueReference {
            title: title.to_string(),
            url: format!("https://github.com/{repository}/issues/{number}"),
        };
        self.created.lock().await.push(CreatedIssue {
            repository: repository.to_string(),
            title: title.to_string(),
            body: body.to_string(),
            reference: reference.clone(),
        });
        Ok(reference)
    }
}
