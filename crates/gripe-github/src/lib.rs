// SPDX-FileCopyrightText: 2026 Gripe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! GitHub issue-tracker adapter for Gripe.
//!
//! Implements [`IssueTracker`] against the GitHub REST API: one POST
//! per escalation, returning the web URL of the created issue.

use std::time::Duration;

use async_trait::async_trait;
use gripe_core::traits::{Collaborator, IssueTracker};
use gripe_core::types::{HealthStatus, IssueReference};
use gripe_core::GripeError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::Deserialize;
use tracing::debug;

/// Base URL for the GitHub REST API.
const API_BASE_URL: &str = "https://api.github.com";

#[derive(Debug, Deserialize)]
struct CreatedIssueResponse {
    number: u64,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    message: String,
}

/// Issue tracker backed by the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHubTracker {
    client: reqwest::Client,
    base_url: String,
}

impl GitHubTracker {
    /// Creates a tracker authenticating with a personal access token.
    pub fn new(token: &str) -> Result<Self, GripeError> {
        if token.is_empty() {
            return Err(GripeError::Config("github token cannot be empty".into()));
        }

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| GripeError::Config(format!("invalid github token: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        // The GitHub API rejects requests without a User-Agent.
        headers.insert(USER_AGENT, HeaderValue::from_static("gripe"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| GripeError::Tracker {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: API_BASE_URL.to_string(),
        })
    }

    /// Overrides the API base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }
}

#[async_trait]
impl Collaborator for GitHubTracker {
    fn name(&self) -> &str {
        "github"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, GripeError> {
        let response = self
            .client
            .get(format!("{}/rate_limit", self.base_url))
            .send()
            .await;
        match response {
            Ok(r) if r.status().is_success() => Ok(HealthStatus::Healthy),
            Ok(r) => Ok(HealthStatus::Unhealthy(format!(
                "GitHub API returned {}",
                r.status()
            ))),
            Err(e) => Ok(HealthStatus::Unhealthy(format!(
                "GitHub API unreachable: {e}"
            ))),
        }
    }
}

#[async_trait]
impl IssueTracker for GitHubTracker {
    async fn create_issue(
        &self,
        repository: &str,
        title: &str,
        body: &str,
    ) -> Result<IssueReference, GripeError> {
        let url = format!("{}/repos/{repository}/issues", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "title": title, "body": body }))
            .send()
            .await
            .map_err(|e| GripeError::Tracker {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ApiErrorResponse>(&text) {
                Ok(api) => format!("GitHub API error ({status}): {}", api.message),
                Err(_) => format!("GitHub API returned {status}: {text}"),
            };
            return Err(GripeError::tracker(message));
        }

        let created: CreatedIssueResponse =
            response.json().await.map_err(|e| GripeError::Tracker {
                message: format!("failed to parse API response: {e}"),
                source: Some(Box::new(e)),
            })?;
        debug!(repository, number = created.number, "issue created");

        Ok(IssueReference {
            title: title.to_string(),
            url: format!("https://github.com/{repository}/issues/{}", created.number),
        })
    }
}
