// SPDX-FileCopyrightText: 2026 Gripe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `gripe healthcheck` command implementation.
//!
//! Probes the intake root endpoint of a locally running instance.
//! Intended as a container healthcheck: exits zero iff the server
//! answers 200.

use std::time::Duration;

use gripe_core::GripeError;

pub async fn run_healthcheck(port: u16) -> Result<(), GripeError> {
    let url = format!("http://127.0.0.1:{port}/");
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .map_err(|e| GripeError::Internal(format!("failed to build HTTP client: {e}")))?;

    let response = client.get(&url).send().await.map_err(|e| {
        GripeError::Channel {
            message: format!("healthcheck request to {url} failed: {e}"),
            source: Some(Box::new(e)),
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(GripeError::channel(format!(
            "healthcheck got {status} from {url}"
        )));
    }
    Ok(())
}
