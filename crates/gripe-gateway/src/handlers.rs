// SPDX-FileCopyrightText: 2026 Gripe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the feedback intake gateway.
//!
//! Handles `GET /` (liveness text) and `POST /feedback` (validate and
//! enqueue). Intake is deliberately decoupled from delivery: a valid
//! submission is acknowledged as soon as it is durably queued, chat
//! outages notwithstanding.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use gripe_core::{FeedbackRecord, GripeError};
use tracing::{info, warn};

use crate::server::GatewayState;

/// Liveness text served at `GET /`; also the healthcheck probe target.
pub const LIVENESS_TEXT: &str = "Feedback processing server is working.";

/// Acknowledgement body for a successfully queued submission.
pub const ACK_TEXT: &str = "Feedback processed";

/// GET /
///
/// Liveness probe. Always 200.
pub async fn serve_root() -> &'static str {
    LIVENESS_TEXT
}

/// POST /feedback
///
/// Validates the JSON payload and enqueues exactly one record per valid
/// call. The response does not wait for delivery. Duplicate submissions
/// become independent records; no correlation is attempted.
pub async fn handle_feedback(
    State(state): State<GatewayState>,
    body: Bytes,
) -> (StatusCode, String) {
    let record = match serde_json::from_slice::<FeedbackRecord>(&body) {
        Ok(record) => record,
        Err(e) => {
            warn!(error = %e, "rejecting malformed feedback submission");
            return failure(GripeError::Validation(e.to_string()));
        }
    };

    match state.queue.enqueue(&record).await {
        Ok(id) => {
            info!(entry = %id.0, "feedback queued");
            (StatusCode::OK, ACK_TEXT.to_string())
        }
        Err(e) => {
            warn!(error = %e, "failed to enqueue feedback");
            failure(e)
        }
    }
}

/// Maps a pipeline error to the 500 + reason-string contract of the
/// intake endpoint. Nothing was enqueued on any of these paths.
fn failure(err: GripeError) -> (StatusCode, String) {
    let reason = match &err {
        GripeError::Validation(_) => "Incorrect input; unable to send feedback.".to_string(),
        GripeError::Queue { message, .. } if message.starts_with("incorrect permissions") => {
            "Incorrect permissions; unable to send feedback.".to_string()
        }
        _ => "An I/O error occurred; unable to send feedback.".to_string(),
    };
    (StatusCode::INTERNAL_SERVER_ERROR, reason)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_failure_maps_to_input_reason() {
        let (status, reason) = failure(GripeError::Validation("bad".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(reason, "Incorrect input; unable to send feedback.");
    }

    #[test]
    fn permission_failure_maps_to_permission_reason() {
        let err = GripeError::Queue {
            message: "incorrect permissions writing /rot/x.json".into(),
            source: None,
        };
        let (_, reason) = failure(err);
        assert_eq!(reason, "Incorrect permissions; unable to send feedback.");
    }

    #[test]
    fn other_queue_failures_map_to_io_reason() {
        let err = GripeError::Queue {
            message: "I/O failure writing /rot/x.json".into(),
            source: None,
        };
        let (_, reason) = failure(err);
        assert_eq!(reason, "An I/O error occurred; unable to send feedback.");
    }
}
