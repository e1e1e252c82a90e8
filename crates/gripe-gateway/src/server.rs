// SPDX-FileCopyrightText: 2026 Gripe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intake HTTP server built on axum.
//!
//! Sets up routes and shared state for the gateway and serves until the
//! shutdown token fires.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use gripe_core::GripeError;
use gripe_queue::FeedbackQueue;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// The durable queue submissions are written into.
    pub queue: Arc<FeedbackQueue>,
}

/// Builds the gateway router with all intake routes.
pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route("/", get(handlers::serve_root))
        .route("/feedback", post(handlers::handle_feedback))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds `addr` and serves the intake gateway until `cancel` fires.
pub async fn start_server(
    addr: &str,
    state: GatewayState,
    cancel: CancellationToken,
) -> Result<(), GripeError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| GripeError::Channel {
            message: format!("failed to bind gateway to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("intake gateway listening on {addr}");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await
        .map_err(|e| GripeError::Channel {
            message: format!("gateway server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}
