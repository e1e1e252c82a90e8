// SPDX-FileCopyrightText: 2026 Gripe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP intake gateway for the Gripe triage bot.
//!
//! Exposes `GET /` (liveness) and `POST /feedback` (validate and
//! enqueue). Follows the write-ahead pattern: a submission is durably
//! queued and acknowledged without waiting for chat delivery, so chat
//! outages never lose feedback.

pub mod handlers;
pub mod server;

pub use handlers::{ACK_TEXT, LIVENESS_TEXT};
pub use server::{build_router, start_server, GatewayState};
