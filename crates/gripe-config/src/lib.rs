// SPDX-FileCopyrightText: 2026 Gripe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Gripe triage bot.
//!
//! Unlike a read-only startup config, this document is live: admin
//! commands mutate it at runtime and every mutation rewrites the whole
//! JSON file. The model is strict (`deny_unknown_fields`) and validated
//! on load and on every update.

pub mod model;
pub mod store;

pub use model::TriageConfig;
pub use store::{ConfigHandle, ConfigStore};
