// SPDX-FileCopyrightText: 2026 Gripe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Gripe integration tests.
//!
//! Mock implementations of the collaborator traits with captured calls
//! and injectable failures.

pub mod mock_channel;
pub mod mock_tracker;

pub use mock_channel::{Delivery, MockChannel};
pub use mock_tracker::{CreatedIssue, MockTracker};
