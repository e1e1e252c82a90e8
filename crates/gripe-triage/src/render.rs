// SPDX-FileCopyrightText: 2026 Gripe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Feedback message rendering.
//!
//! One rendering path per feedback kind via the closed
//! [`FeedbackKind`] variant, a fixed HTML template for the moderation
//! channel, and the terminal display written after escalation.

use gripe_core::{FeedbackKind, FeedbackRecord, IssueReference};

/// Icon prefix for a feedback kind.
pub fn icon(kind: &FeedbackKind) -> &'static str {
    match kind {
        FeedbackKind::Bug => "🐞",
        FeedbackKind::Suggestion => "🤔",
        FeedbackKind::Other(_) => "📝",
    }
}

/// Renders a feedback record into the moderation channel message.
///
/// Contact and location are user-controlled, so they are HTML-escaped
/// before being placed inside the `<code>` spans.
pub fn render_feedback(record: &FeedbackRecord) -> String {
    format!(
        "{} <b>Feedback</b>\n\n\
         <b>User</b>: <code>{}</code>\n\
         <b>Page</b>: <code>{}</code>\n\n\
         {}",
        icon(&record.kind),
        escape_html(&record.contact),
        escape_html(&record.location),
        escape_html(&record.body),
    )
}

/// Renders the terminal display for an escalated message.
pub fn render_escalated(issue: &IssueReference) -> String {
    format!(
        "New issue available:\n<a href=\"{}\">{}</a>.",
        issue.url, issue.title
    )
}

/// Minimal HTML escaping for the chat platform's HTML parse mode.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
