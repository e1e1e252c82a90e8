// SPDX-FileCopyrightText: 2026 Gripe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across collaborator traits and the Gripe pipeline.

use serde::{Deserialize, Serialize};

/// The kind of a feedback submission.
///
/// Closed set of variants: unknown kind strings are carried verbatim in
/// [`FeedbackKind::Other`] rather than compared inline at every use site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FeedbackKind {
    Bug,
    Suggestion,
    Other(String),
}

impl Default for FeedbackKind {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for FeedbackKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "bug" => Self::Bug,
            "suggestion" => Self::Suggestion,
            _ => Self::Other(value),
        }
    }
}

impl From<FeedbackKind> for String {
    fn from(kind: FeedbackKind) -> Self {
        match kind {
            FeedbackKind::Bug => "bug".to_string(),
            FeedbackKind::Suggestion => "suggestion".to_string(),
            FeedbackKind::Other(value) => value,
        }
    }
}

/// One user-submitted feedback item. Immutable once created.
///
/// The serialized form mirrors the HTTP submission payload, with `body`
/// stored under the wire name `feedback`. This same form is written to
/// disk as a queue entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    /// Submission kind; missing or unknown kinds fall back to `Other`.
    #[serde(default)]
    pub kind: FeedbackKind,
    /// How to reach the submitter (username, email, free text).
    pub contact: String,
    /// Where the feedback was submitted from (page, screen, path).
    pub location: String,
    /// The feedback text itself.
    #[serde(rename = "feedback")]
    pub body: String,
}

/// Unique identifier for a durable queue entry (the on-disk file stem).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(pub String);

/// Opaque identifier for a chat channel (a Telegram chat id, in practice).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(pub i64);

/// Unique identifier for a delivered chat message within its channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

/// Reference to a delivered chat message: channel plus message id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub channel: ChannelId,
    pub message: MessageId,
}

/// Triage state of a delivered message. `Escalated` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscalationState {
    /// Collecting moderator votes.
    Voting,
    /// An issue has been created; the state never leaves this variant.
    Escalated,
}

/// Reference to a created tracker issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueReference {
    /// Short random token used as the issue title.
    pub title: String,
    /// Canonical issue URL.
    pub url: String,
}

/// Data carried inside the vote control itself, round-tripped through
/// the chat platform. A process restart loses any in-flight vote state
/// beyond what the last rendered control recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotePayload {
    /// Control discriminator; always `"triage"` for vote controls.
    pub mode: String,
    /// Voter identifiers recorded in the control.
    #[serde(default)]
    pub voters: Vec<String>,
}

impl VotePayload {
    pub const TRIAGE_MODE: &'static str = "triage";

    /// Payload for a freshly dispatched message: no voters yet.
    pub fn fresh() -> Self {
        Self {
            mode: Self::TRIAGE_MODE.to_string(),
            voters: Vec::new(),
        }
    }

    /// Whether this payload belongs to a triage vote control.
    pub fn is_triage(&self) -> bool {
        self.mode == Self::TRIAGE_MODE
    }
}

/// The interactive control attached to a delivered feedback message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteControl {
    /// Button label, cycling "New issue" / "New issue (N)".
    pub label: String,
    /// Payload round-tripped through the platform.
    pub payload: VotePayload,
}

impl VoteControl {
    /// Control for a freshly dispatched message.
    pub fn fresh() -> Self {
        Self {
            label: Self::label_for(0),
            payload: VotePayload::fresh(),
        }
    }

    /// Control reflecting the given set of voters.
    pub fn with_voters(voters: Vec<String>) -> Self {
        Self {
            label: Self::label_for(voters.len()),
            payload: VotePayload {
                mode: VotePayload::TRIAGE_MODE.to_string(),
                voters,
            },
        }
    }

    fn label_for(count: usize) -> String {
        if count == 0 {
            "New issue".to_string()
        } else {
            format!("New issue ({count})")
        }
    }
}

/// A moderator vote received from the chat platform.
#[derive(Debug, Clone)]
pub struct VoteEvent {
    /// The message the vote was cast on.
    pub message: MessageRef,
    /// Identifier of the voting moderator.
    pub voter: String,
    /// Payload carried by the control at the time of the click.
    pub payload: VotePayload,
    /// Current rendered text of the message (becomes the issue body).
    pub text: String,
}

/// Health status reported by collaborator health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Collaborator is fully operational.
    Healthy,
    /// Collaborator is operational but experiencing issues.
    Degraded(String),
    /// Collaborator is not operational.
    Unhealthy(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_known_strings() {
        assert_eq!(FeedbackKind::from("bug".to_string()), FeedbackKind::Bug);
        assert_eq!(
            FeedbackKind::from("suggestion".to_string()),
            FeedbackKind::Suggestion
        );
        assert_eq!(
            FeedbackKind::from("praise".to_string()),
            FeedbackKind::Other("praise".to_string())
        );
    }

    #[test]
    fn kind_round_trips_through_string() {
        for raw in ["bug", "suggestion", "praise"] {
            let kind = FeedbackKind::from(raw.to_string());
            assert_eq!(String::from(kind), raw);
        }
    }

    #[test]
    fn record_deserializes_from_submission_payload() {
        let json = r#"{
            "kind": "bug",
            "contact": "alice",
            "location": "/home",
            "feedback": "broken button"
        }"#;
        let record: FeedbackRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.kind, FeedbackKind::Bug);
        assert_eq!(record.contact, "alice");
        assert_eq!(record.location, "/home");
        assert_eq!(record.body, "broken button");
    }

    #[test]
    fn record_accepts_missing_kind() {
        let json = r#"{"contact": "bob", "location": "/", "feedback": "hi"}"#;
        let record: FeedbackRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.kind, FeedbackKind::Other(String::new()));
    }

    #[test]
    fn record_rejects_missing_required_field() {
        let json = r#"{"kind": "bug", "contact": "alice"}"#;
        assert!(serde_json::from_str::<FeedbackRecord>(json).is_err());
    }

    #[test]
    fn record_serializes_with_wire_field_names() {
        let record = FeedbackRecord {
            kind: FeedbackKind::Suggestion,
            contact: "carol".into(),
            location: "/settings".into(),
            body: "add dark mode".into(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["kind"], "suggestion");
        assert_eq!(json["feedback"], "add dark mode");
        assert!(json.get("body").is_none());
    }

    #[test]
    fn fresh_control_has_plain_label_and_empty_payload() {
        let control = VoteControl::fresh();
        assert_eq!(control.label, "New issue");
        assert!(control.payload.voters.is_empty());
        assert!(control.payload.is_triage());
    }

    #[test]
    fn control_label_cycles_with_count() {
        let control = VoteControl::with_voters(vec!["a".into(), "b".into()]);
        assert_eq!(control.label, "New issue (2)");
        assert_eq!(control.payload.voters.len(), 2);
    }

    #[test]
    fn vote_payload_round_trips_as_json() {
        let payload = VotePayload {
            mode: "triage".into(),
            voters: vec!["alice".into()],
        };
        let json = serde_json::to_string(&payload).unwrap();
        let parsed: VotePayload = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, payload);
    }

    #[test]
    fn payload_with_foreign_mode_is_not_triage() {
        let payload: VotePayload =
            serde_json::from_str(r#"{"mode": "poll"}"#).unwrap();
        assert!(!payload.is_triage());
        assert!(payload.voters.is_empty());
    }
}
