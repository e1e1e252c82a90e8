// SPDX-FileCopyrightText: 2026 Gripe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram moderation-channel adapter for Gripe.
//!
//! Implements [`TriageChannel`] for the Telegram Bot API via teloxide:
//! feedback goes out as HTML messages with a vote button, votes come
//! back as callback queries, and admin commands mutate the live config.

pub mod commands;
pub mod handler;

use async_trait::async_trait;
use gripe_core::traits::{Collaborator, TriageChannel};
use gripe_core::types::{ChannelId, HealthStatus, MessageId, MessageRef, VoteControl};
use gripe_core::GripeError;
use teloxide::prelude::*;
use teloxide::types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup, ParseMode};

/// Moderation channel backed by a Telegram bot.
pub struct TelegramChannel {
    bot: Bot,
}

impl TelegramChannel {
    /// Creates the adapter from a bot token.
    pub fn new(token: &str) -> Result<Self, GripeError> {
        if token.is_empty() {
            return Err(GripeError::Config(
                "telegram bot token cannot be empty".into(),
            ));
        }
        Ok(Self {
            bot: Bot::new(token),
        })
    }

    /// Returns the underlying teloxide bot, for the update dispatcher.
    pub fn bot(&self) -> &Bot {
        &self.bot
    }
}

/// Renders a vote control as a single-button inline keyboard. The
/// payload rides in `callback_data` and is echoed back on every click.
fn control_markup(control: &VoteControl) -> Result<InlineKeyboardMarkup, GripeError> {
    let data = serde_json::to_string(&control.payload)
        .map_err(|e| GripeError::channel(format!("cannot encode vote payload: {e}")))?;
    Ok(InlineKeyboardMarkup::new([[InlineKeyboardButton::callback(
        control.label.clone(),
        data,
    )]]))
}

/// Splits a [`MessageRef`] into the teloxide chat and message id pair.
fn split_message_ref(
    message: &MessageRef,
) -> Result<(ChatId, teloxide::types::MessageId), GripeError> {
    let id = message
        .message
        .0
        .parse::<i32>()
        .map(teloxide::types::MessageId)
        .map_err(|e| GripeError::channel(format!("invalid message id: {e}")))?;
    Ok((ChatId(message.channel.0), id))
}

/// Maps a teloxide edit failure, distinguishing the Bot API's no-op
/// edit rejection from real failures.
fn map_edit_error(e: teloxide::RequestError) -> GripeError {
    if e.to_string().contains("message is not modified") {
        GripeError::UnchangedEdit
    } else {
        GripeError::Channel {
            message: format!("failed to edit message: {e}"),
            source: Some(Box::new(e)),
        }
    }
}

#[async_trait]
impl Collaborator for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, GripeError> {
        match self.bot.get_me().await {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(format!(
                "Telegram bot unreachable: {e}"
            ))),
        }
    }
}

#[async_trait]
impl TriageChannel for TelegramChannel {
    async fn deliver(
        &self,
        channel: ChannelId,
        text: &str,
        control: &VoteControl,
    ) -> Result<MessageRef, GripeError> {
        let markup = control_markup(control)?;
        let sent = self
            .bot
            .send_message(ChatId(channel.0), text)
            .parse_mode(ParseMode::Html)
            .reply_markup(markup)
            .await
            .map_err(|e| GripeError::Channel {
                message: format!("failed to send message: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(MessageRef {
            channel,
            message: MessageId(sent.id.0.to_string()),
        })
    }

    async fn update_control(
        &self,
        message: &MessageRef,
        control: &VoteControl,
    ) -> Result<(), GripeError> {
        let (chat_id, msg_id) = split_message_ref(message)?;
        let markup = control_markup(control)?;
        self.bot
            .edit_message_reply_markup(chat_id, msg_id)
            .reply_markup(markup)
            .await
            .map_err(map_edit_error)?;
        Ok(())
    }

    async fn rewrite(&self, message: &MessageRef, text: &str) -> Result<(), GripeError> {
        let (chat_id, msg_id) = split_message_ref(message)?;
        self.bot
            .edit_message_text(chat_id, msg_id, text)
            .parse_mode(ParseMode::Html)
            .await
            .map_err(map_edit_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gripe_core::VotePayload;

    #[test]
    fn new_rejects_empty_token() {
        assert!(TelegramChannel::new("").is_err());
    }

    #[test]
    fn new_accepts_valid_token() {
        let channel =
            TelegramChannel::new("123456:ABC-DEF1234ghIkl-zyx57W2v1u123ew11").unwrap();
        assert_eq!(channel.name(), "telegram");
        assert_eq!(channel.version(), semver::Version::new(0, 1, 0));
    }

    #[test]
    fn markup_carries_the_payload_in_callback_data() {
        let control = VoteControl::with_voters(vec!["alice".into()]);
        let markup = control_markup(&control).unwrap();

        let row = &markup.inline_keyboard[0];
        assert_eq!(row.len(), 1);
        assert_eq!(row[0].text, "New issue (1)");

        let teloxide::types::InlineKeyboardButtonKind::CallbackData(data) = &row[0].kind
        else {
            panic!("expected a callback button");
        };
        let payload: VotePayload = serde_json::from_str(data).unwrap();
        assert!(payload.is_triage());
        assert_eq!(payload.voters, vec!["alice".to_string()]);
    }

    #[test]
    fn split_message_ref_parses_numeric_ids() {
        let message = MessageRef {
            channel: ChannelId(-1001234),
            message: MessageId("42".into()),
        };
        let (chat_id, msg_id) = split_message_ref(&message).unwrap();
        assert_eq!(chat_id.0, -1001234);
        assert_eq!(msg_id.0, 42);
    }

    #[test]
    fn split_message_ref_rejects_garbage() {
        let message = MessageRef {
            channel: ChannelId(1),
            message: MessageId("not-a-number".into()),
        };
        assert!(split_message_ref(&message).is_err());
    }
}
