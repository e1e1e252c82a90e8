// SPDX-FileCopyrightText: 2026 Gripe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Update dispatching: vote callbacks and the polling loop.

use std::sync::Arc;

use gripe_config::ConfigHandle;
use gripe_core::types::{ChannelId, MessageId, MessageRef, VoteEvent, VotePayload};
use gripe_triage::{TriageBoard, VoteOutcome};
use teloxide::prelude::*;
use tracing::{debug, info, warn};

use crate::commands::{self, AdminCommand};

/// Parses callback data into a triage vote payload.
///
/// Returns `None` for unparseable data and for payloads of another
/// mode; those clicks belong to other controls sharing the group and
/// are not ours to acknowledge.
fn triage_payload(data: &str) -> Option<VotePayload> {
    let payload: VotePayload = match serde_json::from_str(data) {
        Ok(payload) => payload,
        Err(e) => {
            debug!(error = %e, "ignoring unparseable callback data");
            return None;
        }
    };
    if !payload.is_triage() {
        debug!(mode = %payload.mode, "ignoring non-triage callback");
        return None;
    }
    Some(payload)
}

/// Voter identity for the triage board: the username when set, the
/// numeric user id otherwise. Usernames are optional on Telegram.
fn voter_id(username: Option<&str>, id: teloxide::types::UserId) -> String {
    match username {
        Some(name) => name.to_string(),
        None => id.to_string(),
    }
}

/// Handles a click on a vote button.
pub async fn handle_vote(
    bot: Bot,
    query: CallbackQuery,
    board: Arc<TriageBoard>,
) -> ResponseResult<()> {
    let Some(payload) = query.data.as_deref().and_then(triage_payload) else {
        return Ok(());
    };

    // An inaccessible message has no text to escalate from.
    let Some(message) = query.regular_message() else {
        warn!("vote on an inaccessible message ignored");
        return Ok(());
    };

    let voter = voter_id(query.from.username.as_deref(), query.from.id);

    let event = VoteEvent {
        message: MessageRef {
            channel: ChannelId(message.chat.id.0),
            message: MessageId(message.id.0.to_string()),
        },
        voter,
        payload,
        text: message.text().unwrap_or_default().to_string(),
    };

    let answer = match board.register_vote(event).await {
        VoteOutcome::Counted(_) | VoteOutcome::Escalated(_) => Some("Thank you for your vote!"),
        VoteOutcome::Duplicate => Some("You have already voted."),
        VoteOutcome::AlreadyEscalated => None,
    };

    let mut request = bot.answer_callback_query(query.id);
    if let Some(text) = answer {
        request = request.text(text);
    }
    request.await?;
    Ok(())
}

/// Runs long polling until the process shuts down.
///
/// Commands and vote callbacks are handled; every other update kind is
/// silently ignored.
pub async fn run_polling(bot: Bot, board: Arc<TriageBoard>, config: ConfigHandle) {
    info!("starting Telegram long polling");

    let tree = dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<AdminCommand>()
                .endpoint(commands::handle_command),
        )
        .branch(Update::filter_callback_query().endpoint(handle_vote));

    Dispatcher::builder(bot, tree)
        .dependencies(dptree::deps![board, config])
        .default_handler(|_| async {})
        .build()
        .dispatch()
        .await;
}
