// SPDX-FileCopyrightText: 2026 Gripe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Admin commands for the moderation group.
//!
//! Every mutation goes through [`ConfigStore::update`], so it is
//! validated and persisted before the confirmation reply is sent. The
//! running dispatcher and triage board pick the new values up on their
//! next read.
//!
//! [`ConfigStore::update`]: gripe_config::ConfigStore::update

use gripe_config::ConfigHandle;
use gripe_core::ChannelId;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use teloxide::utils::command::BotCommands;
use tracing::info;

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "snake_case", description = "Moderation commands:")]
pub enum AdminCommand {
    #[command(description = "register this group as the feedback channel")]
    RegisterGroup,
    #[command(description = "set seconds between feedback dispatches")]
    SetInterval(u64),
    #[command(description = "set the issue repository (owner/name)")]
    SetRepository(String),
    #[command(description = "set the number of votes needed to escalate")]
    SetThreshold(u32),
}

pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: AdminCommand,
    config: ConfigHandle,
) -> ResponseResult<()> {
    let chat_id = msg.chat.id;

    let result = match &cmd {
        AdminCommand::RegisterGroup => {
            config
                .update(|c| c.target_channel = Some(ChannelId(chat_id.0)))
                .await
        }
        AdminCommand::SetInterval(seconds) => {
            config
                .update(|c| c.rotation_interval_seconds = *seconds)
                .await
        }
        AdminCommand::SetRepository(repository) => {
            let repository = repository.clone();
            config.update(|c| c.issue_repository = repository).await
        }
        AdminCommand::SetThreshold(threshold) => {
            config.update(|c| c.triage_threshold = *threshold).await
        }
    };

    let reply = match result {
        Ok(_) => {
            info!(chat_id = chat_id.0, command = ?cmd, "admin command applied");
            match cmd {
                AdminCommand::RegisterGroup => {
                    format!("Group is registered as default: <code>{}</code>", chat_id.0)
                }
                AdminCommand::SetInterval(seconds) => {
                    format!("Rotation interval set to {seconds} seconds.")
                }
                AdminCommand::SetRepository(repository) => {
                    format!("Issues will be filed in <code>{repository}</code>.")
                }
                AdminCommand::SetThreshold(threshold) => {
                    format!("Escalation threshold set to {threshold}.")
                }
            }
        }
        // Validation failure: nothing was persisted.
        Err(e) => format!("Cannot apply setting: {e}"),
    };

    bot.send_message(chat_id, reply)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}
