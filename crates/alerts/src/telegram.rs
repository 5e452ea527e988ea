//! Telegram bot wrapper.
//!
//! Alerts go to every configured chat id. Telegram offers no way to
//! enumerate the chats a bot can reach, so the broadcast set is explicit
//! configuration rather than discovery. The "presence" line is the bot's
//! short description, pushed through the raw Bot API.

use crate::commands::Command;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use teloxide::utils::command::BotCommands;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors from publishing to Telegram. Never fatal: a failed send or
/// status push is logged and the next tick proceeds.
#[derive(Debug, Error)]
pub enum AlertError {
    #[error("Telegram API error: {0}")]
    Api(#[from] teloxide::RequestError),

    #[error("status update failed: {0}")]
    StatusUpdate(#[from] reqwest::Error),
}

/// Bot handle plus the configured broadcast chats.
pub struct TelegramBot {
    bot: Bot,
    chat_ids: Vec<ChatId>,
    http: reqwest::Client,
}

impl TelegramBot {
    /// Create a bot for the given token and broadcast chat ids.
    pub fn new(token: &str, chat_ids: Vec<i64>) -> Self {
        Self {
            bot: Bot::new(token),
            chat_ids: chat_ids.into_iter().map(ChatId).collect(),
            http: reqwest::Client::new(),
        }
    }

    /// The underlying bot, for the command dispatcher.
    pub fn bot(&self) -> &Bot {
        &self.bot
    }

    /// Register the command menu once at startup.
    pub async fn register_commands(&self) -> Result<(), AlertError> {
        self.bot.set_my_commands(Command::bot_commands()).await?;
        Ok(())
    }

    /// Send an HTML message to every configured chat. A failure for one
    /// chat is logged and does not stop delivery to the others. Returns
    /// how many chats received the message.
    pub async fn broadcast(&self, text: &str) -> usize {
        let mut sent = 0;
        for chat_id in &self.chat_ids {
            match self
                .bot
                .send_message(*chat_id, text)
                .parse_mode(ParseMode::Html)
                .await
            {
                Ok(_) => sent += 1,
                Err(e) => warn!(chat = chat_id.0, "failed to send alert: {e}"),
            }
        }
        sent
    }

    /// Push the short status line (the bot's short description) via the
    /// Bot API.
    pub async fn set_status(&self, text: &str) -> Result<(), AlertError> {
        let url = status_endpoint(self.bot.token());
        let params = [("short_description", text)];

        let response = self.http.post(&url).form(&params).send().await?;
        if !response.status().is_success() {
            warn!("Telegram returned non-success status for presence update: {}", response.status());
        } else {
            debug!("presence updated");
        }
        Ok(())
    }
}

fn status_endpoint(token: &str) -> String {
    format!("https://api.telegram.org/bot{token}/setMyShortDescription")
}
