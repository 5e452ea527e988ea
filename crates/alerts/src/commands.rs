//! Bot command handlers.

use crate::message::format_alert;
use crate::telegram::AlertError;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use teloxide::utils::command::BotCommands;
use tracing::{info, warn};
use whale_core::{find_qualifying, Wei};
use whale_feeds::{FeedError, PriceSource, TransactionSource};

/// Bot commands.
#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "Show the latest large transaction from the watched address")]
    LastTx,
    #[command(description = "Show help")]
    Help,
}

/// Handles inbound command invocations.
///
/// `/lasttx` runs its own single-page fetch-and-filter cycle against the
/// live API; it neither reads nor writes the poller's announcement state.
pub struct CommandHandler {
    bot: Bot,
    source: Arc<dyn TransactionSource>,
    price: Arc<dyn PriceSource>,
    min_value: Wei,
    page_size: u32,
}

impl CommandHandler {
    pub fn new(
        bot: Bot,
        source: Arc<dyn TransactionSource>,
        price: Arc<dyn PriceSource>,
        min_value: Wei,
        page_size: u32,
    ) -> Self {
        Self { bot, source, price, min_value, page_size }
    }

    /// Run the command dispatcher until shutdown.
    pub async fn run(self: Arc<Self>) {
        let bot = self.bot.clone();
        let handler = Update::filter_message().filter_command::<Command>().endpoint(
            move |bot: Bot, msg: Message, cmd: Command| {
                let this = Arc::clone(&self);
                async move { this.handle(bot, msg, cmd).await }
            },
        );

        Dispatcher::builder(bot, handler)
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    }

    async fn handle(&self, bot: Bot, msg: Message, cmd: Command) -> Result<(), AlertError> {
        match cmd {
            Command::LastTx => self.reply_last_tx(&bot, &msg).await,
            Command::Help => {
                bot.send_message(msg.chat.id, Command::descriptions().to_string())
                    .await?;
                Ok(())
            }
        }
    }

    /// The synchronous path always replies, even on failure: either a
    /// formatted summary, an explicit "none found", or an error notice.
    async fn reply_last_tx(&self, bot: &Bot, msg: &Message) -> Result<(), AlertError> {
        info!(chat = msg.chat.id.0, "handling /lasttx");

        let page = match self.source.transaction_page(1, self.page_size).await {
            Ok(page) => page,
            Err(e) => {
                if e.is_soft() {
                    info!("lasttx: Etherscan reported no data: {e}");
                } else {
                    warn!("lasttx fetch failed: {e}");
                }
                bot.send_message(msg.chat.id, fetch_failure_reply(&e)).await?;
                return Ok(());
            }
        };

        let Some(tx) = find_qualifying(&page, self.min_value) else {
            bot.send_message(msg.chat.id, "No transactions found above the threshold.")
                .await?;
            return Ok(());
        };

        match self.price.eth_usd_price().await {
            Ok(price) => {
                bot.send_message(msg.chat.id, format_alert(tx, price))
                    .parse_mode(ParseMode::Html)
                    .await?;
            }
            Err(e) => {
                warn!("lasttx price fetch failed: {e}");
                bot.send_message(msg.chat.id, "Could not fetch the ETH price, try again later.")
                    .await?;
            }
        }
        Ok(())
    }
}

/// Reply for a failed page fetch. The API answering 2xx with an error
/// status in the body means there is nothing to report, not that the
/// fetch is broken, and the two cases read differently to the user.
fn fetch_failure_reply(err: &FeedError) -> &'static str {
    if err.is_soft() {
        "No transactions found for this address."
    } else {
        "Could not reach Etherscan, try again later."
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_soft_failure_reads_as_none_found() {
        let err = FeedError::Upstream("No transactions found".to_string());
        assert_eq!(fetch_failure_reply(&err), "No transactions found for this address.");
    }

    #[test]
    fn test_hard_failures_read_as_unreachable() {
        let parse = FeedError::Parse("bad json".to_string());
        assert_eq!(fetch_failure_reply(&parse), "Could not reach Etherscan, try again later.");

        let status = FeedError::Status(reqwest::StatusCode::FORBIDDEN);
        assert_eq!(fetch_failure_reply(&status), "Could not reach Etherscan, try again later.");
    }
}
