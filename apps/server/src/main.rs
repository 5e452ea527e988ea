//! Whale Watch - Telegram alert bot
//!
//! Polls the Etherscan account API for large transactions from a watched
//! address and announces new ones to the configured Telegram chats.

mod config;

use clap::Parser;
use config::Config;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use whale_alerts::{days_since, format_alert, format_status, CommandHandler, TelegramBot};
use whale_core::Wei;
use whale_feeds::{CoinGeckoClient, EtherscanClient, PriceSource, TransactionSource};
use whale_monitor::{shared_poll_state, PollOutcome, PollState, Poller, PollerConfig, SharedPollState};

/// Whale Watch CLI
#[derive(Parser, Debug)]
#[command(name = "whale-bot")]
#[command(about = "Ethereum whale transaction alert bot", long_about = None)]
struct Args {
    /// Poll tick period in milliseconds. The 2 s default matches the
    /// original deployment and is aggressive for a rate-limited API;
    /// raise it rather than expecting any built-in backoff.
    #[arg(long, default_value_t = 2000)]
    poll_interval_ms: u64,

    /// Presence update period in milliseconds
    #[arg(long, default_value_t = 3000)]
    presence_interval_ms: u64,

    /// Transactions per Etherscan page
    #[arg(long, default_value_t = 100)]
    page_size: u32,

    /// Log level: trace, debug, info, warn, error
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn init_logging(level: &str) {
    let level = match level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

/// Poll tick loop: sweep, and on a genuinely new match fetch the price,
/// format, and broadcast. Every failure is logged and the next tick
/// proceeds independently; announcement state is already committed before
/// publishing starts, so a failed publish is never retried.
async fn run_poll_loop(
    poller: Poller<Arc<EtherscanClient>>,
    price: Arc<CoinGeckoClient>,
    telegram: Arc<TelegramBot>,
    tick: Duration,
) {
    info!("Starting poll loop");

    loop {
        match poller.poll_once().await {
            Ok(PollOutcome::NewMatch(tx)) => {
                info!(hash = %tx.hash, value = %tx.value, "new qualifying transaction");
                match price.eth_usd_price().await {
                    Ok(usd) => {
                        let sent = telegram.broadcast(&format_alert(&tx, usd)).await;
                        info!(chats = sent, "alert published");
                    }
                    Err(e) => warn!("price fetch failed, alert not sent: {e}"),
                }
            }
            Ok(PollOutcome::AlreadyAnnounced) => {
                debug!("latest qualifying transaction already announced")
            }
            Ok(PollOutcome::NoMatch) => debug!("no qualifying transactions this tick"),
            Err(e) if e.is_soft() => info!("Etherscan reported no data: {e}"),
            Err(e) => warn!("transaction sweep failed: {e}"),
        }

        tokio::time::sleep(tick).await;
    }
}

/// Presence tick loop: recompute the status line from the last
/// announcement and the live price. A no-op until something has been
/// announced.
async fn run_presence_loop(
    state: SharedPollState,
    price: Arc<CoinGeckoClient>,
    telegram: Arc<TelegramBot>,
    tick: Duration,
) {
    info!("Starting presence loop");

    loop {
        tokio::time::sleep(tick).await;

        if !state.read().await.has_announcement() {
            debug!("no announcement yet, nothing to show");
            continue;
        }

        let usd = match price.eth_usd_price().await {
            Ok(price) => price,
            Err(e) => {
                warn!("presence price fetch failed: {e}");
                continue;
            }
        };

        let now = chrono::Utc::now().timestamp() as u64;
        let Some(status) = presence_line(&*state.read().await, usd, now) else {
            continue;
        };

        match telegram.set_status(&status).await {
            Ok(()) => debug!(%status, "presence updated"),
            Err(e) => warn!("presence update failed: {e}"),
        }
    }
}

/// The status line for the current state, or `None` when nothing has been
/// announced yet.
fn presence_line(state: &PollState, price_usd: f64, now: u64) -> Option<String> {
    let value: f64 = state.last_value_eth()?.parse().ok()?;
    let timestamp = state.last_timestamp()?;
    Some(format_status(value * price_usd, days_since(now, timestamp)))
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(&args.log_level);

    info!("🐋 Whale Watch starting...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    info!("  Watching: {}", config.watch_address);
    info!("  Threshold: {} ETH", config.min_value_eth);
    info!("  Action: {}", config.tx_action.as_query());
    info!("  Poll interval: {} ms", args.poll_interval_ms);
    info!("  Alert chats: {}", config.chat_ids.len());

    let etherscan = Arc::new(EtherscanClient::new(
        config.etherscan_api_key.clone(),
        config.watch_address.clone(),
        config.tx_action,
    ));
    let coingecko = Arc::new(CoinGeckoClient::new());
    let telegram = Arc::new(TelegramBot::new(&config.telegram_token, config.chat_ids.clone()));

    if let Err(e) = telegram.register_commands().await {
        warn!("Failed to register bot commands: {e}");
    }

    let min_value = Wei::from_whole_ether(config.min_value_eth);
    let state = shared_poll_state();
    let poller = Poller::new(
        etherscan.clone(),
        state.clone(),
        PollerConfig { min_value, page_size: args.page_size },
    );

    tokio::spawn(run_poll_loop(
        poller,
        coingecko.clone(),
        telegram.clone(),
        Duration::from_millis(args.poll_interval_ms),
    ));

    tokio::spawn(run_presence_loop(
        state,
        coingecko.clone(),
        telegram.clone(),
        Duration::from_millis(args.presence_interval_ms),
    ));

    // The dispatcher owns ctrl-c handling and returns on shutdown. An
    // in-flight sweep is simply abandoned; nothing is committed mid-sweep.
    let source: Arc<dyn TransactionSource> = etherscan;
    let price: Arc<dyn PriceSource> = coingecko;
    let handler = Arc::new(CommandHandler::new(
        telegram.bot().clone(),
        source,
        price,
        min_value,
        args.page_size,
    ));
    handler.run().await;

    info!("Whale Watch stopped");
}
