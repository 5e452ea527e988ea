//! Telegram alert delivery for the whale watcher.
//!
//! This crate provides:
//! - HTML alert and status-line formatting
//! - a bot wrapper that broadcasts to the configured chats and pushes the
//!   short status line
//! - the `/lasttx` and `/help` command handlers

pub mod commands;
pub mod message;
pub mod telegram;

pub use commands::{Command, CommandHandler};
pub use message::{days_since, format_alert, format_status};
pub use telegram::{AlertError, TelegramBot};
