//! Telegram delivery module.
//!
//! Provides a thin Bot API client used to push status notifications
//! into the configured chat.

mod client;

pub use client::{TelegramClient, TelegramError};
