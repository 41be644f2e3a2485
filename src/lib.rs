//! Homework Status Bot Library
//!
//! A Telegram bot that watches Yandex Practicum homework review statuses.
//!
//! This crate provides the core functionality for:
//! - Loading credentials and poller settings from the environment
//! - Polling the review endpoint for status changes
//! - Mapping review statuses to localized verdict messages
//! - Delivering notifications to a Telegram chat

pub mod api;
pub mod config;
pub mod poller;
pub mod telegram;
