// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! PLEBS Telegram bot: Solana token reports, wallet linking and chatroom
//! links.

pub mod config;
pub mod error;
pub mod format;
pub mod handlers;
pub mod health;
pub mod market;
pub mod store;
pub mod telegram;
pub mod validators;
pub mod wallet_api;

#[cfg(test)]
mod test_support;
