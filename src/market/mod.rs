// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Market and community data behind a token report.

pub mod chatroom;
pub mod dexscreener;

pub use chatroom::{ChatroomStats, ChatroomStatsFetcher};
pub use dexscreener::{MarketDataFetcher, PairSelection, TokenInfo};

/// Everything a token report is rendered from.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketSnapshot {
    pub token: TokenInfo,
    pub chatroom: ChatroomStats,
}

/// Runs both lookups for an address concurrently.
#[derive(Debug, Clone)]
pub struct TokenAnalyzer {
    market: MarketDataFetcher,
    chatroom: ChatroomStatsFetcher,
}

impl TokenAnalyzer {
    pub fn new(market: MarketDataFetcher, chatroom: ChatroomStatsFetcher) -> Self {
        Self { market, chatroom }
    }

    /// Fetch a snapshot for `address`. Both fetchers are total, so this
    /// always completes with data, possibly all placeholders.
    pub async fn analyze(&self, address: &str) -> MarketSnapshot {
        let (token, chatroom) =
            tokio::join!(self.market.fetch(address), self.chatroom.fetch(address));
        MarketSnapshot { token, chatroom }
    }
}
