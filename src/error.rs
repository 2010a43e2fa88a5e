// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error type shared by the dispatch layer and its collaborators.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("telegram request failed: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("record store error: {0}")]
    Store(#[from] sqlx::Error),

    #[error("invalid button link {0}")]
    InvalidLink(String),

    #[error("wallet service returned status {0}")]
    WalletStatus(u16),

    #[error("wallet service sent an unexpected payload: {0}")]
    WalletPayload(#[from] serde_json::Error),
}

pub type BotResult<T> = Result<T, BotError>;
