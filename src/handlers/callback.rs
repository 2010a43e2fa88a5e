// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Inline button payloads.
//!
//! Telegram caps callback data at 64 bytes; the longest payload here is
//! `sell_amount_` + a 44 char address + `_Custom`, which is 63.

use crate::validators::is_valid_solana_address;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
    Buy(String),
    Sell(String),
    BuyAmount { address: String, amount: String },
    SellAmount { address: String, amount: String },
    Chart(String),
    Chatroom(String),
    Refresh(String),
    Alerts(String),
    ConnectWallet,
    CreateWallet,
    ImportWallet,
    DisconnectWallet,
    CheckBalance,
    ViewPortfolio,
    Help,
    BrowseRooms,
    Cancel,
    Unknown(String),
}

impl CallbackAction {
    pub fn parse(data: &str) -> Self {
        match data {
            "connect_wallet" => return Self::ConnectWallet,
            "create_wallet" => return Self::CreateWallet,
            "import_wallet" => return Self::ImportWallet,
            "disconnect_wallet" => return Self::DisconnectWallet,
            "check_balance" => return Self::CheckBalance,
            "view_portfolio" => return Self::ViewPortfolio,
            "help" => return Self::Help,
            "browse_rooms" => return Self::BrowseRooms,
            "cancel" => return Self::Cancel,
            _ => {}
        }

        // Amount prefixes must be tried before the bare buy_/sell_ ones.
        if let Some(rest) = data.strip_prefix("buy_amount_") {
            return Self::amount(data, rest, |address, amount| Self::BuyAmount { address, amount });
        }
        if let Some(rest) = data.strip_prefix("sell_amount_") {
            return Self::amount(data, rest, |address, amount| Self::SellAmount { address, amount });
        }

        let token_actions: [(&str, fn(String) -> Self); 6] = [
            ("buy_", Self::Buy),
            ("sell_", Self::Sell),
            ("chart_", Self::Chart),
            ("chatroom_", Self::Chatroom),
            ("refresh_", Self::Refresh),
            ("alerts_", Self::Alerts),
        ];
        for (prefix, build) in token_actions {
            if let Some(address) = data.strip_prefix(prefix) {
                if is_valid_solana_address(address) {
                    return build(address.to_string());
                }
                break;
            }
        }

        Self::Unknown(data.to_string())
    }

    fn amount(data: &str, rest: &str, build: impl FnOnce(String, String) -> Self) -> Self {
        // Base58 never contains '_', so the first one ends the address.
        match rest.split_once('_') {
            Some((address, amount)) if is_valid_solana_address(address) && !amount.is_empty() => {
                build(address.to_string(), amount.to_string())
            }
            _ => Self::Unknown(data.to_string()),
        }
    }

    pub fn to_data(&self) -> String {
        match self {
            Self::Buy(a) => format!("buy_{}", a),
            Self::Sell(a) => format!("sell_{}", a),
            Self::BuyAmount { address, amount } => format!("buy_amount_{}_{}", address, amount),
            Self::SellAmount { address, amount } => format!("sell_amount_{}_{}", address, amount),
            Self::Chart(a) => format!("chart_{}", a),
            Self::Chatroom(a) => format!("chatroom_{}", a),
            Self::Refresh(a) => format!("refresh_{}", a),
            Self::Alerts(a) => format!("alerts_{}", a),
            Self::ConnectWallet => "connect_wallet".to_string(),
            Self::CreateWallet => "create_wallet".to_string(),
            Self::ImportWallet => "import_wallet".to_string(),
            Self::DisconnectWallet => "disconnect_wallet".to_string(),
            Self::CheckBalance => "check_balance".to_string(),
            Self::ViewPortfolio => "view_portfolio".to_string(),
            Self::Help => "help".to_string(),
            Self::BrowseRooms => "browse_rooms".to_string(),
            Self::Cancel => "cancel".to_string(),
            Self::Unknown(data) => data.clone(),
        }
    }
}
