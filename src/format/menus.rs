// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Inline action menus, described independently of the chat transport.

use crate::handlers::CallbackAction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonAction {
    Callback(String),
    Url(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuButton {
    pub label: String,
    pub action: ButtonAction,
}

impl MenuButton {
    pub fn callback(label: &str, action: CallbackAction) -> Self {
        Self {
            label: label.to_string(),
            action: ButtonAction::Callback(action.to_data()),
        }
    }

    pub fn url(label: &str, url: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            action: ButtonAction::Url(url.into()),
        }
    }
}

/// Rows of buttons, rendered top to bottom.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Menu {
    pub rows: Vec<Vec<MenuButton>>,
}

impl Menu {
    pub fn new(rows: Vec<Vec<MenuButton>>) -> Self {
        Self { rows }
    }
}

#[cfg(test)]
impl Menu {
    pub fn buttons(&self) -> impl Iterator<Item = &MenuButton> {
        self.rows.iter().flatten()
    }

    /// First button whose label contains `text`.
    pub fn find(&self, text: &str) -> Option<&MenuButton> {
        self.buttons().find(|b| b.label.contains(text))
    }
}

/// Buy, Sell, View Chart, Join Chatroom, Refresh, Set Alerts.
pub fn token_menu(address: &str) -> Menu {
    let a = || address.to_string();
    Menu::new(vec![
        vec![
            MenuButton::callback("🟢 Buy Token", CallbackAction::Buy(a())),
            MenuButton::callback("🔴 Sell Token", CallbackAction::Sell(a())),
        ],
        vec![
            MenuButton::callback("📈 View Chart", CallbackAction::Chart(a())),
            MenuButton::callback("💬 Join Chatroom", CallbackAction::Chatroom(a())),
        ],
        vec![
            MenuButton::callback("🔄 Refresh", CallbackAction::Refresh(a())),
            MenuButton::callback("🔔 Set Alerts", CallbackAction::Alerts(a())),
        ],
    ])
}

pub fn welcome_menu() -> Menu {
    Menu::new(vec![
        vec![MenuButton::callback("🔗 Connect Wallet", CallbackAction::ConnectWallet)],
        vec![
            MenuButton::callback("❓ Get Help", CallbackAction::Help),
            MenuButton::callback("💬 Browse Chatrooms", CallbackAction::BrowseRooms),
        ],
    ])
}

pub fn wallet_connected_menu() -> Menu {
    Menu::new(vec![
        vec![
            MenuButton::callback("💰 Check Balance", CallbackAction::CheckBalance),
            MenuButton::callback("📊 View Portfolio", CallbackAction::ViewPortfolio),
        ],
        vec![MenuButton::callback("🔌 Disconnect", CallbackAction::DisconnectWallet)],
    ])
}

pub fn wallet_connect_menu() -> Menu {
    Menu::new(vec![
        vec![MenuButton::callback("🔗 Connect Existing Wallet", CallbackAction::ImportWallet)],
        vec![MenuButton::callback("➕ Create New Wallet", CallbackAction::CreateWallet)],
    ])
}

const BUY_AMOUNTS: [&str; 4] = ["0.1 SOL", "0.5 SOL", "1 SOL", "Custom"];
const SELL_AMOUNTS: [&str; 4] = ["25%", "50%", "100%", "Custom"];

/// Amount choices in pairs, then a cancel row.
fn amount_menu(labels: &[&str], build: impl Fn(&str) -> CallbackAction) -> Menu {
    let mut rows: Vec<Vec<MenuButton>> = labels
        .chunks(2)
        .map(|pair| {
            pair.iter()
                .map(|label| MenuButton::callback(label, build(label)))
                .collect()
        })
        .collect();
    rows.push(vec![MenuButton::callback("❌ Cancel", CallbackAction::Cancel)]);
    Menu::new(rows)
}

pub fn buy_amount_menu(address: &str) -> Menu {
    amount_menu(&BUY_AMOUNTS, |label| CallbackAction::BuyAmount {
        address: address.to_string(),
        amount: label.replace(' ', "_"),
    })
}

pub fn sell_amount_menu(address: &str) -> Menu {
    amount_menu(&SELL_AMOUNTS, |label| CallbackAction::SellAmount {
        address: address.to_string(),
        amount: label.replace('%', "pct").replace(' ', "_"),
    })
}

pub fn chatroom_menu(room_url: &str, address: &str) -> Menu {
    Menu::new(vec![
        vec![MenuButton::url("🚀 Open Chatroom", room_url)],
        vec![MenuButton::callback(
            "⬅️ Back to Token",
            CallbackAction::Refresh(address.to_string()),
        )],
    ])
}

pub fn link_menu(label: &str, url: &str) -> Menu {
    Menu::new(vec![vec![MenuButton::url(label, url)]])
}
