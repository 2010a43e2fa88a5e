// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Routes inbound commands, texts and button presses to their handlers.

use crate::error::BotResult;
use crate::format::menus::{
    buy_amount_menu, chatroom_menu, link_menu, sell_amount_menu, token_menu, wallet_connect_menu,
    wallet_connected_menu, welcome_menu,
};
use crate::format::{
    analysis_failed_text, chart_text, format_token_message, wallet_connected_text,
    wallet_created_text, welcome_text, Menu, ANALYZING_TEXT, BROWSE_ROOMS_TEXT, BUY_PROMPT_TEXT,
    CHATROOM_JOIN_TEXT, COMING_SOON, CONNECT_WALLET_FIRST, HELP_TEXT, NOT_AN_ADDRESS_HINT,
    SELL_PROMPT_TEXT, TRADE_VIA_WALLET_SERVICE, WALLET_CONNECT_TEXT,
};
use crate::handlers::CallbackAction;
use crate::market::TokenAnalyzer;
use crate::store::{RecordStore, UserRecord, ACTION_VIEW};
use crate::telegram::ChatApi;
use crate::validators::is_valid_solana_address;
use crate::wallet_api::WalletApi;
use teloxide::utils::command::BotCommands;
use tracing::{debug, error, info};

const CHART_BASE_URL: &str = "https://dexscreener.com/solana";

#[derive(Debug, Clone, Copy, PartialEq, Eq, BotCommands)]
#[command(rename_rule = "lowercase", description = "PLEBS bot commands:")]
pub enum Command {
    #[command(description = "show the welcome menu")]
    Start,
    #[command(description = "list commands")]
    Help,
    #[command(description = "connect or view your wallet")]
    Wallet,
}

/// The Telegram user behind an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub user_id: i64,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    Command {
        chat_id: i64,
        sender: Sender,
        command: Command,
    },
    Text {
        chat_id: i64,
        sender: Sender,
        text: String,
    },
    Callback {
        callback_id: String,
        chat_id: i64,
        /// The message carrying the pressed button.
        message_id: i32,
        sender: Sender,
        data: String,
    },
}

impl Inbound {
    pub fn sender(&self) -> &Sender {
        match self {
            Self::Command { sender, .. }
            | Self::Text { sender, .. }
            | Self::Callback { sender, .. } => sender,
        }
    }
}

/// Stateless across events; every handler reads what it needs from the
/// store or upstreams.
pub struct EventDispatcher<C> {
    chat: C,
    store: RecordStore,
    analyzer: TokenAnalyzer,
    wallet: WalletApi,
    chatroom_url: String,
}

impl<C: ChatApi> EventDispatcher<C> {
    pub fn new(
        chat: C,
        store: RecordStore,
        analyzer: TokenAnalyzer,
        wallet: WalletApi,
        chatroom_url: impl Into<String>,
    ) -> Self {
        Self {
            chat,
            store,
            analyzer,
            wallet,
            chatroom_url: chatroom_url.into(),
        }
    }

    pub fn chat(&self) -> &C {
        &self.chat
    }

    pub async fn handle(&self, event: Inbound) -> BotResult<()> {
        self.register(event.sender()).await;

        match event {
            Inbound::Command {
                chat_id,
                sender,
                command,
            } => match command {
                Command::Start => self.on_start(chat_id, &sender).await,
                Command::Help => self.on_help(chat_id).await,
                Command::Wallet => self.on_wallet(chat_id, sender.user_id).await,
            },
            Inbound::Text {
                chat_id,
                sender,
                text,
            } => self.on_text(chat_id, &sender, &text).await,
            Inbound::Callback {
                callback_id,
                chat_id,
                message_id,
                sender,
                data,
            } => {
                self.on_callback(&callback_id, chat_id, message_id, &sender, &data)
                    .await
            }
        }
    }

    /// Create the user's record on first contact. Failures are logged only.
    async fn register(&self, sender: &Sender) {
        if let Err(e) = self
            .store
            .ensure_user(sender.user_id, &sender.display_name)
            .await
        {
            error!("Failed to register user {}: {}", sender.user_id, e);
        }
    }

    async fn on_start(&self, chat_id: i64, sender: &Sender) -> BotResult<()> {
        self.chat
            .send_message(chat_id, &welcome_text(&sender.display_name), Some(&welcome_menu()))
            .await?;
        Ok(())
    }

    async fn on_help(&self, chat_id: i64) -> BotResult<()> {
        self.chat.send_message(chat_id, HELP_TEXT, None).await?;
        Ok(())
    }

    async fn on_wallet(&self, chat_id: i64, user_id: i64) -> BotResult<()> {
        match self.load_user(user_id).await.filter(UserRecord::has_wallet) {
            Some(user) => {
                self.chat
                    .send_message(
                        chat_id,
                        &wallet_connected_text(&user),
                        Some(&wallet_connected_menu()),
                    )
                    .await?
            }
            None => {
                self.chat
                    .send_message(chat_id, WALLET_CONNECT_TEXT, Some(&wallet_connect_menu()))
                    .await?
            }
        };
        Ok(())
    }

    async fn on_text(&self, chat_id: i64, sender: &Sender, text: &str) -> BotResult<()> {
        let candidate = text.trim();
        if !is_valid_solana_address(candidate) {
            self.chat.send_message(chat_id, NOT_AN_ADDRESS_HINT, None).await?;
            return Ok(());
        }

        info!("🔍 {} asked for {}", sender.user_id, candidate);
        self.analyze_token(chat_id, sender.user_id, candidate).await
    }

    async fn analyze_token(&self, chat_id: i64, user_id: i64, address: &str) -> BotResult<()> {
        let placeholder = self.chat.send_message(chat_id, ANALYZING_TEXT, None).await?;
        let delivered = self.deliver_report(chat_id, placeholder, address).await;
        self.record_view(user_id, address).await;

        if let Err(e) = delivered {
            error!("Error analyzing token {}: {}", address, e);
            if let Err(e) = self.chat.delete_message(chat_id, placeholder).await {
                debug!("Placeholder {} already gone: {}", placeholder, e);
            }
            self.chat
                .send_message(chat_id, &analysis_failed_text(&e.to_string()), None)
                .await?;
        }
        Ok(())
    }

    async fn deliver_report(
        &self,
        chat_id: i64,
        placeholder: i32,
        address: &str,
    ) -> BotResult<()> {
        let (text, menu) = self.render_report(address).await;
        self.chat.delete_message(chat_id, placeholder).await?;
        self.chat.send_message(chat_id, &text, Some(&menu)).await?;
        Ok(())
    }

    async fn render_report(&self, address: &str) -> (String, Menu) {
        let snapshot = self.analyzer.analyze(address).await;
        (format_token_message(&snapshot), token_menu(address))
    }

    /// Append a `view` interaction. Store failures are logged, not returned.
    async fn record_view(&self, user_id: i64, address: &str) {
        match self
            .store
            .record_interaction(user_id, address, ACTION_VIEW, 0.0)
            .await
        {
            Ok(id) => debug!("Recorded view #{} of {} by {}", id, address, user_id),
            Err(e) => error!("Failed to record view of {} by {}: {}", address, user_id, e),
        }
    }

    async fn load_user(&self, user_id: i64) -> Option<UserRecord> {
        self.store.get_user(user_id).await.unwrap_or_else(|e| {
            error!("Failed to load user {}: {}", user_id, e);
            None
        })
    }

    async fn has_wallet(&self, user_id: i64) -> bool {
        self.load_user(user_id)
            .await
            .is_some_and(|user| user.has_wallet())
    }

    async fn on_callback(
        &self,
        callback_id: &str,
        chat_id: i64,
        message_id: i32,
        sender: &Sender,
        data: &str,
    ) -> BotResult<()> {
        let action = CallbackAction::parse(data);
        debug!("Button {:?} from {}", action, sender.user_id);

        match action {
            CallbackAction::Buy(address) => {
                let menu = buy_amount_menu(&address);
                self.trade_prompt(callback_id, chat_id, sender.user_id, BUY_PROMPT_TEXT, menu)
                    .await
            }
            CallbackAction::Sell(address) => {
                let menu = sell_amount_menu(&address);
                self.trade_prompt(callback_id, chat_id, sender.user_id, SELL_PROMPT_TEXT, menu)
                    .await
            }
            CallbackAction::BuyAmount { .. } | CallbackAction::SellAmount { .. } => {
                self.toast(callback_id, TRADE_VIA_WALLET_SERVICE).await
            }
            CallbackAction::Refresh(address) => {
                self.refresh(callback_id, chat_id, message_id, &address).await
            }
            CallbackAction::Chatroom(address) => {
                let room_url = format!("{}/room/{}", self.chatroom_url, address);
                let menu = chatroom_menu(&room_url, &address);
                self.chat
                    .send_message(chat_id, CHATROOM_JOIN_TEXT, Some(&menu))
                    .await?;
                self.chat.answer_callback(callback_id, None).await
            }
            CallbackAction::Chart(address) => {
                let chart_url = format!("{}/{}", CHART_BASE_URL, address);
                self.chat
                    .send_message(
                        chat_id,
                        &chart_text(&address),
                        Some(&link_menu("📈 Open on DexScreener", &chart_url)),
                    )
                    .await?;
                self.chat.answer_callback(callback_id, None).await
            }
            CallbackAction::Alerts(_)
            | CallbackAction::CheckBalance
            | CallbackAction::ViewPortfolio
            | CallbackAction::ImportWallet => self.toast(callback_id, COMING_SOON).await,
            CallbackAction::ConnectWallet => {
                self.on_wallet(chat_id, sender.user_id).await?;
                self.chat.answer_callback(callback_id, None).await
            }
            CallbackAction::Help => {
                self.on_help(chat_id).await?;
                self.chat.answer_callback(callback_id, None).await
            }
            CallbackAction::BrowseRooms => {
                self.chat
                    .send_message(
                        chat_id,
                        BROWSE_ROOMS_TEXT,
                        Some(&link_menu("🚀 Open PLEBS Chat", &self.chatroom_url)),
                    )
                    .await?;
                self.chat.answer_callback(callback_id, None).await
            }
            CallbackAction::CreateWallet => {
                self.create_wallet(callback_id, chat_id, sender).await
            }
            CallbackAction::DisconnectWallet => {
                self.disconnect_wallet(callback_id, sender.user_id).await
            }
            CallbackAction::Cancel => {
                if let Err(e) = self.chat.delete_message(chat_id, message_id).await {
                    debug!("Menu {} already gone: {}", message_id, e);
                }
                self.chat.answer_callback(callback_id, None).await
            }
            CallbackAction::Unknown(data) => {
                debug!("Ignoring unknown button data {:?}", data);
                self.chat.answer_callback(callback_id, None).await
            }
        }
    }

    async fn toast(&self, callback_id: &str, text: &str) -> BotResult<()> {
        self.chat.answer_callback(callback_id, Some(text)).await
    }

    async fn trade_prompt(
        &self,
        callback_id: &str,
        chat_id: i64,
        user_id: i64,
        prompt: &str,
        menu: Menu,
    ) -> BotResult<()> {
        if !self.has_wallet(user_id).await {
            return self.toast(callback_id, CONNECT_WALLET_FIRST).await;
        }
        self.chat.send_message(chat_id, prompt, Some(&menu)).await?;
        self.chat.answer_callback(callback_id, None).await
    }

    async fn refresh(
        &self,
        callback_id: &str,
        chat_id: i64,
        message_id: i32,
        address: &str,
    ) -> BotResult<()> {
        let (text, menu) = self.render_report(address).await;
        match self
            .chat
            .edit_message(chat_id, message_id, &text, Some(&menu))
            .await
        {
            Ok(()) => self.chat.answer_callback(callback_id, None).await,
            Err(e) => {
                error!("Error refreshing {}: {}", address, e);
                self.toast(callback_id, &format!("❌ Error refreshing token: {}", e))
                    .await
            }
        }
    }

    async fn create_wallet(
        &self,
        callback_id: &str,
        chat_id: i64,
        sender: &Sender,
    ) -> BotResult<()> {
        let existing = self.load_user(sender.user_id).await;
        if existing.as_ref().is_some_and(UserRecord::has_wallet) {
            return self.toast(callback_id, "✅ Wallet already connected").await;
        }

        let generated = match self.wallet.generate_wallet().await {
            Ok(generated) => generated,
            Err(e) => {
                return self
                    .toast(callback_id, &format!("❌ Wallet service error: {}", e))
                    .await
            }
        };

        let mut user = existing
            .unwrap_or_else(|| UserRecord::new(sender.user_id, sender.display_name.as_str()));
        user.wallet_address = Some(generated.public_key.clone());
        if let Err(e) = self.store.save_user(&user).await {
            error!("Failed to link wallet for {}: {}", sender.user_id, e);
            return self
                .toast(callback_id, &format!("❌ Could not save wallet: {}", e))
                .await;
        }

        info!("👛 Linked wallet {} to {}", generated.public_key, sender.user_id);
        self.chat
            .send_message(chat_id, &wallet_created_text(&generated.public_key), None)
            .await?;
        self.chat.answer_callback(callback_id, None).await
    }

    async fn disconnect_wallet(&self, callback_id: &str, user_id: i64) -> BotResult<()> {
        let Some(mut user) = self.load_user(user_id).await.filter(UserRecord::has_wallet) else {
            return self.toast(callback_id, "No wallet connected").await;
        };

        user.wallet_address = None;
        if let Err(e) = self.store.save_user(&user).await {
            error!("Failed to unlink wallet for {}: {}", user_id, e);
            return self
                .toast(callback_id, &format!("❌ Could not update wallet: {}", e))
                .await;
        }
        self.toast(callback_id, "🔌 Wallet disconnected").await
    }
}
