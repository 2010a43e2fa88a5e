// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Telegram transport: outbound chat operations and the update loop.

use crate::error::{BotError, BotResult};
use crate::format::{ButtonAction, Menu, MenuButton};
use crate::handlers::{Command, EventDispatcher, Inbound, Sender};
use async_trait::async_trait;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{
    CallbackQueryId, InlineKeyboardButton, InlineKeyboardMarkup, Me, MessageId, ParseMode, User,
};
use teloxide::utils::command::BotCommands;
use teloxide::{ApiError, RequestError};
use tracing::{debug, error, info};

/// Outbound chat operations the dispatch layer relies on.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Send a message and return its id.
    async fn send_message(&self, chat_id: i64, text: &str, menu: Option<&Menu>) -> BotResult<i32>;

    async fn edit_message(
        &self,
        chat_id: i64,
        message_id: i32,
        text: &str,
        menu: Option<&Menu>,
    ) -> BotResult<()>;

    async fn delete_message(&self, chat_id: i64, message_id: i32) -> BotResult<()>;

    /// Acknowledge a button press, optionally with a toast.
    async fn answer_callback(&self, callback_id: &str, text: Option<&str>) -> BotResult<()>;
}

/// [`ChatApi`] over the Telegram Bot API.
#[derive(Clone)]
pub struct TelegramChat {
    bot: Bot,
}

impl TelegramChat {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

fn keyboard(menu: &Menu) -> BotResult<InlineKeyboardMarkup> {
    let rows = menu
        .rows
        .iter()
        .map(|row| row.iter().map(button).collect::<BotResult<Vec<_>>>())
        .collect::<BotResult<Vec<_>>>()?;
    Ok(InlineKeyboardMarkup::new(rows))
}

fn button(button: &MenuButton) -> BotResult<InlineKeyboardButton> {
    match &button.action {
        ButtonAction::Callback(data) => Ok(InlineKeyboardButton::callback(
            button.label.clone(),
            data.clone(),
        )),
        ButtonAction::Url(url) => {
            let parsed = reqwest::Url::parse(url)
                .map_err(|e| BotError::InvalidLink(format!("{}: {}", url, e)))?;
            Ok(InlineKeyboardButton::url(button.label.clone(), parsed))
        }
    }
}

#[async_trait]
impl ChatApi for TelegramChat {
    async fn send_message(&self, chat_id: i64, text: &str, menu: Option<&Menu>) -> BotResult<i32> {
        let mut request = self
            .bot
            .send_message(ChatId(chat_id), text)
            .parse_mode(ParseMode::Html);
        if let Some(menu) = menu {
            request = request.reply_markup(keyboard(menu)?);
        }
        let message = request.await?;
        debug!("📤 Sent message {} to chat {}", message.id.0, chat_id);
        Ok(message.id.0)
    }

    async fn edit_message(
        &self,
        chat_id: i64,
        message_id: i32,
        text: &str,
        menu: Option<&Menu>,
    ) -> BotResult<()> {
        let mut request = self
            .bot
            .edit_message_text(ChatId(chat_id), MessageId(message_id), text)
            .parse_mode(ParseMode::Html);
        if let Some(menu) = menu {
            request = request.reply_markup(keyboard(menu)?);
        }
        match request.await {
            Ok(_) => Ok(()),
            // Refreshing unchanged data produces identical text.
            Err(RequestError::Api(ApiError::MessageNotModified)) => {
                debug!("Message {} in chat {} unchanged", message_id, chat_id);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete_message(&self, chat_id: i64, message_id: i32) -> BotResult<()> {
        self.bot
            .delete_message(ChatId(chat_id), MessageId(message_id))
            .await?;
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str, text: Option<&str>) -> BotResult<()> {
        let mut request = self
            .bot
            .answer_callback_query(CallbackQueryId(callback_id.to_string()));
        if let Some(text) = text {
            request = request.text(text);
        }
        request.await?;
        Ok(())
    }
}

fn sender_of(user: &User) -> Sender {
    Sender {
        user_id: user.id.0 as i64,
        display_name: user
            .username
            .clone()
            .unwrap_or_else(|| user.first_name.clone()),
    }
}

/// Long-poll Telegram and feed every update to `events` until Ctrl-C.
pub async fn run(bot: Bot, events: Arc<EventDispatcher<TelegramChat>>) {
    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(on_message))
        .branch(Update::filter_callback_query().endpoint(on_callback));

    info!("📱 Polling Telegram for updates");
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![events])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

async fn on_message(
    msg: Message,
    me: Me,
    events: Arc<EventDispatcher<TelegramChat>>,
) -> ResponseResult<()> {
    let (Some(text), Some(user)) = (msg.text(), msg.from.as_ref()) else {
        return Ok(());
    };

    let chat_id = msg.chat.id.0;
    let sender = sender_of(user);
    let event = match Command::parse(text, me.username()) {
        Ok(command) => Inbound::Command {
            chat_id,
            sender,
            command,
        },
        Err(_) => Inbound::Text {
            chat_id,
            sender,
            text: text.to_string(),
        },
    };

    if let Err(e) = events.handle(event).await {
        error!("Failed to handle message in chat {}: {}", chat_id, e);
    }
    Ok(())
}

async fn on_callback(
    q: CallbackQuery,
    events: Arc<EventDispatcher<TelegramChat>>,
) -> ResponseResult<()> {
    let callback_id = q.id.0.clone();

    let Some(message) = q.regular_message() else {
        // Too old to act on; just stop the spinner.
        if let Err(e) = events.chat().answer_callback(&callback_id, None).await {
            debug!("Failed to answer stale callback: {}", e);
        }
        return Ok(());
    };

    let event = Inbound::Callback {
        callback_id,
        chat_id: message.chat.id.0,
        message_id: message.id.0,
        sender: sender_of(&q.from),
        data: q.data.clone().unwrap_or_default(),
    };

    if let Err(e) = events.handle(event).await {
        error!("Failed to handle button press from {}: {}", q.from.id, e);
    }
    Ok(())
}
