// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Local record store for users and token interactions.
//!
//! Every operation opens its own SQLite connection and closes it before
//! returning, whether the statement succeeded or not. There is no pool and no
//! statement spans more than one call.

use crate::error::BotResult;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{Connection, FromRow};
use std::path::Path;
use tracing::{debug, info, warn};

/// Action tag written for every token analysis.
pub const ACTION_VIEW: &str = "view";

/// A bot user, keyed by Telegram user id.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct UserRecord {
    pub telegram_id: i64,
    pub username: String,
    pub wallet_address: Option<String>,
    pub joined_date: i64,
    pub is_verified: bool,
    pub referral_code: Option<String>,
    pub total_volume: f64,
}

impl UserRecord {
    /// Default state for a first-time user: unverified, no wallet, no volume.
    pub fn new(telegram_id: i64, username: impl Into<String>) -> Self {
        Self {
            telegram_id,
            username: username.into(),
            wallet_address: None,
            joined_date: chrono::Utc::now().timestamp(),
            is_verified: false,
            referral_code: None,
            total_volume: 0.0,
        }
    }

    pub fn has_wallet(&self) -> bool {
        self.wallet_address
            .as_deref()
            .is_some_and(|w| !w.trim().is_empty())
    }
}

/// One observed user action against a token address.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct TokenInteraction {
    pub id: i64,
    pub telegram_id: i64,
    pub token_address: String,
    pub action: String,
    pub amount: f64,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreSummary {
    pub users: i64,
    pub interactions: i64,
}

#[derive(Debug, Clone)]
pub struct RecordStore {
    options: SqliteConnectOptions,
}

impl RecordStore {
    /// Point the store at a SQLite file, created on first connect.
    ///
    /// `token_interactions.telegram_id` is a logical link only; views are
    /// recorded even for users without a `users` row.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(false);
        Self { options }
    }

    async fn connect(&self) -> BotResult<SqliteConnection> {
        Ok(SqliteConnection::connect_with(&self.options).await?)
    }

    async fn release(conn: SqliteConnection) {
        if let Err(e) = conn.close().await {
            debug!("Closing record store connection failed: {}", e);
        }
    }

    /// Create both tables if missing. Safe to run on every start.
    pub async fn init(&self) -> BotResult<()> {
        let mut conn = self.connect().await?;
        let result = create_tables(&mut conn).await;
        Self::release(conn).await;
        result?;
        info!("🗄️ Record store ready");
        Ok(())
    }

    pub async fn get_user(&self, telegram_id: i64) -> BotResult<Option<UserRecord>> {
        let mut conn = self.connect().await?;
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT telegram_id, username, wallet_address, joined_date,
                   is_verified, referral_code, total_volume
            FROM users
            WHERE telegram_id = ?
            "#,
        )
        .bind(telegram_id)
        .fetch_optional(&mut conn)
        .await;
        Self::release(conn).await;
        Ok(user?)
    }

    /// Insert or overwrite a user. The original join date survives updates.
    pub async fn save_user(&self, user: &UserRecord) -> BotResult<()> {
        let mut conn = self.connect().await?;
        let result = sqlx::query(
            r#"
            INSERT INTO users (
                telegram_id, username, wallet_address, joined_date,
                is_verified, referral_code, total_volume
            )
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT (telegram_id) DO UPDATE SET
                username = excluded.username,
                wallet_address = excluded.wallet_address,
                is_verified = excluded.is_verified,
                referral_code = excluded.referral_code,
                total_volume = excluded.total_volume
            "#,
        )
        .bind(user.telegram_id)
        .bind(&user.username)
        .bind(&user.wallet_address)
        .bind(user.joined_date)
        .bind(user.is_verified)
        .bind(&user.referral_code)
        .bind(user.total_volume)
        .execute(&mut conn)
        .await;
        Self::release(conn).await;
        result?;
        Ok(())
    }

    /// Return the user, creating a default record first if absent.
    /// The flag is `true` when the record was created by this call.
    pub async fn ensure_user(
        &self,
        telegram_id: i64,
        username: &str,
    ) -> BotResult<(UserRecord, bool)> {
        if let Some(user) = self.get_user(telegram_id).await? {
            return Ok((user, false));
        }

        let user = UserRecord::new(telegram_id, username);
        self.save_user(&user).await?;
        info!("👤 New user {} ({})", user.username, telegram_id);
        Ok((user, true))
    }

    /// Append one interaction row and return its id.
    pub async fn record_interaction(
        &self,
        telegram_id: i64,
        token_address: &str,
        action: &str,
        amount: f64,
    ) -> BotResult<i64> {
        let mut conn = self.connect().await?;
        let result = sqlx::query(
            r#"
            INSERT INTO token_interactions (telegram_id, token_address, action, amount, timestamp)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(telegram_id)
        .bind(token_address)
        .bind(action)
        .bind(amount)
        .bind(chrono::Utc::now().timestamp())
        .execute(&mut conn)
        .await;
        Self::release(conn).await;
        Ok(result?.last_insert_rowid())
    }

    pub async fn interactions_for_user(
        &self,
        telegram_id: i64,
    ) -> BotResult<Vec<TokenInteraction>> {
        let mut conn = self.connect().await?;
        let rows = sqlx::query_as::<_, TokenInteraction>(
            r#"
            SELECT id, telegram_id, token_address, action, amount, timestamp
            FROM token_interactions
            WHERE telegram_id = ?
            ORDER BY id
            "#,
        )
        .bind(telegram_id)
        .fetch_all(&mut conn)
        .await;
        Self::release(conn).await;
        Ok(rows?)
    }

    pub async fn summary(&self) -> BotResult<StoreSummary> {
        let mut conn = self.connect().await?;
        let row: Result<(i64, i64), sqlx::Error> = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM users),
                (SELECT COUNT(*) FROM token_interactions)
            "#,
        )
        .fetch_one(&mut conn)
        .await;
        Self::release(conn).await;
        let (users, interactions) = row?;
        Ok(StoreSummary { users, interactions })
    }

    /// Log record counts on startup.
    pub async fn log_summary(&self) {
        match self.summary().await {
            Ok(summary) => info!(
                "📊 Record store: {} users, {} token interactions",
                summary.users, summary.interactions
            ),
            Err(e) => warn!("Could not read record store summary: {}", e),
        }
    }
}

async fn create_tables(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            telegram_id INTEGER PRIMARY KEY,
            username TEXT NOT NULL DEFAULT '',
            wallet_address TEXT,
            joined_date INTEGER NOT NULL,
            is_verified BOOLEAN NOT NULL DEFAULT 0,
            referral_code TEXT,
            total_volume REAL NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(&mut *conn)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS token_interactions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            telegram_id INTEGER NOT NULL,
            token_address TEXT NOT NULL,
            action TEXT NOT NULL,
            amount REAL NOT NULL DEFAULT 0,
            timestamp INTEGER NOT NULL,
            FOREIGN KEY (telegram_id) REFERENCES users (telegram_id)
        )
        "#,
    )
    .execute(&mut *conn)
    .await?;

    Ok(())
}
