// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Chatroom activity counters from the PLEBS backend.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatroomStats {
    pub active_users: u64,
    pub total_messages: u64,
    pub online_now: u64,
    pub room_created: Option<String>,
}

/// Reads `/chatroom/stats/{address}`; never fails, falls back to zeros.
#[derive(Debug, Clone)]
pub struct ChatroomStatsFetcher {
    client: Client,
    base_url: String,
}

impl ChatroomStatsFetcher {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub async fn fetch(&self, address: &str) -> ChatroomStats {
        match self.try_fetch(address).await {
            Ok(stats) => stats,
            Err(e) => {
                warn!("Failed to fetch chatroom stats for {}: {}", address, e);
                ChatroomStats::default()
            }
        }
    }

    async fn try_fetch(&self, address: &str) -> Result<ChatroomStats, reqwest::Error> {
        let url = format!("{}/chatroom/stats/{}", self.base_url, address);
        self.client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{spawn_upstream, test_client};
    use axum::{http::StatusCode, routing::get, Json, Router};
    use serde_json::json;

    const MINT: &str = "7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU";

    #[tokio::test]
    async fn reads_counters() {
        let router = Router::new().route(
            "/chatroom/stats/:address",
            get(|| async {
                Json(json!({
                    "active_users": 12,
                    "total_messages": 340,
                    "online_now": 3,
                    "room_created": "2025-01-02T03:04:05Z"
                }))
            }),
        );
        let fetcher = ChatroomStatsFetcher::new(test_client(), spawn_upstream(router).await);

        let stats = fetcher.fetch(MINT).await;
        assert_eq!(stats.active_users, 12);
        assert_eq!(stats.total_messages, 340);
        assert_eq!(stats.online_now, 3);
        assert_eq!(stats.room_created.as_deref(), Some("2025-01-02T03:04:05Z"));
    }

    #[tokio::test]
    async fn missing_fields_default_individually() {
        let router = Router::new().route(
            "/chatroom/stats/:address",
            get(|| async { Json(json!({ "online_now": 7 })) }),
        );
        let fetcher = ChatroomStatsFetcher::new(test_client(), spawn_upstream(router).await);

        let stats = fetcher.fetch(MINT).await;
        assert_eq!(stats.online_now, 7);
        assert_eq!(stats.total_messages, 0);
        assert_eq!(stats.room_created, None);
    }

    #[tokio::test]
    async fn server_error_yields_default() {
        let router = Router::new().route(
            "/chatroom/stats/:address",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let fetcher = ChatroomStatsFetcher::new(test_client(), spawn_upstream(router).await);
        assert_eq!(fetcher.fetch(MINT).await, ChatroomStats::default());
    }

    #[tokio::test]
    async fn unreachable_backend_yields_default() {
        let fetcher = ChatroomStatsFetcher::new(test_client(), "http://127.0.0.1:1/api");
        assert_eq!(fetcher.fetch(MINT).await, ChatroomStats::default());
    }
}
