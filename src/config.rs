// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration module - loads settings from environment variables.

use crate::market::PairSelection;
use std::time::Duration;

/// Main configuration for the bot.
#[derive(Debug, Clone)]
pub struct Config {
    // Telegram
    pub telegram_token: Option<String>,

    // Upstreams
    pub solana_rpc_url: String,
    pub backend_api_url: String,
    pub chatroom_url: String,
    pub dexscreener_api_url: String,
    pub http_timeout_secs: u64,
    pub pair_selection: PairSelection,

    // Storage
    pub database_path: String,

    // Health probe
    pub health_port: Option<u16>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |name: &str, default: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let pair_selection = var_or("PAIR_SELECTION", "first")
            .parse()
            .map_err(|e| format!("Invalid PAIR_SELECTION: {}", e))?;

        Ok(Self {
            telegram_token: lookup("TELEGRAM_BOT_TOKEN").filter(|t| !t.trim().is_empty()),

            solana_rpc_url: var_or("SOLANA_RPC_URL", "https://api.mainnet-beta.solana.com"),
            backend_api_url: trim_url(var_or("BACKEND_API_URL", "http://localhost:3000/api")),
            chatroom_url: trim_url(var_or("CHATROOM_URL", "https://plebs.chat")),
            dexscreener_api_url: trim_url(var_or(
                "DEXSCREENER_API_URL",
                "https://api.dexscreener.com/latest/dex",
            )),
            http_timeout_secs: var_or("HTTP_TIMEOUT_SECS", "10").parse().unwrap_or(10),
            pair_selection,

            database_path: var_or("DATABASE_PATH", "plebs_bot.db"),

            health_port: lookup("HEALTH_PORT").and_then(|p| p.trim().parse().ok()),
        })
    }

    /// Timeout applied to every outbound HTTP request.
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

fn trim_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.telegram_token, None);
        assert_eq!(config.backend_api_url, "http://localhost:3000/api");
        assert_eq!(config.chatroom_url, "https://plebs.chat");
        assert_eq!(config.dexscreener_api_url, "https://api.dexscreener.com/latest/dex");
        assert_eq!(config.database_path, "plebs_bot.db");
        assert_eq!(config.http_timeout_secs, 10);
        assert_eq!(config.pair_selection, PairSelection::First);
        assert_eq!(config.health_port, None);
    }

    #[test]
    fn reads_overrides_and_trims_urls() {
        let config = config_from(&[
            ("TELEGRAM_BOT_TOKEN", "123:abc"),
            ("BACKEND_API_URL", "http://backend:8080/api/"),
            ("CHATROOM_URL", "https://rooms.example/"),
            ("HTTP_TIMEOUT_SECS", "3"),
            ("PAIR_SELECTION", "liquidity"),
            ("HEALTH_PORT", "9090"),
        ])
        .unwrap();

        assert_eq!(config.telegram_token.as_deref(), Some("123:abc"));
        assert_eq!(config.backend_api_url, "http://backend:8080/api");
        assert_eq!(config.chatroom_url, "https://rooms.example");
        assert_eq!(config.http_timeout(), Duration::from_secs(3));
        assert_eq!(config.pair_selection, PairSelection::DeepestLiquidity);
        assert_eq!(config.health_port, Some(9090));
    }

    #[test]
    fn bad_numbers_fall_back() {
        let config = config_from(&[("HTTP_TIMEOUT_SECS", "soon"), ("HEALTH_PORT", "x")]).unwrap();
        assert_eq!(config.http_timeout_secs, 10);
        assert_eq!(config.health_port, None);
    }

    #[test]
    fn unknown_pair_selection_is_rejected() {
        let err = config_from(&[("PAIR_SELECTION", "newest")]).unwrap_err();
        assert!(err.contains("PAIR_SELECTION"));
    }

    #[test]
    fn blank_token_counts_as_missing() {
        let config = config_from(&[("TELEGRAM_BOT_TOKEN", "  ")]).unwrap();
        assert_eq!(config.telegram_token, None);
    }
}
