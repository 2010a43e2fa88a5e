// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! DexScreener token lookups.

use reqwest::Client;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::str::FromStr;
use tracing::{debug, warn};

/// Flattened market view of one token, built per request and never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenInfo {
    pub address: String,
    pub name: String,
    pub symbol: String,
    pub price_usd: f64,
    pub market_cap: f64,
    pub liquidity: f64,
    pub volume_24h: f64,
    pub price_change_24h: f64,
    pub dex: String,
    pub pair_address: String,
    pub url: String,
}

impl TokenInfo {
    /// Placeholder used whenever the aggregator has nothing for `address`.
    pub fn unknown(address: &str) -> Self {
        Self {
            address: address.to_string(),
            name: "Unknown Token".to_string(),
            symbol: "UNKNOWN".to_string(),
            price_usd: 0.0,
            market_cap: 0.0,
            liquidity: 0.0,
            volume_24h: 0.0,
            price_change_24h: 0.0,
            dex: "Unknown".to_string(),
            pair_address: String::new(),
            url: String::new(),
        }
    }
}

/// How to choose one pair when the aggregator lists several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PairSelection {
    /// Take the first pair in upstream order.
    #[default]
    First,
    /// Take the pair with the deepest USD liquidity; earlier pairs win ties.
    DeepestLiquidity,
}

impl FromStr for PairSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "first" => Ok(Self::First),
            "liquidity" | "deepest_liquidity" => Ok(Self::DeepestLiquidity),
            other => Err(format!(
                "unknown pair selection '{}' (expected first or liquidity)",
                other
            )),
        }
    }
}

impl PairSelection {
    fn select(self, pairs: Vec<DexPair>) -> Option<DexPair> {
        match self {
            Self::First => pairs.into_iter().next(),
            Self::DeepestLiquidity => pairs.into_iter().fold(None, |best, pair| match best {
                Some(current) if pair.liquidity_usd() <= current.liquidity_usd() => Some(current),
                _ => Some(pair),
            }),
        }
    }
}

/// Pairs stay raw so one unreadable pair cannot sink the others.
#[derive(Debug, Deserialize)]
struct PairsResponse {
    #[serde(default)]
    pairs: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DexPair {
    base_token: Option<BaseToken>,
    #[serde(default, deserialize_with = "lenient_number")]
    price_usd: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    market_cap: Option<f64>,
    liquidity: Option<Liquidity>,
    volume: Option<Window>,
    price_change: Option<Window>,
    dex_id: Option<String>,
    pair_address: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BaseToken {
    name: Option<String>,
    symbol: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Liquidity {
    #[serde(default, deserialize_with = "lenient_number")]
    usd: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Window {
    #[serde(default, deserialize_with = "lenient_number")]
    h24: Option<f64>,
}

/// Numbers arrive as JSON numbers or decimal strings. Anything else,
/// including NaN and infinities, reads as absent.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(decimal))
}

fn decimal(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

impl DexPair {
    fn liquidity_usd(&self) -> f64 {
        self.liquidity.as_ref().and_then(|l| l.usd).unwrap_or(0.0)
    }

    fn into_token_info(self, address: &str) -> TokenInfo {
        let liquidity = self.liquidity_usd();
        let (name, symbol) = match self.base_token {
            Some(token) => (token.name, token.symbol),
            None => (None, None),
        };

        TokenInfo {
            address: address.to_string(),
            name: name.unwrap_or_else(|| "Unknown".to_string()),
            symbol: symbol.unwrap_or_else(|| "UNKNOWN".to_string()),
            price_usd: self.price_usd.unwrap_or(0.0),
            market_cap: self.market_cap.unwrap_or(0.0),
            liquidity,
            volume_24h: self.volume.and_then(|v| v.h24).unwrap_or(0.0),
            price_change_24h: self.price_change.and_then(|v| v.h24).unwrap_or(0.0),
            dex: self.dex_id.unwrap_or_else(|| "Unknown".to_string()),
            pair_address: self.pair_address.unwrap_or_default(),
            url: self.url.unwrap_or_default(),
        }
    }
}

/// Reads token market data from the aggregator.
///
/// `fetch` has a total contract: any transport error, timeout, bad status,
/// malformed body or empty pair list yields [`TokenInfo::unknown`].
#[derive(Debug, Clone)]
pub struct MarketDataFetcher {
    client: Client,
    base_url: String,
    selection: PairSelection,
}

impl MarketDataFetcher {
    pub fn new(client: Client, base_url: impl Into<String>, selection: PairSelection) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            selection,
        }
    }

    pub async fn fetch(&self, address: &str) -> TokenInfo {
        match self.try_fetch(address).await {
            Ok(Some(info)) => info,
            Ok(None) => {
                debug!("No trading pairs listed for {}", address);
                TokenInfo::unknown(address)
            }
            Err(e) => {
                warn!("Failed to fetch token info for {}: {}", address, e);
                TokenInfo::unknown(address)
            }
        }
    }

    async fn try_fetch(&self, address: &str) -> Result<Option<TokenInfo>, reqwest::Error> {
        let url = format!("{}/tokens/{}", self.base_url, address);
        let response = self.client.get(&url).send().await?.error_for_status()?;
        let body: PairsResponse = response.json().await?;

        let pairs: Vec<DexPair> = body
            .pairs
            .unwrap_or_default()
            .into_iter()
            .filter_map(|raw| match serde_json::from_value(raw) {
                Ok(pair) => Some(pair),
                Err(e) => {
                    debug!("Skipping unreadable pair for {}: {}", address, e);
                    None
                }
            })
            .collect();

        Ok(self
            .selection
            .select(pairs)
            .map(|p| p.into_token_info(address)))
    }
}
