// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Client for the PLEBS wallet service.
//!
//! Key custody and swap execution live in that service; this client only
//! forwards requests.

use crate::error::{BotError, BotResult};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info};

/// Public half of a wallet generated by the service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedWallet {
    pub public_key: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyRequest {
    pub token_mint: String,
    pub sol_amount: f64,
    pub user_public_key: String,
    pub private_key: String,
}

#[derive(Debug, Clone)]
pub struct WalletApi {
    client: Client,
    base_url: String,
}

impl WalletApi {
    /// `backend_url` is the API root, e.g. `http://localhost:3000/api`.
    pub fn new(client: Client, backend_url: &str) -> Self {
        Self {
            client,
            base_url: format!("{}/wallet", backend_url.trim_end_matches('/')),
        }
    }

    async fn post<B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) -> BotResult<Value> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let response = self.client.post(&url).json(body).send().await.map_err(|e| {
            error!("Wallet API error at {}: {}", endpoint, e);
            e
        })?;

        let status = response.status();
        if !status.is_success() {
            error!("Wallet API error at {}: status {}", endpoint, status);
            return Err(BotError::WalletStatus(status.as_u16()));
        }

        Ok(response.json().await?)
    }

    /// `POST /wallet/generate`.
    pub async fn generate_wallet(&self) -> BotResult<GeneratedWallet> {
        let body = self.post("generate", &serde_json::json!({})).await?;
        let wallet: GeneratedWallet = serde_json::from_value(body)?;
        info!("👛 Wallet service generated {}", wallet.public_key);
        Ok(wallet)
    }

    /// `POST /wallet/buy`. Returns the service's receipt untouched.
    pub async fn buy_token(&self, request: &BuyRequest) -> BotResult<Value> {
        info!(
            "🟢 Forwarding buy of {} SOL for {} to wallet service",
            request.sol_amount, request.token_mint
        );
        self.post("buy", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{spawn_upstream, test_client};
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::json;

    #[tokio::test]
    async fn generates_wallet() {
        let router = Router::new().route(
            "/api/wallet/generate",
            post(|| async {
                Json(json!({
                    "publicKey": "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin",
                    "privateKey": "secret",
                }))
            }),
        );
        let base = spawn_upstream(router).await;
        let api = WalletApi::new(test_client(), &format!("{base}/api/"));

        let wallet = api.generate_wallet().await.unwrap();
        assert_eq!(wallet.public_key, "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin");
    }

    #[tokio::test]
    async fn buy_sends_camel_case_body() {
        let router = Router::new().route(
            "/api/wallet/buy",
            post(|Json(body): Json<Value>| async move {
                Json(json!({ "signature": "sig", "echo": body }))
            }),
        );
        let base = spawn_upstream(router).await;
        let api = WalletApi::new(test_client(), &format!("{base}/api"));

        let receipt = api
            .buy_token(&BuyRequest {
                token_mint: "mint".into(),
                sol_amount: 0.5,
                user_public_key: "pub".into(),
                private_key: "priv".into(),
            })
            .await
            .unwrap();

        assert_eq!(receipt["signature"], "sig");
        assert_eq!(receipt["echo"]["tokenMint"], "mint");
        assert_eq!(receipt["echo"]["solAmount"], 0.5);
        assert_eq!(receipt["echo"]["userPublicKey"], "pub");
        assert_eq!(receipt["echo"]["privateKey"], "priv");
    }

    #[tokio::test]
    async fn error_status_is_reported() {
        let router = Router::new().route(
            "/api/wallet/generate",
            post(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        );
        let base = spawn_upstream(router).await;
        let api = WalletApi::new(test_client(), &format!("{base}/api"));

        assert!(matches!(api.generate_wallet().await, Err(BotError::WalletStatus(503))));
    }

    #[tokio::test]
    async fn unexpected_payload_is_an_error() {
        let router = Router::new().route(
            "/api/wallet/generate",
            post(|| async { Json(json!({ "address": "nope" })) }),
        );
        let base = spawn_upstream(router).await;
        let api = WalletApi::new(test_client(), &format!("{base}/api"));

        assert!(matches!(api.generate_wallet().await, Err(BotError::WalletPayload(_))));
    }
}
