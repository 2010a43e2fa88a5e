// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Liveness probe for process supervisors.

use axum::{routing::get, Router};
use tracing::info;

pub fn router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Serve `GET /health` on all interfaces until the process exits.
pub async fn start_health_server(port: u16) -> Result<(), String> {
    let addr = format!("0.0.0.0:{}", port);
    info!("🌐 Starting health server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| format!("Failed to bind: {}", e))?;

    axum::serve(listener, router())
        .await
        .map_err(|e| format!("Server error: {}", e))?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{spawn_upstream, test_client};

    #[tokio::test]
    async fn health_returns_ok() {
        let base = spawn_upstream(router()).await;

        let response = test_client()
            .get(format!("{base}/health"))
            .send()
            .await
            .unwrap();

        assert!(response.status().is_success());
        assert_eq!(response.text().await.unwrap(), "OK");
    }

    #[tokio::test]
    async fn other_paths_are_not_found() {
        let base = spawn_upstream(router()).await;

        let response = test_client().get(format!("{base}/metrics")).send().await.unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    }
}
