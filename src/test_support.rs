// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Shared fixtures for unit tests.

use axum::Router;
use reqwest::Client;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

static DB_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake upstream");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("fake upstream");
    });
    format!("http://{}", addr)
}

pub fn test_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .expect("http client")
}

/// A fresh SQLite file path unique to this process and call.
pub fn temp_db_path(tag: &str) -> PathBuf {
    let n = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
    let path = std::env::temp_dir().join(format!(
        "plebs-bot-{}-{}-{}.db",
        tag,
        std::process::id(),
        n
    ));
    let _ = std::fs::remove_file(&path);
    path
}
