// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! PLEBS Bot - Solana token analysis and chatroom links for Telegram

use plebs_bot::config::Config;
use plebs_bot::format::format_token_message;
use plebs_bot::handlers::EventDispatcher;
use plebs_bot::health;
use plebs_bot::market::{ChatroomStatsFetcher, MarketDataFetcher, TokenAnalyzer};
use plebs_bot::store::RecordStore;
use plebs_bot::telegram::{self, TelegramChat};
use plebs_bot::validators::is_valid_solana_address;
use plebs_bot::wallet_api::WalletApi;

use anyhow::{anyhow, bail, Context};
use clap::Parser;
use std::sync::Arc;
use teloxide::Bot;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Debug, Parser)]
#[command(name = "plebs-bot", version, about = "PLEBS Telegram bot for Solana traders")]
struct Cli {
    /// Analyze one token address, print the report and exit.
    #[arg(long, value_name = "ADDRESS")]
    analyze: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    let config = Config::from_env().map_err(|e| {
        error!("Failed to load config: {}", e);
        anyhow!(e)
    })?;

    let http = reqwest::Client::builder()
        .timeout(config.http_timeout())
        .build()
        .context("failed to build HTTP client")?;

    let analyzer = TokenAnalyzer::new(
        MarketDataFetcher::new(
            http.clone(),
            config.dexscreener_api_url.clone(),
            config.pair_selection,
        ),
        ChatroomStatsFetcher::new(http.clone(), config.backend_api_url.clone()),
    );

    // One-shot analysis mode
    if let Some(address) = cli.analyze.as_deref().map(str::trim) {
        if !is_valid_solana_address(address) {
            bail!("{} is not a valid Solana address", address);
        }
        info!("🧪 Analyzing {}", address);
        let snapshot = analyzer.analyze(address).await;
        println!("{}", format_token_message(&snapshot));
        return Ok(());
    }

    info!("🚀 PLEBS Bot starting...");

    let token = config
        .telegram_token
        .clone()
        .context("TELEGRAM_BOT_TOKEN is required to run the bot")?;

    info!("📡 Backend: {}", config.backend_api_url);
    info!("💬 Chatroom: {}", config.chatroom_url);
    info!("📈 DexScreener: {} ({:?} pair)", config.dexscreener_api_url, config.pair_selection);
    info!("🔗 Solana RPC: {}", config.solana_rpc_url);

    let store = RecordStore::open(&config.database_path);
    store
        .init()
        .await
        .with_context(|| format!("failed to open record store at {}", config.database_path))?;
    store.log_summary().await;

    if let Some(port) = config.health_port {
        tokio::spawn(async move {
            if let Err(e) = health::start_health_server(port).await {
                error!("Health server stopped: {}", e);
            }
        });
    }

    let bot = Bot::new(token);
    let events = Arc::new(EventDispatcher::new(
        TelegramChat::new(bot.clone()),
        store,
        analyzer,
        WalletApi::new(http, &config.backend_api_url),
        config.chatroom_url.clone(),
    ));

    info!("✅ Ready to analyze tokens and connect traders!");
    telegram::run(bot, events).await;

    info!("👋 Shutting down...");
    Ok(())
}
