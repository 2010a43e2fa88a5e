// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Chat message rendering.
//!
//! Messages use Telegram's HTML parse mode. Anything that came from an
//! upstream service or a user goes through `escape` first.

pub mod menus;

pub use menus::{ButtonAction, Menu, MenuButton};

use crate::market::MarketSnapshot;
use crate::store::UserRecord;
use teloxide::utils::html::escape;

pub const ANALYZING_TEXT: &str = "🔍 Analyzing token... Please wait a moment.";

pub const NOT_AN_ADDRESS_HINT: &str =
    "🔍 To analyze a token, paste its contract address.\n\nUse /help to see all available commands.";

pub const CONNECT_WALLET_FIRST: &str = "❌ Please connect your wallet first!";

pub const TRADE_VIA_WALLET_SERVICE: &str =
    "⏳ Trade execution runs through the PLEBS wallet service and is not enabled from chat yet.";

pub const COMING_SOON: &str = "🚧 Coming soon!";

/// Abbreviate a USD magnitude: `$3.40M`, `$2.50K`, `$500.00`.
pub fn format_number(num: f64) -> String {
    if num >= 1_000_000.0 {
        format!("${:.2}M", num / 1_000_000.0)
    } else if num >= 1_000.0 {
        format!("${:.2}K", num / 1_000.0)
    } else {
        format!("${:.2}", num)
    }
}

/// Coarse label derived from pool liquidity in USD.
///
/// This is a display aid only. It is not a security audit and says nothing
/// about mint authority, holder concentration or honeypot behaviour.
pub fn risk_label(liquidity_usd: f64) -> &'static str {
    if liquidity_usd > 50_000.0 {
        "🟢 Safe"
    } else if liquidity_usd > 10_000.0 {
        "🟡 Moderate"
    } else {
        "🔴 High Risk"
    }
}

fn change_indicator(change: f64) -> &'static str {
    if change >= 0.0 {
        "🟢"
    } else {
        "🔴"
    }
}

/// Render the token report. Pure in its input, so unchanged data always
/// renders to the same bytes.
pub fn format_token_message(snapshot: &MarketSnapshot) -> String {
    let token = &snapshot.token;
    let room = &snapshot.chatroom;
    let room_status = if room.online_now > 0 { "🟢 Active" } else { "🟡 Quiet" };

    format!(
        "🪙 <b>{name} ({symbol})</b>\n\
         \n\
         💰 <b>Price Info:</b>\n\
         ├ Price: ${price:.6}\n\
         ├ 24h Change: {indicator} {change:.2}%\n\
         ├ Market Cap: {market_cap}\n\
         └ Liquidity: {liquidity}\n\
         \n\
         📊 <b>Trading Stats:</b>\n\
         ├ 24h Volume: {volume}\n\
         ├ DEX: {dex}\n\
         └ Security: {risk}\n\
         \n\
         💬 <b>PLEBS Chatroom:</b>\n\
         ├ Online Now: {online} users\n\
         ├ Total Messages: {messages}\n\
         ├ Active Traders: {active}\n\
         └ Room Status: {room_status}\n\
         \n\
         🔗 <b>Contract:</b> <code>{address}</code>\n\
         \n\
         <i>Join our chatroom to discuss this token with other traders and get real-time insights!</i>",
        name = escape(&token.name),
        symbol = escape(&token.symbol),
        price = token.price_usd,
        indicator = change_indicator(token.price_change_24h),
        change = token.price_change_24h,
        market_cap = format_number(token.market_cap),
        liquidity = format_number(token.liquidity),
        volume = format_number(token.volume_24h),
        dex = escape(&token.dex),
        risk = risk_label(token.liquidity),
        online = room.online_now,
        messages = room.total_messages,
        active = room.active_users,
        room_status = room_status,
        address = escape(&token.address),
    )
}

pub fn welcome_text(display_name: &str) -> String {
    format!(
        "🚀 <b>Welcome to PLEBS - The People's Launchpad!</b>\n\
         \n\
         Hey {name}! I'm your gateway to safe and profitable token trading on Solana.\n\
         \n\
         🔑 <b>What I can do:</b>\n\
         ├ 📈 Analyze any token by contract address\n\
         ├ 💱 Help you swap tokens safely\n\
         ├ 💬 Connect you to active trading communities\n\
         ├ 🛡️ Provide security insights before you trade\n\
         └ 📊 Real-time market data and alerts\n\
         \n\
         🔐 <b>Security First:</b>\n\
         Your safety is our priority. I'll help you verify tokens and connect with trusted traders before making any moves.\n\
         \n\
         <b>To get started:</b>\n\
         1. 📱 Connect your wallet: /wallet\n\
         2. 🎯 Analyze a token: Just paste any contract address\n\
         3. 💬 Join chatrooms for tokens you're interested in\n\
         \n\
         <b>Need help?</b> Use /help for all commands.",
        name = escape(display_name),
    )
}

pub const HELP_TEXT: &str = "🤖 <b>PLEBS Bot Commands:</b>\n\
\n\
<b>Token Analysis:</b>\n\
├ Paste any Solana contract address for instant analysis\n\
└ 🔄 Use Refresh on a report for live numbers\n\
\n\
<b>Wallet &amp; Trading:</b>\n\
├ <code>/wallet</code> - Connect/view your wallet\n\
└ 🟢 Buy / 🔴 Sell from any token report\n\
\n\
<b>General:</b>\n\
├ <code>/start</code> - Show the welcome menu\n\
└ <code>/help</code> - Show this message\n\
\n\
<b>Just paste any token contract address to get started!</b>";

pub fn wallet_connected_text(user: &UserRecord) -> String {
    format!(
        "🔗 <b>Wallet Connected</b>\n\
         \n\
         Address: <code>{address}</code>\n\
         Status: {status}\n\
         Total Volume: {volume}\n\
         \n\
         Use the buttons below to manage your wallet:",
        address = escape(user.wallet_address.as_deref().unwrap_or_default()),
        status = if user.is_verified { "✅ Verified" } else { "⏳ Pending" },
        volume = format_number(user.total_volume),
    )
}

pub const WALLET_CONNECT_TEXT: &str = "🔐 <b>Connect Your Wallet</b>\n\
\n\
To start trading, you need to connect a Solana wallet.\n\
\n\
<b>Options:</b>\n\
├ 🔗 Connect existing wallet (Phantom, Solflare, etc.)\n\
└ ➕ Create new wallet (we'll generate one for you)\n\
\n\
<b>Why connect?</b>\n\
├ 💱 Swap tokens directly through me\n\
├ 🛡️ Enhanced security features\n\
├ 📊 Portfolio tracking\n\
└ 💬 Access to premium chatrooms\n\
\n\
Your keys, your crypto. We never store your private keys.";

pub fn wallet_created_text(public_key: &str) -> String {
    format!(
        "✅ <b>Wallet Created</b>\n\
         \n\
         Address: <code>{}</code>\n\
         \n\
         Fund it with SOL to start trading. Use /wallet to manage it.",
        escape(public_key)
    )
}

pub const BUY_PROMPT_TEXT: &str =
    "💰 <b>Select Buy Amount:</b>\n\nChoose how much SOL you want to spend:";

pub const SELL_PROMPT_TEXT: &str =
    "💸 <b>Select Sell Amount:</b>\n\nChoose what percentage of your tokens you want to sell:";

pub const CHATROOM_JOIN_TEXT: &str = "💬 <b>Join Token Chatroom</b>\n\
\n\
Connect with other traders discussing this token:\n\
\n\
🎯 <b>Features:</b>\n\
├ Real-time price discussions\n\
├ Technical analysis sharing\n\
├ Trade alerts and signals\n\
├ Community sentiment tracking\n\
└ Direct wallet integration\n\
\n\
🔐 <b>Safe Environment:</b>\n\
Our chatrooms are moderated and spam-protected.\n\
\n\
Click below to join the conversation!";

pub const BROWSE_ROOMS_TEXT: &str =
    "💬 <b>PLEBS Chatrooms</b>\n\nBrowse live token rooms and jump into the conversation.";

pub fn chart_text(address: &str) -> String {
    format!("📈 <b>Chart</b>\n\n<code>{}</code>", escape(address))
}

pub fn analysis_failed_text(error: &str) -> String {
    format!(
        "❌ Error analyzing token. Please check the contract address and try again.\n\nError: {}",
        escape(error)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::{ChatroomStats, TokenInfo};

    const MINT: &str = "7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU";

    fn snapshot(liquidity: f64, change: f64) -> MarketSnapshot {
        let mut token = TokenInfo::unknown(MINT);
        token.name = "Bonk".into();
        token.symbol = "BONK".into();
        token.price_usd = 0.0000213;
        token.market_cap = 1_500_000_000.0;
        token.liquidity = liquidity;
        token.volume_24h = 2_500.0;
        token.price_change_24h = change;
        token.dex = "raydium".into();
        MarketSnapshot {
            token,
            chatroom: ChatroomStats {
                active_users: 4,
                total_messages: 120,
                online_now: 2,
                room_created: None,
            },
        }
    }

    #[test]
    fn formats_magnitudes() {
        assert_eq!(format_number(500.0), "$500.00");
        assert_eq!(format_number(2_500.0), "$2.50K");
        assert_eq!(format_number(3_400_000.0), "$3.40M");
        assert_eq!(format_number(0.0), "$0.00");
        assert_eq!(format_number(999.999), "$1000.00");
        assert_eq!(format_number(1_000.0), "$1.00K");
        assert_eq!(format_number(1_000_000.0), "$1.00M");
    }

    #[test]
    fn risk_tiers_follow_liquidity() {
        assert_eq!(risk_label(50_001.0), "🟢 Safe");
        assert_eq!(risk_label(50_000.0), "🟡 Moderate");
        assert_eq!(risk_label(10_001.0), "🟡 Moderate");
        assert_eq!(risk_label(10_000.0), "🔴 High Risk");
        assert_eq!(risk_label(0.0), "🔴 High Risk");
    }

    #[test]
    fn report_contains_every_figure() {
        let text = format_token_message(&snapshot(75_000.0, 12.5));

        assert!(text.contains("<b>Bonk (BONK)</b>"));
        assert!(text.contains("Price: $0.000021"));
        assert!(text.contains("24h Change: 🟢 12.50%"));
        assert!(text.contains("Market Cap: $1500.00M"));
        assert!(text.contains("Liquidity: $75.00K"));
        assert!(text.contains("24h Volume: $2.50K"));
        assert!(text.contains("DEX: raydium"));
        assert!(text.contains("Security: 🟢 Safe"));
        assert!(text.contains("Online Now: 2 users"));
        assert!(text.contains("Total Messages: 120"));
        assert!(text.contains("Active Traders: 4"));
        assert!(text.contains("Room Status: 🟢 Active"));
        assert!(text.contains(&format!("<code>{MINT}</code>")));
    }

    #[test]
    fn negative_change_and_quiet_room() {
        let mut snap = snapshot(5_000.0, -3.0);
        snap.chatroom = ChatroomStats::default();
        let text = format_token_message(&snap);

        assert!(text.contains("24h Change: 🔴 -3.00%"));
        assert!(text.contains("Security: 🔴 High Risk"));
        assert!(text.contains("Room Status: 🟡 Quiet"));
    }

    #[test]
    fn unknown_token_report() {
        let snap = MarketSnapshot {
            token: TokenInfo::unknown(MINT),
            chatroom: ChatroomStats::default(),
        };
        let text = format_token_message(&snap);
        assert!(text.contains("Unknown Token (UNKNOWN)"));
        assert!(text.contains("Price: $0.000000"));
        assert!(text.contains("Market Cap: $0.00"));
    }

    #[test]
    fn upstream_strings_are_escaped() {
        let mut snap = snapshot(1.0, 0.0);
        snap.token.name = "<script>&".into();
        let text = format_token_message(&snap);
        assert!(text.contains("&lt;script&gt;&amp;"));
        assert!(!text.contains("<script>"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let snap = snapshot(20_000.0, 1.0);
        assert_eq!(format_token_message(&snap), format_token_message(&snap.clone()));
    }

    #[test]
    fn wallet_panel_shows_status() {
        let mut user = UserRecord::new(1, "erin");
        user.wallet_address = Some(MINT.into());
        user.total_volume = 2_500.0;
        let text = wallet_connected_text(&user);
        assert!(text.contains(MINT));
        assert!(text.contains("⏳ Pending"));
        assert!(text.contains("$2.50K"));
    }

    #[test]
    fn failure_text_carries_error() {
        let text = analysis_failed_text("chat not found <x>");
        assert!(text.contains("Error: chat not found &lt;x&gt;"));
    }
}
