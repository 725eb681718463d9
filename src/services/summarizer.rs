use chrono::Utc;
use std::collections::BTreeMap;

use crate::config::AppConfig;
use crate::models::{MarketTickerSnapshot, TraderSnapshot};
use crate::openrouter::{ChatClient, ChatMessage};

/// Sentinel written verbatim when no API key is configured.
pub const SUMMARY_SKIPPED: &str = "AI Summary generation skipped: API key missing.";

/// Serialize the market map for the LLM prompt.
pub fn format_market_block(markets: &BTreeMap<String, MarketTickerSnapshot>) -> String {
    if markets.is_empty() {
        return "No market data available.".into();
    }
    serde_json::to_string_pretty(markets)
        .unwrap_or_else(|_| "No market data available.".into())
}

/// Fixed multi-line text block for one trader: address, total PnL, open
/// positions, recent fills.
pub fn format_trader_block(trader: &TraderSnapshot) -> String {
    let mut block = format!(
        "Trader: {} (Total Unrealized PNL: ${:.2})\n",
        trader.address, trader.total_unrealized_pnl
    );

    block.push_str("  Open Positions:\n");
    if trader.open_positions.is_empty() {
        block.push_str("    - None\n");
    } else {
        for pos in &trader.open_positions {
            block.push_str(&format!(
                "    - {} {}, Size: {:.2} ({}), Entry: ${:.4}, UPNL: ${:.2}, Lev: {:.1}x\n",
                pos.coin,
                pos.side,
                pos.size_tokens,
                pos.coin,
                pos.entry_price,
                pos.unrealized_pnl_usd,
                pos.leverage,
            ));
        }
    }

    block.push_str("  Recent Fills:\n");
    if trader.recent_fills.is_empty() {
        block.push_str("    - None\n");
    } else {
        for fill in &trader.recent_fills {
            block.push_str(&format!(
                "    - {}: {} {:.2} {} @ ${:.4}\n",
                fill.time, fill.side, fill.size_tokens, fill.coin, fill.price,
            ));
        }
    }

    block
}

/// Join all trader blocks for the LLM prompt.
pub fn format_traders_block(traders: &[TraderSnapshot]) -> String {
    if traders.is_empty() {
        return "No top trader data available to summarize.".into();
    }
    traders
        .iter()
        .map(format_trader_block)
        .collect::<Vec<_>>()
        .join("\n")
}

fn system_prompt() -> String {
    let now = Utc::now();
    format!(
        r#"You are an expert crypto trading analyst AI for "Insight", a Hyperliquid analytics dashboard.
Your task is to provide a concise, insightful, and data-driven summary of recent trading activity
on Hyperliquid based on the provided snapshot. Format your output in Markdown.

Key areas to cover:
1. **Overall Market Sentiment:** Briefly note whether the data looks bullish, bearish, or mixed for the monitored tickers.
2. **Key Ticker Analysis:** For each major ticker, highlight notable price, Open Interest, and Funding Rate readings. Mention any significant 24h volume.
3. **Top Trader Activity:** Identify very large positions, common themes across traders (aligned assets or direction), high-leverage plays, and significant P&L.
4. **Observations (Optional & Cautious):** If clear patterns emerge, mention them cautiously. Avoid giving direct financial advice.

Structure:
## Insight Report: Hyperliquid Activity Snapshot ({current_time})

### Market Overview
- **General Sentiment:** ...
- One bullet per monitored ticker: Price, OI, Funding, Volume, observations.

### Top Trader Activity
- One bullet per summarized trader: notable open positions, recent fills, and a brief read on their stance if discernible.

### Summary & Observations
- Concluding thoughts on current market dynamics, based only on the provided data.

Be professional, use financial terminology correctly, and keep it concise. Focus on what changed or is notable.
Current UTC time for report context: {current_time_utc}"#,
        current_time = now.format("%Y-%m-%d %H:%M UTC"),
        current_time_utc = now.to_rfc3339(),
    )
}

fn user_prompt(market_block: &str, traders_block: &str) -> String {
    format!(
        "Here is the latest data snapshot from Hyperliquid:\n\n\
         ## Market Data Snapshot:\n{market_block}\n\n\
         ## Top Traders Snapshot:\n{traders_block}\n\n\
         Please generate the report based on this data and the system prompt instructions."
    )
}

/// Generate the narrative summary for the report.
///
/// Single linear request/response with three terminal outcomes: the model's
/// text, the skip sentinel when no key is configured, or an error message
/// embedding the failure text. Never propagates.
pub async fn generate_summary(
    http: &reqwest::Client,
    config: &AppConfig,
    markets: &BTreeMap<String, MarketTickerSnapshot>,
    traders: &[TraderSnapshot],
) -> String {
    let Some(api_key) = config.openrouter_api_key.as_deref() else {
        tracing::warn!("OpenRouter API key not found — skipping AI summary");
        return SUMMARY_SKIPPED.to_string();
    };

    let client = ChatClient::new(
        http.clone(),
        config.openrouter_api_base.clone(),
        api_key.to_string(),
    );
    let messages = [
        ChatMessage::system(system_prompt()),
        ChatMessage::user(user_prompt(
            &format_market_block(markets),
            &format_traders_block(traders),
        )),
    ];

    tracing::info!(model = %config.summary_model, "Sending data for AI summarization");
    match client
        .complete(
            &config.summary_model,
            &messages,
            config.summary_temperature,
            config.summary_max_tokens,
        )
        .await
    {
        Ok(text) => {
            tracing::info!("AI summary received");
            text
        }
        Err(e) => {
            tracing::error!(error = %e, "AI summarization failed");
            format!("Error during AI summarization: {e}")
        }
    }
}
