use std::collections::BTreeMap;

use hl_insight::models::{
    MarketTickerSnapshot, OpenPosition, PositionSide, RecentFill, TraderSnapshot,
};
use hl_insight::services::summarizer::{
    format_market_block, format_trader_block, format_traders_block, SUMMARY_SKIPPED,
};

fn sample_trader() -> TraderSnapshot {
    TraderSnapshot {
        address: "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa".into(),
        open_positions: vec![OpenPosition {
            coin: "BTC".into(),
            side: PositionSide::Long,
            size_tokens: 2.5,
            position_value_usd: 150_000.0,
            entry_price: 60_000.0,
            unrealized_pnl_usd: 1_250.75,
            leverage: 20.0,
        }],
        recent_fills: vec![RecentFill {
            coin: "BTC".into(),
            side: "B".into(),
            size_tokens: 1.0,
            price: 60_000.0,
            value_usd: 60_000.0,
            time: "2025-01-01 12:00:00 UTC".into(),
            is_liquidation: false,
        }],
        total_unrealized_pnl: 1_250.75,
        timestamp: "2025-01-01T12:00:00.000000Z".into(),
        error: None,
    }
}

#[test]
fn test_trader_block_contains_address_pnl_positions_and_fills() {
    let block = format_trader_block(&sample_trader());

    assert!(block.starts_with(
        "Trader: 0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa (Total Unrealized PNL: $1250.75)"
    ));
    assert!(block.contains("Open Positions:"));
    assert!(block.contains("- BTC LONG, Size: 2.50 (BTC), Entry: $60000.0000, UPNL: $1250.75, Lev: 20.0x"));
    assert!(block.contains("Recent Fills:"));
    assert!(block.contains("- 2025-01-01 12:00:00 UTC: B 1.00 BTC @ $60000.0000"));
}

#[test]
fn test_trader_block_marks_empty_sections_with_none() {
    let mut trader = sample_trader();
    trader.open_positions.clear();
    trader.recent_fills.clear();
    trader.total_unrealized_pnl = 0.0;

    let block = format_trader_block(&trader);
    assert_eq!(block.matches("    - None\n").count(), 2);
}

#[test]
fn test_traders_block_placeholder_when_empty() {
    assert_eq!(
        format_traders_block(&[]),
        "No top trader data available to summarize."
    );
}

#[test]
fn test_traders_block_joins_all_traders() {
    let mut other = sample_trader();
    other.address = "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb".into();
    let block = format_traders_block(&[sample_trader(), other]);
    assert!(block.contains("0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"));
    assert!(block.contains("0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb"));
}

#[test]
fn test_market_block_placeholder_when_empty() {
    let markets: BTreeMap<String, MarketTickerSnapshot> = BTreeMap::new();
    assert_eq!(format_market_block(&markets), "No market data available.");
}

#[test]
fn test_market_block_is_pretty_json() {
    let mut markets = BTreeMap::new();
    markets.insert(
        "SOL".to_string(),
        MarketTickerSnapshot {
            name: "SOL".into(),
            price: 155.25,
            open_interest_usd: 120_000_000.0,
            funding_rate_hourly: 0.002,
            max_leverage: 20.0,
            volume_24h_usd: 310_000_000.0,
        },
    );

    let block = format_market_block(&markets);
    let parsed: serde_json::Value = serde_json::from_str(&block).expect("valid JSON");
    assert_eq!(parsed["SOL"]["price"], 155.25);
}

#[test]
fn test_skip_sentinel_text_is_exact() {
    assert_eq!(
        SUMMARY_SKIPPED,
        "AI Summary generation skipped: API key missing."
    );
}
