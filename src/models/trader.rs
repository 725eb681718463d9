use serde::{Deserialize, Serialize};

use super::PositionSide;

// ---------------------------------------------------------------------------
// TraderList — output of the scraper, input of the report generator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraderList {
    pub last_scraped_utc: String,
    pub source_url: String,
    pub trader_addresses: Vec<String>,
}

// ---------------------------------------------------------------------------
// TraderSnapshot
// ---------------------------------------------------------------------------

/// An open perp position with nonzero size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenPosition {
    pub coin: String,
    pub side: PositionSide,
    pub size_tokens: f64,
    pub position_value_usd: f64,
    pub entry_price: f64,
    pub unrealized_pnl_usd: f64,
    pub leverage: f64,
}

/// One of the trader's most recent fills, capped per config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentFill {
    pub coin: String,
    pub side: String,
    pub size_tokens: f64,
    pub price: f64,
    pub value_usd: f64,
    pub time: String,
    pub is_liquidation: bool,
}

/// Per-address snapshot. Produced even when the fetch fails: the `error`
/// field carries the failure and the lists stay empty, so one bad address
/// never aborts the batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraderSnapshot {
    pub address: String,
    pub open_positions: Vec<OpenPosition>,
    pub recent_fills: Vec<RecentFill>,
    pub total_unrealized_pnl: f64,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TraderSnapshot {
    /// An empty snapshot carrying only the failure text.
    pub fn failed(address: &str, timestamp: String, error: String) -> Self {
        Self {
            address: address.to_string(),
            open_positions: Vec::new(),
            recent_fills: Vec::new(),
            total_unrealized_pnl: 0.0,
            timestamp,
            error: Some(error),
        }
    }
}
