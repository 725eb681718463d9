use serde::{Deserialize, Serialize};

/// One monitored perp ticker, keyed by symbol in `market_snapshot.json`.
///
/// Every numeric field carries a concrete value; absent upstream data has
/// already been coerced to 0.0 at the wire boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketTickerSnapshot {
    pub name: String,
    pub price: f64,
    pub open_interest_usd: f64,
    pub funding_rate_hourly: f64,
    pub max_leverage: f64,
    pub volume_24h_usd: f64,
}
