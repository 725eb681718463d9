use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{MarketTickerSnapshot, TraderSnapshot};

/// The final artifact (`report_summary.json`), fully overwritten each run.
///
/// The market map is a `BTreeMap` so repeated runs over identical upstream
/// data serialize byte-identically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsolidatedReport {
    pub last_updated_utc: String,
    pub market_snapshot: BTreeMap<String, MarketTickerSnapshot>,
    pub top_traders_snapshot: Vec<TraderSnapshot>,
    pub ai_summary_markdown: String,
    pub generation_duration_seconds: f64,
}

/// Written as `error_report.json` instead of the normal artifact set when the
/// exchange client fails to initialize.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    pub timestamp: String,
    pub status: String,
    pub message: String,
    pub error_details: String,
}
