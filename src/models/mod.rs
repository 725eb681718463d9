pub mod market;
pub mod report;
pub mod trader;

pub use market::MarketTickerSnapshot;
pub use report::{ConsolidatedReport, ErrorReport};
pub use trader::{OpenPosition, RecentFill, TraderList, TraderSnapshot};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// PositionSide
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PositionSide {
    Long,
    Short,
}

impl PositionSide {
    /// Derive the side from the signed position size (`szi`).
    pub fn from_signed_size(szi: f64) -> Self {
        if szi > 0.0 {
            PositionSide::Long
        } else {
            PositionSide::Short
        }
    }
}

impl fmt::Display for PositionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionSide::Long => write!(f, "LONG"),
            PositionSide::Short => write!(f, "SHORT"),
        }
    }
}

/// ISO-8601 UTC timestamp with a trailing `Z`, as written into every artifact.
pub fn utc_now_string() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
