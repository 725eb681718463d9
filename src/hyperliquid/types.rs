use serde::{Deserialize, Serialize};

/// Numeric coercion at the wire boundary. Hyperliquid encodes most numbers as
/// strings; missing, null, or unparsable values become 0.0 so that every
/// downstream artifact field carries a concrete number. This can mask
/// genuinely absent data, which is accepted for display simplicity.
pub fn coerce_f64(value: Option<&str>) -> f64 {
    value.and_then(|v| v.parse::<f64>().ok()).unwrap_or(0.0)
}

// ---------------------------------------------------------------------------
// Metadata (info type: "meta" / "metaAndAssetCtxs")
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetMeta {
    pub name: String,
    #[serde(default)]
    pub max_leverage: Option<f64>,
    #[serde(default)]
    pub sz_decimals: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Meta {
    pub universe: Vec<AssetMeta>,
}

/// Per-asset context, aligned by index with `Meta::universe`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetCtx {
    #[serde(default)]
    pub funding: Option<String>,
    #[serde(default)]
    pub open_interest: Option<String>,
    #[serde(default)]
    pub day_ntl_vlm: Option<String>,
    #[serde(default)]
    pub mark_px: Option<String>,
    #[serde(default)]
    pub mid_px: Option<String>,
}

// ---------------------------------------------------------------------------
// Account state (info type: "clearinghouseState")
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LeverageInfo {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionData {
    pub coin: String,
    /// Signed position size; sign encodes the direction.
    pub szi: String,
    #[serde(default)]
    pub entry_px: Option<String>,
    #[serde(default)]
    pub unrealized_pnl: Option<String>,
    #[serde(default)]
    pub leverage: Option<LeverageInfo>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssetPosition {
    pub position: PositionData,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearinghouseState {
    #[serde(default)]
    pub asset_positions: Vec<AssetPosition>,
}

// ---------------------------------------------------------------------------
// Fills (info type: "userFills")
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Fill {
    pub coin: String,
    pub px: String,
    pub sz: String,
    pub side: String,
    /// Millisecond epoch timestamp.
    pub time: i64,
    #[serde(default)]
    pub liquidation_mark_px: Option<String>,
}
