use std::collections::{BTreeMap, HashMap};

use crate::config::AppConfig;
use crate::hyperliquid::types::coerce_f64;
use crate::hyperliquid::InfoClient;
use crate::models::MarketTickerSnapshot;

/// Max leverage used when the universe metadata carries none for a coin.
const DEFAULT_MAX_LEVERAGE: f64 = 10.0;

/// Fetch ticker snapshots for the configured allow-list.
///
/// Tickers outside the allow-list, or missing from the mid-price response,
/// are silently skipped. A failure of either underlying call is logged and
/// whatever was accumulated so far is returned — a malformed market response
/// must not abort the report run.
pub async fn fetch_market_snapshot(
    client: &InfoClient,
    max_leverage_by_coin: &HashMap<String, f64>,
    config: &AppConfig,
) -> BTreeMap<String, MarketTickerSnapshot> {
    tracing::info!("Fetching general market data (OI, funding, prices)");
    let mut snapshot = BTreeMap::new();

    let (meta, ctxs) = match client.meta_and_asset_ctxs().await {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch asset contexts");
            return snapshot;
        }
    };
    let all_mids = match client.all_mids().await {
        Ok(mids) => mids,
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch mid prices");
            return snapshot;
        }
    };

    // Contexts are aligned by index with the universe metadata.
    for (asset, ctx) in meta.universe.iter().zip(ctxs.iter()) {
        let coin = &asset.name;
        if !config.tickers_to_monitor.iter().any(|t| t == coin) {
            continue;
        }
        let Some(mid) = all_mids.get(coin) else {
            continue;
        };

        snapshot.insert(
            coin.clone(),
            MarketTickerSnapshot {
                name: coin.clone(),
                price: coerce_f64(Some(mid)),
                open_interest_usd: coerce_f64(ctx.open_interest.as_deref()),
                // The API reports funding as an hourly fraction.
                funding_rate_hourly: coerce_f64(ctx.funding.as_deref()) * 100.0,
                max_leverage: max_leverage_by_coin
                    .get(coin)
                    .copied()
                    .unwrap_or(DEFAULT_MAX_LEVERAGE),
                volume_24h_usd: coerce_f64(ctx.day_ntl_vlm.as_deref()),
            },
        );
    }

    tracing::info!(
        count = snapshot.len(),
        "Fetched market data for monitored tickers"
    );
    snapshot
}
