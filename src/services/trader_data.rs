use chrono::{DateTime, Utc};

use crate::hyperliquid::types::{coerce_f64, ClearinghouseState, Fill};
use crate::hyperliquid::{InfoClient, InfoClientError};
use crate::models::{utc_now_string, OpenPosition, PositionSide, RecentFill, TraderSnapshot};

/// Build open positions from a clearinghouse state, keeping only entries with
/// nonzero signed size.
pub fn build_open_positions(state: &ClearinghouseState) -> Vec<OpenPosition> {
    let mut positions = Vec::new();

    for asset_pos in &state.asset_positions {
        let pos = &asset_pos.position;
        let szi = coerce_f64(Some(&pos.szi));
        if szi == 0.0 {
            continue;
        }

        let entry_price = coerce_f64(pos.entry_px.as_deref());
        positions.push(OpenPosition {
            coin: pos.coin.clone(),
            side: PositionSide::from_signed_size(szi),
            size_tokens: szi.abs(),
            position_value_usd: (szi * entry_price).abs(),
            entry_price,
            unrealized_pnl_usd: coerce_f64(pos.unrealized_pnl.as_deref()),
            leverage: pos.leverage.as_ref().and_then(|l| l.value).unwrap_or(0.0),
        });
    }

    positions
}

/// Normalize the most recent fills, capped at `cap`.
///
/// The API returns newest-first, but the ordering is imposed here by
/// timestamp rather than assumed, so truncation always keeps the true
/// most-recent fills.
pub fn build_recent_fills(mut fills: Vec<Fill>, cap: usize) -> Vec<RecentFill> {
    fills.sort_by(|a, b| b.time.cmp(&a.time));

    fills
        .into_iter()
        .take(cap)
        .map(|fill| {
            let size = coerce_f64(Some(&fill.sz));
            let price = coerce_f64(Some(&fill.px));
            RecentFill {
                side: fill.side.to_uppercase(),
                size_tokens: size,
                price,
                value_usd: size * price,
                time: format_fill_time(fill.time),
                is_liquidation: fill.liquidation_mark_px.is_some(),
                coin: fill.coin,
            }
        })
        .collect()
}

fn format_fill_time(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_default()
}

/// Fetch one trader's detail snapshot. Never errors: an internal failure
/// produces a snapshot with empty lists and the error text, keeping
/// per-trader failures isolated and visible in the artifact.
pub async fn fetch_trader_snapshot(
    client: &InfoClient,
    address: &str,
    fills_cap: usize,
) -> TraderSnapshot {
    tracing::info!(address = %address, "Fetching detailed trader data");
    let timestamp = utc_now_string();

    match fetch_detail(client, address, fills_cap).await {
        Ok((open_positions, recent_fills)) => {
            let total_unrealized_pnl = open_positions.iter().map(|p| p.unrealized_pnl_usd).sum();
            tracing::info!(
                address = %address,
                positions = open_positions.len(),
                fills = recent_fills.len(),
                "Processed trader data"
            );
            TraderSnapshot {
                address: address.to_string(),
                open_positions,
                recent_fills,
                total_unrealized_pnl,
                timestamp,
                error: None,
            }
        }
        Err(e) => {
            tracing::error!(address = %address, error = %e, "Failed to fetch trader data");
            TraderSnapshot::failed(address, timestamp, e.to_string())
        }
    }
}

async fn fetch_detail(
    client: &InfoClient,
    address: &str,
    fills_cap: usize,
) -> Result<(Vec<OpenPosition>, Vec<RecentFill>), InfoClientError> {
    let state = client.clearinghouse_state(address).await?;
    let fills = client.user_fills(address).await?;
    Ok((
        build_open_positions(&state),
        build_recent_fills(fills, fills_cap),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hyperliquid::types::{AssetPosition, LeverageInfo, PositionData};

    fn position(coin: &str, szi: &str, entry_px: Option<&str>, upnl: Option<&str>) -> AssetPosition {
        AssetPosition {
            position: PositionData {
                coin: coin.into(),
                szi: szi.into(),
                entry_px: entry_px.map(String::from),
                unrealized_pnl: upnl.map(String::from),
                leverage: Some(LeverageInfo {
                    kind: Some("cross".into()),
                    value: Some(20.0),
                }),
            },
            kind: Some("oneWay".into()),
        }
    }

    fn fill(coin: &str, side: &str, sz: &str, px: &str, time: i64, liq: Option<&str>) -> Fill {
        Fill {
            coin: coin.into(),
            px: px.into(),
            sz: sz.into(),
            side: side.into(),
            time,
            liquidation_mark_px: liq.map(String::from),
        }
    }

    #[test]
    fn test_zero_size_positions_are_filtered() {
        let state = ClearinghouseState {
            asset_positions: vec![
                position("BTC", "0.0", Some("60000"), Some("0")),
                position("ETH", "2.5", Some("3000"), Some("150")),
            ],
        };
        let positions = build_open_positions(&state);
        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0].coin, "ETH");
    }

    #[test]
    fn test_side_follows_sign_of_size() {
        let state = ClearinghouseState {
            asset_positions: vec![
                position("BTC", "1.5", Some("60000"), Some("100")),
                position("SOL", "-200", Some("150"), Some("-40")),
            ],
        };
        let positions = build_open_positions(&state);
        assert_eq!(positions[0].side, PositionSide::Long);
        assert_eq!(positions[1].side, PositionSide::Short);
        // Sizes and values are absolute regardless of direction.
        assert_eq!(positions[1].size_tokens, 200.0);
        assert_eq!(positions[1].position_value_usd, 200.0 * 150.0);
    }

    #[test]
    fn test_missing_numeric_fields_coerce_to_zero() {
        let state = ClearinghouseState {
            asset_positions: vec![AssetPosition {
                position: PositionData {
                    coin: "DOGE".into(),
                    szi: "1000".into(),
                    entry_px: None,
                    unrealized_pnl: None,
                    leverage: None,
                },
                kind: None,
            }],
        };
        let positions = build_open_positions(&state);
        assert_eq!(positions[0].entry_price, 0.0);
        assert_eq!(positions[0].position_value_usd, 0.0);
        assert_eq!(positions[0].unrealized_pnl_usd, 0.0);
        assert_eq!(positions[0].leverage, 0.0);
    }

    #[test]
    fn test_fills_sorted_newest_first_then_capped() {
        let fills = vec![
            fill("BTC", "B", "1", "60000", 1_000, None),
            fill("ETH", "A", "2", "3000", 3_000, None),
            fill("SOL", "B", "3", "150", 2_000, None),
        ];
        let recent = build_recent_fills(fills, 2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].coin, "ETH");
        assert_eq!(recent[1].coin, "SOL");
    }

    #[test]
    fn test_fill_normalization() {
        let fills = vec![fill("BTC", "b", "0.5", "60000", 1_700_000_000_000, Some("59000"))];
        let recent = build_recent_fills(fills, 5);
        assert_eq!(recent[0].side, "B");
        assert_eq!(recent[0].side, recent[0].side.to_uppercase());
        assert_eq!(recent[0].value_usd, 0.5 * 60000.0);
        assert!(recent[0].is_liquidation);
        assert!(recent[0].time.ends_with("UTC"));
    }

    #[test]
    fn test_fill_cap_never_exceeded() {
        let fills: Vec<Fill> = (0..20)
            .map(|i| fill("BTC", "B", "1", "60000", i, None))
            .collect();
        assert_eq!(build_recent_fills(fills, 5).len(), 5);
    }

    #[test]
    fn test_total_pnl_is_sum_over_positions() {
        let state = ClearinghouseState {
            asset_positions: vec![
                position("BTC", "1", Some("60000"), Some("250.5")),
                position("ETH", "-3", Some("3000"), Some("-100.5")),
            ],
        };
        let positions = build_open_positions(&state);
        let total: f64 = positions.iter().map(|p| p.unrealized_pnl_usd).sum();
        assert_eq!(total, 150.0);
    }
}
