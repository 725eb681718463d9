use anyhow::Result;
use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::config::AppConfig;
use crate::hyperliquid::InfoClient;
use crate::models::{utc_now_string, ConsolidatedReport, ErrorReport, TraderSnapshot};
use crate::services::{market_data, summarizer, trader_data};
use crate::storage;

/// Run one full report-generation pass.
///
/// Exchange metadata failure is the single fatal case: it writes
/// `error_report.json` and aborts before any other artifact exists. Every
/// other failure degrades to an inert placeholder in the output.
pub async fn run_report(config: &AppConfig) -> Result<()> {
    let started = Instant::now();
    tracing::info!("Starting periodic insight report generation");

    let mut addresses = storage::load_trader_addresses(&config.trader_list_path);
    addresses.truncate(config.traders_to_process);
    if addresses.is_empty() {
        tracing::warn!("No trader addresses loaded — report will not include trader activity");
    } else {
        tracing::info!(
            count = addresses.len(),
            "Will fetch detailed data for traders from the list"
        );
    }

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .build()?;
    let client = InfoClient::with_base_url(http.clone(), config.info_api_url.clone());

    let meta = match client.meta().await {
        Ok(meta) => meta,
        Err(e) => {
            tracing::error!(error = %e, "Could not initialize info client or fetch metadata");
            let report = ErrorReport {
                timestamp: utc_now_string(),
                status: "ERROR".into(),
                message: "Failed to initialize Hyperliquid info client or fetch initial metadata."
                    .into(),
                error_details: e.to_string(),
            };
            storage::save_json(&config.output_dir, "error_report.json", &report)?;
            return Err(e.into());
        }
    };
    let max_leverage_by_coin: HashMap<String, f64> = meta
        .universe
        .iter()
        .filter_map(|asset| asset.max_leverage.map(|lev| (asset.name.clone(), lev)))
        .collect();

    let market_snapshot =
        market_data::fetch_market_snapshot(&client, &max_leverage_by_coin, config).await;
    storage::save_json(&config.output_dir, "market_snapshot.json", &market_snapshot)?;

    let mut traders: Vec<TraderSnapshot> = Vec::with_capacity(addresses.len());
    for (i, address) in addresses.iter().enumerate() {
        if i > 0 {
            // Courtesy rate limit between per-trader calls.
            tokio::time::sleep(Duration::from_millis(config.trader_fetch_delay_ms)).await;
        }
        traders
            .push(trader_data::fetch_trader_snapshot(&client, address, config.fills_per_trader).await);
    }
    storage::save_json(&config.output_dir, "top_traders_snapshot.json", &traders)?;

    let ai_summary = summarizer::generate_summary(&http, config, &market_snapshot, &traders).await;
    storage::save_markdown(&config.output_dir, "ai_summary.md", &ai_summary)?;

    let report = ConsolidatedReport {
        last_updated_utc: utc_now_string(),
        market_snapshot,
        top_traders_snapshot: traders,
        ai_summary_markdown: ai_summary,
        generation_duration_seconds: round2(started.elapsed().as_secs_f64()),
    };
    storage::save_json(&config.output_dir, "report_summary.json", &report)?;

    tracing::info!(
        duration_secs = report.generation_duration_seconds,
        "Report generation complete"
    );
    Ok(())
}

fn round2(secs: f64) -> f64 {
    (secs * 100.0).round() / 100.0
}
