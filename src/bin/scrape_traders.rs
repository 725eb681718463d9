use std::time::Duration;

use hl_insight::config::AppConfig;
use hl_insight::scraper;
use hl_insight::storage;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .build()?;

    let addresses = scraper::scrape_top_traders(&http, &config).await;
    if addresses.is_empty() {
        // Keep any previously scraped list rather than overwriting it with nothing.
        tracing::warn!("Scrape produced no addresses — no trader list written");
        return Ok(());
    }

    let list = scraper::build_trader_list(addresses, &config.leaderboard_url);
    storage::save_trader_list(&config.trader_list_path, &list)?;
    tracing::info!(
        count = list.trader_addresses.len(),
        path = %config.trader_list_path.display(),
        "Saved trader list"
    );

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();
}
