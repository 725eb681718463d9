use hl_insight::config::AppConfig;
use hl_insight::services::report;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    if !config.has_summary_auth() {
        tracing::warn!("OPENROUTER_API_KEY not set — the AI summary will be skipped");
    }

    report::run_report(&config).await
}

fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();
}
