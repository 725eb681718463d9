use std::env;
use std::path::PathBuf;

const DEFAULT_INFO_API_URL: &str = "https://api.hyperliquid.xyz";
const DEFAULT_LEADERBOARD_URL: &str = "https://hyperdash.info/top-traders";
const DEFAULT_OPENROUTER_API_BASE: &str = "https://openrouter.ai/api/v1";
const DEFAULT_SUMMARY_MODEL: &str = "google/gemini-1.5-flash-latest";
const DEFAULT_TICKERS: &str = "BTC,ETH,SOL,PEPE,DOGE";

#[derive(Debug, Clone)]
pub struct AppConfig {
    // Exchange API
    pub info_api_url: String,
    pub tickers_to_monitor: Vec<String>,
    pub traders_to_process: usize,
    pub fills_per_trader: usize,
    pub trader_fetch_delay_ms: u64,

    // Leaderboard scrape
    pub leaderboard_url: String,
    pub max_traders_to_scrape: usize,

    // AI summary (key optional — absence skips the summary, never fails the run)
    pub openrouter_api_key: Option<String>,
    pub openrouter_api_base: String,
    pub summary_model: String,
    pub summary_max_tokens: u32,
    pub summary_temperature: f64,

    // I/O
    pub http_timeout_secs: u64,
    pub output_dir: PathBuf,
    pub trader_list_path: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let tickers_raw =
            env::var("TICKERS_TO_MONITOR").unwrap_or_else(|_| DEFAULT_TICKERS.into());
        let tickers_to_monitor: Vec<String> = tickers_raw
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            info_api_url: env::var("HYPERLIQUID_API_URL")
                .unwrap_or_else(|_| DEFAULT_INFO_API_URL.into()),
            tickers_to_monitor,
            traders_to_process: env::var("TRADERS_TO_PROCESS")
                .unwrap_or_else(|_| "10".into())
                .parse()?,
            fills_per_trader: env::var("FILLS_PER_TRADER")
                .unwrap_or_else(|_| "5".into())
                .parse()?,
            trader_fetch_delay_ms: env::var("TRADER_FETCH_DELAY_MS")
                .unwrap_or_else(|_| "200".into())
                .parse()?,

            leaderboard_url: env::var("LEADERBOARD_URL")
                .unwrap_or_else(|_| DEFAULT_LEADERBOARD_URL.into()),
            max_traders_to_scrape: env::var("MAX_TRADERS_TO_SCRAPE")
                .unwrap_or_else(|_| "100".into())
                .parse()?,

            openrouter_api_key: env::var("OPENROUTER_API_KEY")
                .ok()
                .filter(|k| !k.is_empty()),
            openrouter_api_base: env::var("OPENROUTER_API_BASE")
                .unwrap_or_else(|_| DEFAULT_OPENROUTER_API_BASE.into()),
            summary_model: env::var("SUMMARY_MODEL")
                .unwrap_or_else(|_| DEFAULT_SUMMARY_MODEL.into()),
            summary_max_tokens: 2000,
            summary_temperature: 0.6,

            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "20".into())
                .parse()?,
            output_dir: env::var("OUTPUT_DIR")
                .unwrap_or_else(|_| "public/data".into())
                .into(),
            trader_list_path: env::var("TRADER_LIST_PATH")
                .unwrap_or_else(|_| "trader_list.json".into())
                .into(),
        })
    }

    /// Returns true if the OpenRouter key is configured.
    pub fn has_summary_auth(&self) -> bool {
        self.openrouter_api_key.is_some()
    }
}
