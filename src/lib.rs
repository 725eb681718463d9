pub mod config;
pub mod hyperliquid;
pub mod models;
pub mod openrouter;
pub mod scraper;
pub mod services;
pub mod storage;
