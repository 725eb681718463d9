pub mod market_data;
pub mod report;
pub mod summarizer;
pub mod trader_data;
