pub mod candle;
pub mod fetch;
pub mod news;
pub mod yahoo;

// Re-export the common types for convenient access (e.g. `use crate::market_data::Candle`).
pub use candle::Candle;
pub use fetch::{fetch_all, partition_outcomes, FetchFailure, FetchOutcome};
pub use news::{Headline, NewsClient};
pub use yahoo::YahooClient;
