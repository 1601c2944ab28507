// =============================================================================
// Report Configuration - ticker tables, indicator parameters, fetch settings
// =============================================================================
//
// Loaded once at startup and passed down as an immutable value.  Every field
// carries `#[serde(default)]` so that a partial (or empty) JSON file still
// loads, with the built-in tables filling the gaps.
//
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::indicators::{levels, macd, trend, IndicatorError};
use crate::types::{Constituent, Ticker};

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn tickers(pairs: &[(&str, &str)]) -> Vec<Ticker> {
    pairs.iter().map(|(name, symbol)| Ticker::new(*name, *symbol)).collect()
}

fn default_indian_indices() -> Vec<Ticker> {
    tickers(&[
        ("NIFTY 50", "^NSEI"),
        ("NIFTY BANK", "^NSEBANK"),
        ("SENSEX", "^BSESN"),
    ])
}

fn default_global_indices() -> Vec<Ticker> {
    tickers(&[
        ("S&P 500", "^GSPC"),
        ("DOW JONES", "^DJI"),
        ("NASDAQ", "^IXIC"),
        ("FTSE 100", "^FTSE"),
        ("DAX", "^GDAXI"),
        ("NIKKEI 225", "^N225"),
        ("HANG SENG", "^HSI"),
        ("SHANGHAI COMP", "000001.SS"),
    ])
}

fn default_currencies() -> Vec<Ticker> {
    tickers(&[
        ("USD/INR", "USDINR=X"),
        ("EUR/INR", "EURINR=X"),
        ("GBP/INR", "GBPINR=X"),
        ("JPY/INR", "JPYINR=X"),
    ])
}

fn default_commodities() -> Vec<Ticker> {
    tickers(&[
        ("Gold", "GC=F"),
        ("Silver", "SI=F"),
        ("Crude Oil", "CL=F"),
        ("Natural Gas", "NG=F"),
    ])
}

fn default_crypto() -> Vec<Ticker> {
    tickers(&[("Bitcoin", "BTC-USD"), ("Ethereum", "ETH-USD")])
}

fn default_technical_indices() -> Vec<Ticker> {
    tickers(&[("NIFTY 50", "^NSEI"), ("BANK NIFTY", "^NSEBANK")])
}

fn default_universe() -> Vec<Constituent> {
    const FIN: &str = "Financial Services";
    const IT: &str = "Information Technology";
    const AUTO: &str = "Automobile and Auto Components";
    const FMCG: &str = "Fast Moving Consumer Goods";
    const HEALTH: &str = "Healthcare";
    const METALS: &str = "Metals & Mining";
    const ENERGY: &str = "Oil Gas & Consumable Fuels";
    const POWER: &str = "Power";
    const CEMENT: &str = "Construction Materials";

    [
        ("ADANIENT", METALS),
        ("ADANIPORTS", "Services"),
        ("APOLLOHOSP", HEALTH),
        ("ASIANPAINT", "Consumer Durables"),
        ("AXISBANK", FIN),
        ("BAJAJ-AUTO", AUTO),
        ("BAJFINANCE", FIN),
        ("BAJAJFINSV", FIN),
        ("BEL", "Capital Goods"),
        ("BHARTIARTL", "Telecommunication"),
        ("CIPLA", HEALTH),
        ("COALINDIA", ENERGY),
        ("DRREDDY", HEALTH),
        ("EICHERMOT", AUTO),
        ("GRASIM", CEMENT),
        ("HCLTECH", IT),
        ("HDFCBANK", FIN),
        ("HDFCLIFE", FIN),
        ("HEROMOTOCO", AUTO),
        ("HINDALCO", METALS),
        ("HINDUNILVR", FMCG),
        ("ICICIBANK", FIN),
        ("INDUSINDBK", FIN),
        ("INFY", IT),
        ("ITC", FMCG),
        ("JSWSTEEL", METALS),
        ("KOTAKBANK", FIN),
        ("LT", "Construction"),
        ("M&M", AUTO),
        ("MARUTI", AUTO),
        ("NESTLEIND", FMCG),
        ("NTPC", POWER),
        ("ONGC", ENERGY),
        ("POWERGRID", POWER),
        ("RELIANCE", ENERGY),
        ("SBILIFE", FIN),
        ("SBIN", FIN),
        ("SHRIRAMFIN", FIN),
        ("SUNPHARMA", HEALTH),
        ("TATACONSUM", FMCG),
        ("TATAMOTORS", AUTO),
        ("TATASTEEL", METALS),
        ("TCS", IT),
        ("TECHM", IT),
        ("TITAN", "Consumer Durables"),
        ("TRENT", "Consumer Services"),
        ("ULTRACEMCO", CEMENT),
        ("WIPRO", IT),
    ]
    .iter()
    .map(|(symbol, sector)| Constituent::new(*symbol, *sector))
    .collect()
}

fn default_universe_suffix() -> String {
    ".NS".to_string()
}

fn default_snapshot_range() -> String {
    "5d".to_string()
}

fn default_history_range() -> String {
    "3mo".to_string()
}

fn default_history_interval() -> String {
    "1d".to_string()
}

fn default_movers_count() -> usize {
    5
}

fn default_fetch_concurrency() -> usize {
    4
}

fn default_fast() -> usize {
    macd::DEFAULT_FAST
}

fn default_slow() -> usize {
    macd::DEFAULT_SLOW
}

fn default_signal() -> usize {
    macd::DEFAULT_SIGNAL
}

fn default_sr_window() -> usize {
    levels::DEFAULT_WINDOW
}

fn default_trend_window() -> usize {
    trend::DEFAULT_WINDOW
}

fn default_tolerance() -> f64 {
    trend::DEFAULT_TOLERANCE
}

fn default_ema_short() -> usize {
    9
}

fn default_ema_long() -> usize {
    15
}

fn default_news_country() -> String {
    "in".to_string()
}

fn default_news_category() -> String {
    "business".to_string()
}

fn default_news_page_size() -> u32 {
    10
}

// =============================================================================
// IndicatorParams
// =============================================================================

/// Periods, windows and tolerance handed to the indicator engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorParams {
    /// MACD fast EMA period.
    #[serde(default = "default_fast")]
    pub fast: usize,

    /// MACD slow EMA period.
    #[serde(default = "default_slow")]
    pub slow: usize,

    /// MACD signal EMA period.
    #[serde(default = "default_signal")]
    pub signal: usize,

    /// Support/resistance lookback (valid closes).
    #[serde(default = "default_sr_window")]
    pub sr_window: usize,

    /// Trend regression lookback (valid closes).
    #[serde(default = "default_trend_window")]
    pub trend_window: usize,

    /// Slope band treated as sideways.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Short EMA reported alongside the MACD.
    #[serde(default = "default_ema_short")]
    pub ema_short: usize,

    /// Long EMA reported alongside the MACD.
    #[serde(default = "default_ema_long")]
    pub ema_long: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            fast: default_fast(),
            slow: default_slow(),
            signal: default_signal(),
            sr_window: default_sr_window(),
            trend_window: default_trend_window(),
            tolerance: default_tolerance(),
            ema_short: default_ema_short(),
            ema_long: default_ema_long(),
        }
    }
}

impl IndicatorParams {
    /// Fail on the first parameter the engine would reject.
    pub fn validate(&self) -> Result<(), IndicatorError> {
        use crate::indicators::error::require_positive;

        require_positive("fast", self.fast)?;
        require_positive("slow", self.slow)?;
        require_positive("signal", self.signal)?;
        require_positive("sr_window", self.sr_window)?;
        require_positive("trend_window", self.trend_window)?;
        require_positive("ema_short", self.ema_short)?;
        require_positive("ema_long", self.ema_long)?;
        if self.tolerance.is_nan() || self.tolerance < 0.0 {
            return Err(IndicatorError::InvalidTolerance(self.tolerance));
        }
        Ok(())
    }
}

// =============================================================================
// NewsSettings
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsSettings {
    /// NewsAPI key.  Headlines are skipped when absent.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_news_country")]
    pub country: String,

    #[serde(default = "default_news_category")]
    pub category: String,

    #[serde(default = "default_news_page_size")]
    pub page_size: u32,
}

impl Default for NewsSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            country: default_news_country(),
            category: default_news_category(),
            page_size: default_news_page_size(),
        }
    }
}

// =============================================================================
// ReportConfig
// =============================================================================

/// Top-level configuration for one report run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    // --- Ticker tables ------------------------------------------------------

    #[serde(default = "default_indian_indices")]
    pub indian_indices: Vec<Ticker>,

    #[serde(default = "default_global_indices")]
    pub global_indices: Vec<Ticker>,

    #[serde(default = "default_currencies")]
    pub currencies: Vec<Ticker>,

    #[serde(default = "default_commodities")]
    pub commodities: Vec<Ticker>,

    #[serde(default = "default_crypto")]
    pub crypto: Vec<Ticker>,

    /// Indices that get a technical-analysis section.
    #[serde(default = "default_technical_indices")]
    pub technical_indices: Vec<Ticker>,

    // --- Stock universe -----------------------------------------------------

    /// Constituents used for the movers and sector tables.
    #[serde(default = "default_universe")]
    pub universe: Vec<Constituent>,

    /// Provider suffix appended to each constituent symbol.
    #[serde(default = "default_universe_suffix")]
    pub universe_suffix: String,

    /// Rows in each of the gainers / losers tables.
    #[serde(default = "default_movers_count")]
    pub movers_count: usize,

    // --- Provider requests --------------------------------------------------

    /// Provider range for snapshot requests (needs at least two sessions).
    #[serde(default = "default_snapshot_range")]
    pub snapshot_range: String,

    #[serde(default = "default_history_range")]
    pub history_range: String,

    #[serde(default = "default_history_interval")]
    pub history_interval: String,

    /// Maximum requests in flight.
    #[serde(default = "default_fetch_concurrency")]
    pub fetch_concurrency: usize,

    // --- Analysis -----------------------------------------------------------

    #[serde(default)]
    pub indicators: IndicatorParams,

    #[serde(default)]
    pub news: NewsSettings,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            indian_indices: default_indian_indices(),
            global_indices: default_global_indices(),
            currencies: default_currencies(),
            commodities: default_commodities(),
            crypto: default_crypto(),
            technical_indices: default_technical_indices(),
            universe: default_universe(),
            universe_suffix: default_universe_suffix(),
            movers_count: default_movers_count(),
            snapshot_range: default_snapshot_range(),
            history_range: default_history_range(),
            history_interval: default_history_interval(),
            fetch_concurrency: default_fetch_concurrency(),
            indicators: IndicatorParams::default(),
            news: NewsSettings::default(),
        }
    }
}

impl ReportConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse report config from {}", path.display()))?;

        info!(
            path = %path.display(),
            universe = config.universe.len(),
            technical_indices = config.technical_indices.len(),
            "report config loaded"
        );

        Ok(config)
    }

    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        self.indicators
            .validate()
            .context("invalid indicator parameters")?;
        if self.snapshot_range.trim().is_empty() || self.history_range.trim().is_empty() {
            anyhow::bail!("provider ranges must not be empty");
        }
        if self.history_interval.trim().is_empty() {
            anyhow::bail!("history interval must not be empty");
        }
        Ok(())
    }

    /// Provider tickers of every universe constituent.
    pub fn universe_tickers(&self) -> Vec<Ticker> {
        self.universe
            .iter()
            .map(|c| c.ticker(&self.universe_suffix))
            .collect()
    }
}
