// =============================================================================
// Shared types used across the market brief
// =============================================================================

use serde::{Deserialize, Serialize};

/// Display name and provider symbol of an instrument.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticker {
    pub name: String,
    pub symbol: String,
}

impl Ticker {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
        }
    }
}

impl std::fmt::Display for Ticker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.symbol)
    }
}

/// A member of the stock universe used for movers and sector tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constituent {
    /// Exchange symbol without the provider suffix, e.g. `"RELIANCE"`.
    pub symbol: String,
    #[serde(default)]
    pub sector: Option<String>,
}

impl Constituent {
    pub fn new(symbol: impl Into<String>, sector: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            sector: Some(sector.into()),
        }
    }

    /// Provider ticker, e.g. `RELIANCE` + `.NS`.
    pub fn ticker(&self, suffix: &str) -> Ticker {
        Ticker::new(self.symbol.clone(), format!("{}{}", self.symbol, suffix))
    }
}

/// Momentum reading derived from the latest MACD and signal values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bias {
    Bullish,
    Bearish,
}

impl Bias {
    /// Bullish only when the MACD line is strictly above its signal line.
    pub fn from_macd(macd: f64, signal: f64) -> Self {
        if macd > signal {
            Self::Bullish
        } else {
            Self::Bearish
        }
    }
}

impl std::fmt::Display for Bias {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bullish => write!(f, "Bullish"),
            Self::Bearish => write!(f, "Bearish"),
        }
    }
}
