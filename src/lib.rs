// =============================================================================
// Market Brief - daily market report library
// =============================================================================
//
// `indicators` is the pure technical-analysis engine; everything else fetches
// provider data, transforms it into report tables, and assembles the report.

pub mod analysis;
pub mod config;
pub mod indicators;
pub mod market_data;
pub mod report;
pub mod series;
pub mod types;

pub use config::{IndicatorParams, ReportConfig};
pub use report::{MarketReport, ReportBuilder};
pub use series::{PricePoint, PriceSeries, SeriesError};
