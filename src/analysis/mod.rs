// =============================================================================
// Analysis Module
// =============================================================================
//
// Pure transforms from fetched data to report tables:
// - Session snapshots (open / close / change % / LTP)
// - Top movers and sector performance over the stock universe
// - Per-index technical summaries built on the indicator engine

pub mod movers;
pub mod snapshot;
pub mod technicals;

pub use movers::{sector_performance, top_movers, Mover, Movers, Quote, SectorPerformance};
pub use snapshot::{pct_change, NamedSnapshot, Snapshot};
pub use technicals::TechnicalSummary;
