// =============================================================================
// Market Report - fetch, analyse and assemble one daily report
// =============================================================================
//
// Pipeline:
//   1. Snapshots for every ticker group (indices, currencies, commodities, crypto)
//   2. Universe quotes -> top movers + sector performance
//   3. History for each technical index -> TechnicalSummary
//   4. Headlines (only when a news API key is configured)
//
// A symbol that fails to fetch is logged, recorded in `failures`, and left out
// of its table.  Only invalid configuration aborts the build.
// =============================================================================

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analysis::{
    sector_performance, top_movers, Mover, NamedSnapshot, Quote, SectorPerformance, Snapshot,
    TechnicalSummary,
};
use crate::config::ReportConfig;
use crate::market_data::{
    fetch_all, partition_outcomes, FetchFailure, FetchOutcome, Headline, NewsClient, YahooClient,
};
use crate::series::PriceSeries;
use crate::types::{Constituent, Ticker};

/// Everything the presentation layer needs for one day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketReport {
    pub generated_at: DateTime<Utc>,
    pub indian_indices: Vec<NamedSnapshot>,
    pub global_indices: Vec<NamedSnapshot>,
    pub currencies: Vec<NamedSnapshot>,
    pub commodities: Vec<NamedSnapshot>,
    pub crypto: Vec<NamedSnapshot>,
    pub gainers: Vec<Mover>,
    pub losers: Vec<Mover>,
    pub sectors: Vec<SectorPerformance>,
    pub technicals: Vec<TechnicalSummary>,
    pub headlines: Vec<Headline>,
    pub failures: Vec<FetchFailure>,
}

/// Builds a [`MarketReport`] from an immutable configuration.
#[derive(Debug)]
pub struct ReportBuilder {
    config: ReportConfig,
    yahoo: YahooClient,
    news: Option<NewsClient>,
}

impl ReportBuilder {
    /// Validate `config` and bind the provider clients.
    pub fn new(config: ReportConfig, yahoo: YahooClient, news: Option<NewsClient>) -> Result<Self> {
        config.validate().context("report configuration rejected")?;
        Ok(Self {
            config,
            yahoo,
            news,
        })
    }

    /// Run the whole pipeline.
    pub async fn build(&self) -> Result<MarketReport> {
        let mut failures = Vec::new();

        // ── 1. Snapshots ─────────────────────────────────────────────────
        info!("Fetching market snapshots");
        let indian_indices = self.snapshots(&self.config.indian_indices, &mut failures).await;
        let global_indices = self.snapshots(&self.config.global_indices, &mut failures).await;
        let currencies = self.snapshots(&self.config.currencies, &mut failures).await;
        let commodities = self.snapshots(&self.config.commodities, &mut failures).await;
        let crypto = self.snapshots(&self.config.crypto, &mut failures).await;

        // ── 2. Universe ──────────────────────────────────────────────────
        info!(constituents = self.config.universe.len(), "Fetching universe quotes");
        let tickers = self.config.universe_tickers();
        let outcomes = self.fetch_snapshots(&tickers).await;
        let quotes = universe_quotes(&self.config.universe, outcomes, &mut failures);
        let movers = top_movers(&quotes, self.config.movers_count);
        let sectors = sector_performance(&quotes);

        // ── 3. Technical analysis ────────────────────────────────────────
        info!("Performing technical analysis");
        let technicals = self.technicals(&mut failures).await?;

        // ── 4. Headlines ─────────────────────────────────────────────────
        let headlines = self.headlines(&mut failures).await;

        info!(
            quotes = quotes.len(),
            technicals = technicals.len(),
            headlines = headlines.len(),
            failures = failures.len(),
            "report assembled"
        );

        Ok(MarketReport {
            generated_at: Utc::now(),
            indian_indices,
            global_indices,
            currencies,
            commodities,
            crypto,
            gainers: movers.gainers,
            losers: movers.losers,
            sectors,
            technicals,
            headlines,
            failures,
        })
    }

    // -------------------------------------------------------------------------
    // Stages
    // -------------------------------------------------------------------------

    async fn fetch_snapshots(&self, tickers: &[Ticker]) -> Vec<(Ticker, FetchOutcome<Snapshot>)> {
        let range = self.config.snapshot_range.as_str();
        fetch_all(tickers, self.config.fetch_concurrency, |t| async move {
            let candles = self.yahoo.get_history(&t.symbol, range, "1d").await?;
            Snapshot::from_candles(&candles).context("no session with a close price")
        })
        .await
    }

    async fn snapshots(
        &self,
        tickers: &[Ticker],
        failures: &mut Vec<FetchFailure>,
    ) -> Vec<NamedSnapshot> {
        let outcomes = self.fetch_snapshots(tickers).await;
        snapshot_rows(outcomes, failures)
    }

    async fn technicals(&self, failures: &mut Vec<FetchFailure>) -> Result<Vec<TechnicalSummary>> {
        let range = self.config.history_range.as_str();
        let interval = self.config.history_interval.as_str();
        let outcomes = fetch_all(
            &self.config.technical_indices,
            self.config.fetch_concurrency,
            |t| async move {
                let candles = self.yahoo.get_history(&t.symbol, range, interval).await?;
                let series = PriceSeries::from_candles(&candles)?;
                Ok(series)
            },
        )
        .await;

        let (histories, failed) = partition_outcomes(outcomes);
        failures.extend(failed);

        let mut summaries = Vec::with_capacity(histories.len());
        for (ticker, series) in histories {
            match TechnicalSummary::compute(&ticker.name, &series, &self.config.indicators)
                .with_context(|| format!("technical analysis failed for {ticker}"))?
            {
                Some(summary) => {
                    info!(
                        name = %ticker.name,
                        trend = %summary.trend.direction,
                        slope = summary.trend.slope,
                        bias = %summary.bias,
                        "technical summary computed"
                    );
                    summaries.push(summary);
                }
                None => warn!(name = %ticker.name, "no valid closes, technical section skipped"),
            }
        }
        Ok(summaries)
    }

    async fn headlines(&self, failures: &mut Vec<FetchFailure>) -> Vec<Headline> {
        let Some(news) = &self.news else {
            info!("No news API key configured, headlines skipped");
            return Vec::new();
        };

        let settings = &self.config.news;
        match news
            .top_headlines(&settings.country, &settings.category, settings.page_size)
            .await
        {
            Ok(headlines) => headlines,
            Err(e) => {
                warn!(error = %format!("{e:#}"), "headline fetch failed");
                failures.push(FetchFailure {
                    name: "headlines".to_string(),
                    symbol: format!("{}/{}", settings.country, settings.category),
                    reason: format!("{e:#}"),
                });
                Vec::new()
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Assembly helpers
// -----------------------------------------------------------------------------

/// Successful snapshots in ticker order; failures are moved into `failures`.
fn snapshot_rows(
    outcomes: Vec<(Ticker, FetchOutcome<Snapshot>)>,
    failures: &mut Vec<FetchFailure>,
) -> Vec<NamedSnapshot> {
    let (ok, failed) = partition_outcomes(outcomes);
    failures.extend(failed);
    ok.into_iter()
        .map(|(ticker, snapshot)| NamedSnapshot {
            name: ticker.name,
            symbol: ticker.symbol,
            snapshot,
        })
        .collect()
}

/// Pair each universe outcome with its constituent's sector.
///
/// `outcomes` must be in universe order, which `fetch_all` guarantees.
fn universe_quotes(
    universe: &[Constituent],
    outcomes: Vec<(Ticker, FetchOutcome<Snapshot>)>,
    failures: &mut Vec<FetchFailure>,
) -> Vec<Quote> {
    let mut quotes = Vec::with_capacity(outcomes.len());
    for (constituent, (_, outcome)) in universe.iter().zip(outcomes) {
        match outcome {
            Ok(snapshot) => quotes.push(Quote {
                symbol: constituent.symbol.clone(),
                sector: constituent.sector.clone(),
                close: snapshot.close,
                change_pct: snapshot.change_pct,
            }),
            Err(failure) => failures.push(failure),
        }
    }
    quotes
}
