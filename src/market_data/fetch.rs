// =============================================================================
// Best-effort multi-symbol fetch
// =============================================================================
//
// Fetches run concurrently with a bounded fan-out.  Each ticker yields its own
// `FetchOutcome`, so one failing symbol never aborts the rest; the caller
// decides what to do with the failures.

use std::future::Future;

use futures_util::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::types::Ticker;

/// Why a single symbol could not be fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchFailure {
    pub name: String,
    pub symbol: String,
    pub reason: String,
}

pub type FetchOutcome<T> = Result<T, FetchFailure>;

/// Run `fetch` for every ticker with at most `concurrency` requests in flight.
///
/// Results come back in the same order as `tickers`.
pub async fn fetch_all<T, F, Fut>(
    tickers: &[Ticker],
    concurrency: usize,
    fetch: F,
) -> Vec<(Ticker, FetchOutcome<T>)>
where
    F: Fn(Ticker) -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
{
    let indexed = tickers.iter().cloned().enumerate();
    let mut results: Vec<(usize, Ticker, FetchOutcome<T>)> = stream::iter(indexed)
        .map(|(idx, ticker)| {
            let fut = fetch(ticker.clone());
            async move {
                let outcome = fut.await.map_err(|e| {
                    warn!(
                        name = %ticker.name,
                        symbol = %ticker.symbol,
                        error = %format!("{e:#}"),
                        "fetch failed"
                    );
                    FetchFailure {
                        name: ticker.name.clone(),
                        symbol: ticker.symbol.clone(),
                        reason: format!("{e:#}"),
                    }
                });
                (idx, ticker, outcome)
            }
        })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;

    results.sort_by_key(|(idx, _, _)| *idx);
    results
        .into_iter()
        .map(|(_, ticker, outcome)| (ticker, outcome))
        .collect()
}

/// Split outcomes into successes and failures, preserving order.
pub fn partition_outcomes<T>(
    outcomes: Vec<(Ticker, FetchOutcome<T>)>,
) -> (Vec<(Ticker, T)>, Vec<FetchFailure>) {
    let mut ok = Vec::with_capacity(outcomes.len());
    let mut failed = Vec::new();
    for (ticker, outcome) in outcomes {
        match outcome {
            Ok(value) => ok.push((ticker, value)),
            Err(failure) => failed.push(failure),
        }
    }
    (ok, failed)
}
