// =============================================================================
// Market Brief - Main Entry Point
// =============================================================================
//
// Runs the report pipeline once and prints the report as JSON on stdout.
// Logs go to stderr so the output can be piped.
// =============================================================================

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use market_brief::market_data::{NewsClient, YahooClient};
use market_brief::{ReportBuilder, ReportConfig};

const DEFAULT_CONFIG_PATH: &str = "market_brief.json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & logging ─────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Market Brief: building daily report");

    // ── 2. Configuration ─────────────────────────────────────────────────
    let config_path =
        std::env::var("MARKET_BRIEF_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
    let mut config = ReportConfig::load(&config_path).unwrap_or_else(|e| {
        warn!(error = %format!("{e:#}"), "Failed to load config, using defaults");
        ReportConfig::default()
    });

    // Override the news key from env if available.
    if let Ok(key) = std::env::var("NEWS_API_KEY") {
        let key = key.trim().to_string();
        if !key.is_empty() {
            config.news.api_key = Some(key);
        }
    }

    // ── 3. Provider clients ──────────────────────────────────────────────
    let yahoo = YahooClient::new()?;
    let news = match config.news.api_key.as_deref() {
        Some(key) => Some(NewsClient::new(key)?),
        None => None,
    };

    // ── 4. Build ─────────────────────────────────────────────────────────
    let builder = ReportBuilder::new(config, yahoo, news)?;
    let report = match builder.build().await {
        Ok(report) => report,
        Err(e) => {
            error!(error = %format!("{e:#}"), "Report generation failed");
            return Err(e);
        }
    };

    for failure in &report.failures {
        warn!(
            name = %failure.name,
            symbol = %failure.symbol,
            reason = %failure.reason,
            "missing from report"
        );
    }

    // ── 5. Emit ──────────────────────────────────────────────────────────
    println!("{}", serde_json::to_string_pretty(&report)?);
    info!(generated_at = %report.generated_at, "Report generated");
    Ok(())
}
