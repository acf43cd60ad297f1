//! confidence-report: Confidence vs outcome analytics for closed trades.
//!
//! Reads the analytics payload (a JSON array of trades, or an object with an
//! `all_trades` array), applies the strategy/period filter, and prints the
//! summary and per-strategy breakdown as JSON.
//!
//! Usage:
//!   cargo run -p confidence-report -- confidence_data.json
//!   cargo run -p confidence-report -- trades.json --strategy momentum --days 7
//!   cargo run -p confidence-report -- trades.json --days 0 --compact

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use confidence_correlation::{ConfidenceSummary, StrategyBreakdown, TradeRecord};
use serde::{Deserialize, Serialize};

mod config;

use config::ReportConfig;

/// Payload shapes accepted from the analytics endpoint
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TradesPayload {
    Bare(Vec<TradeRecord>),
    Wrapped { all_trades: Vec<TradeRecord> },
}

impl TradesPayload {
    fn into_trades(self) -> Vec<TradeRecord> {
        match self {
            TradesPayload::Bare(trades) => trades,
            TradesPayload::Wrapped { all_trades } => all_trades,
        }
    }
}

#[derive(Debug, Serialize)]
struct ConfidenceReport {
    generated_at: DateTime<Utc>,
    summary: ConfidenceSummary,
    strategies: Vec<StrategyBreakdown>,
}

fn parse_trades(raw: &str) -> Result<Vec<TradeRecord>> {
    let payload: TradesPayload =
        serde_json::from_str(raw).context("Payload is not a trade array or {\"all_trades\": [...]}")?;
    Ok(payload.into_trades())
}

fn build_report(
    trades: &[TradeRecord],
    config: &ReportConfig,
    now: DateTime<Utc>,
) -> Result<ConfidenceReport> {
    let selected = config.filter().apply(trades, now);
    tracing::info!(
        "Selected {} of {} trades (strategy={:?}, lookback_days={:?})",
        selected.len(),
        trades.len(),
        config.strategy_id,
        config.lookback_days
    );

    let summary = ConfidenceSummary::from_trades(&selected, config.trend_range())
        .context("Invalid trade data")?;
    let strategies = StrategyBreakdown::from_trades(&selected).context("Invalid trade data")?;

    if !summary.roi_correlation.is_defined() {
        tracing::warn!(
            "Insufficient data for a confidence/ROI correlation ({} trades)",
            summary.total_trades
        );
    }
    if !summary.has_trend() {
        tracing::warn!("No trend line: need at least two distinct confidence values");
    }

    Ok(ConfidenceReport {
        generated_at: now,
        summary,
        strategies,
    })
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let json_logging = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "confidence_report=info,confidence_correlation=warn".into());
    // Logs go to stderr so stdout stays valid JSON.
    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let args: Vec<String> = std::env::args().collect();
    let config = ReportConfig::from_env()?.apply_args(&args)?;
    tracing::info!("Loading trades from {}", config.trades_path);

    let raw = std::fs::read_to_string(&config.trades_path)
        .with_context(|| format!("Failed to read {}", config.trades_path))?;
    let trades = parse_trades(&raw).with_context(|| format!("Failed to parse {}", config.trades_path))?;

    let report = build_report(&trades, &config, Utc::now())?;
    tracing::info!(
        "ROI correlation {:.2} ({}), P&L correlation {:.2} ({})",
        report.summary.roi_correlation.coefficient(),
        report.summary.roi_correlation.strength,
        report.summary.pnl_correlation.coefficient(),
        report.summary.pnl_correlation.strength
    );

    let output = if config.compact {
        serde_json::to_string(&report)?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    println!("{}", output);

    Ok(())
}
