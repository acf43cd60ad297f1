//! Confidence Summary
//!
//! Headline metrics and per-strategy rows for the confidence dashboard, built
//! from the closed trades of one refresh.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::correlation::CorrelationResult;
use crate::error::StatsResult;
use crate::models::{OutcomeField, SampleSet, TradeRecord};
use crate::regression::{fit_line, RegressionLine, TrendSegment};

/// Default x range of the rendered trend line (confidence 0-100)
pub const DEFAULT_TREND_RANGE: (f64, f64) = (0.0, 100.0);

/// Overall confidence vs outcome metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceSummary {
    pub total_trades: usize,
    pub avg_confidence: f64,
    /// Percent of trades with positive P&L
    pub win_rate: f64,
    /// Mean ROI, percent
    pub avg_roi: f64,
    pub roi_correlation: CorrelationResult,
    pub pnl_correlation: CorrelationResult,
    /// Least-squares fit of ROI on confidence
    pub roi_trend: Option<RegressionLine>,
    pub trend_segment: Option<TrendSegment>,
}

impl ConfidenceSummary {
    pub fn from_trades(trades: &[TradeRecord], trend_range: (f64, f64)) -> StatsResult<Self> {
        let roi_samples = SampleSet::from_trades(trades, OutcomeField::Roi)?;
        let pnl_samples = SampleSet::from_trades(trades, OutcomeField::Pnl)?;

        let roi_trend = fit_line(&roi_samples);
        let trend_segment = roi_trend.map(|line| line.segment(trend_range.0, trend_range.1));

        Ok(Self {
            total_trades: trades.len(),
            avg_confidence: mean(trades.iter().map(|t| t.confidence)),
            win_rate: win_rate(trades),
            avg_roi: mean(trades.iter().map(|t| t.roi)),
            roi_correlation: CorrelationResult::from_samples(&roi_samples),
            pnl_correlation: CorrelationResult::from_samples(&pnl_samples),
            roi_trend,
            trend_segment,
        })
    }

    pub fn has_trend(&self) -> bool {
        self.roi_trend.is_some()
    }
}

/// One row of the strategy breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyBreakdown {
    pub strategy_id: String,
    pub name: String,
    pub trade_count: usize,
    pub win_rate: f64,
    pub avg_roi: f64,
    pub confidence_roi_correlation: CorrelationResult,
}

impl StrategyBreakdown {
    /// Group trades by strategy, busiest strategy first.
    pub fn from_trades(trades: &[TradeRecord]) -> StatsResult<Vec<Self>> {
        let mut groups: HashMap<&str, Vec<TradeRecord>> = HashMap::new();
        for trade in trades {
            groups
                .entry(trade.strategy_key())
                .or_default()
                .push(trade.clone());
        }

        let mut rows = groups
            .into_iter()
            .map(|(id, group)| -> StatsResult<StrategyBreakdown> {
                let samples = SampleSet::from_trades(&group, OutcomeField::Roi)?;
                let name = group
                    .iter()
                    .find_map(|t| t.strategy_name.clone())
                    .unwrap_or_else(|| id.to_string());

                Ok(StrategyBreakdown {
                    strategy_id: id.to_string(),
                    name,
                    trade_count: group.len(),
                    win_rate: win_rate(&group),
                    avg_roi: mean(group.iter().map(|t| t.roi)),
                    confidence_roi_correlation: CorrelationResult::from_samples(&samples),
                })
            })
            .collect::<StatsResult<Vec<_>>>()?;

        rows.sort_by(|a, b| {
            b.trade_count
                .cmp(&a.trade_count)
                .then_with(|| a.strategy_id.cmp(&b.strategy_id))
        });

        Ok(rows)
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

fn win_rate(trades: &[TradeRecord]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    let wins = trades.iter().filter(|t| t.is_win()).count();
    wins as f64 / trades.len() as f64 * 100.0
}
