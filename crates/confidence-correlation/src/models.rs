//! Sample Models
//!
//! Paired (confidence, outcome) observations and the closed-trade records they
//! are built from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CorrelationError, StatsResult};

/// Strategy id reserved for trades that carry none
pub const UNASSIGNED_STRATEGY: &str = "unassigned";

/// One observed (confidence, outcome) pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Confidence score (0-100 or 0-1, caller's convention)
    pub x: f64,
    /// Outcome (ROI percent or P&L amount)
    pub y: f64,
}

impl Sample {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Sample {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Ordered set of finite samples.
///
/// Built wholesale from a data fetch and never mutated afterwards; every value
/// is checked for finiteness on construction so NaN never reaches the math.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SampleSet {
    samples: Vec<Sample>,
}

impl SampleSet {
    /// Build a set from samples, rejecting NaN and infinite values.
    pub fn new(samples: Vec<Sample>) -> StatsResult<Self> {
        for (index, sample) in samples.iter().enumerate() {
            if !sample.x.is_finite() {
                return Err(CorrelationError::NonFinite { index, field: "x" });
            }
            if !sample.y.is_finite() {
                return Err(CorrelationError::NonFinite { index, field: "y" });
            }
        }
        Ok(Self { samples })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_pairs<I>(pairs: I) -> StatsResult<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        Self::new(pairs.into_iter().map(Sample::from).collect())
    }

    /// Zip separate x and y columns. Lengths must match; nothing is truncated.
    pub fn from_columns(x: &[f64], y: &[f64]) -> StatsResult<Self> {
        if x.len() != y.len() {
            return Err(CorrelationError::LengthMismatch {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        Self::from_pairs(x.iter().copied().zip(y.iter().copied()))
    }

    /// Confidence against the chosen outcome, in trade order.
    pub fn from_trades(trades: &[TradeRecord], outcome: OutcomeField) -> StatsResult<Self> {
        Self::new(
            trades
                .iter()
                .map(|t| Sample::new(t.confidence, outcome.value(t)))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn xs(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.x).collect()
    }

    pub fn ys(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.y).collect()
    }

    /// Same samples with x and y exchanged.
    pub fn swapped(&self) -> Self {
        Self {
            samples: self.samples.iter().map(|s| Sample::new(s.y, s.x)).collect(),
        }
    }
}

/// Which trade outcome to pair with confidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeField {
    /// Return on investment, percent
    Roi,
    /// Profit/loss amount
    Pnl,
}

impl OutcomeField {
    pub fn value(&self, trade: &TradeRecord) -> f64 {
        match self {
            OutcomeField::Roi => trade.roi,
            OutcomeField::Pnl => trade.pnl,
        }
    }
}

/// A closed trade as returned by the analytics endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub symbol: String,
    /// Signal confidence when the trade was opened
    pub confidence: f64,
    /// Return on investment (percent)
    pub roi: f64,
    /// Realised profit/loss
    pub pnl: f64,
    #[serde(default)]
    pub strategy_id: Option<String>,
    #[serde(default)]
    pub strategy_name: Option<String>,
    /// When the trade was closed
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
}

impl TradeRecord {
    pub fn is_win(&self) -> bool {
        self.pnl > 0.0
    }

    /// Strategy id used for grouping and filtering; trades without one share
    /// [`UNASSIGNED_STRATEGY`].
    pub fn strategy_key(&self) -> &str {
        self.strategy_id.as_deref().unwrap_or(UNASSIGNED_STRATEGY)
    }
}
