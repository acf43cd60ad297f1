//! Confidence Correlation Module
//!
//! Measures how well signal confidence predicts trade outcomes: Pearson
//! correlation, its qualitative strength, and a least-squares trend line,
//! plus the summary and per-strategy rows built on top of them.
//!
//! Everything here is pure and synchronous; no I/O and no shared state.

pub mod correlation;
pub mod error;
pub mod filter;
pub mod models;
pub mod regression;
pub mod strength;
pub mod summary;

pub use correlation::{compute_correlation, correlate, pearson, Correlation, CorrelationResult};
pub use error::{CorrelationError, StatsResult};
pub use filter::{TradeFilter, DEFAULT_LOOKBACK_DAYS};
pub use models::{OutcomeField, Sample, SampleSet, TradeRecord, UNASSIGNED_STRATEGY};
pub use regression::{fit_line, RegressionLine, TrendSegment};
pub use strength::{classify_strength, StrengthLabel};
pub use summary::{ConfidenceSummary, StrategyBreakdown, DEFAULT_TREND_RANGE};
