//! Trade Filters
//!
//! Strategy and look-back selection applied to closed trades before any
//! statistics are computed.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::TradeRecord;

/// Dashboard default look-back period
pub const DEFAULT_LOOKBACK_DAYS: i64 = 30;

/// Strategy and period selection applied before any statistics are computed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeFilter {
    pub strategy_id: Option<String>,
    /// Only trades closed within this many days; `None` keeps everything
    pub lookback_days: Option<i64>,
}

impl TradeFilter {
    pub fn new(strategy_id: Option<String>, lookback_days: Option<i64>) -> Self {
        Self {
            strategy_id,
            lookback_days,
        }
    }

    /// Trades without a strategy id match [`UNASSIGNED_STRATEGY`](crate::models::UNASSIGNED_STRATEGY).
    /// Trades without a close timestamp always pass the period check.
    pub fn matches(&self, trade: &TradeRecord, now: DateTime<Utc>) -> bool {
        if let Some(id) = &self.strategy_id {
            if trade.strategy_key() != id {
                return false;
            }
        }

        match (self.lookback_days, trade.closed_at) {
            (Some(days), Some(closed_at)) => match Duration::try_days(days)
                .and_then(|period| now.checked_sub_signed(period))
            {
                Some(cutoff) => closed_at >= cutoff,
                // Period reaches past the representable range
                None => true,
            },
            _ => true,
        }
    }

    pub fn apply(&self, trades: &[TradeRecord], now: DateTime<Utc>) -> Vec<TradeRecord> {
        trades
            .iter()
            .filter(|t| self.matches(t, now))
            .cloned()
            .collect()
    }
}
