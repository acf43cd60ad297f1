use anyhow::{bail, Context, Result};
use confidence_correlation::{TradeFilter, DEFAULT_LOOKBACK_DAYS, DEFAULT_TREND_RANGE};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    // Input
    pub trades_path: String,           // confidence_data.json

    // Filters
    pub strategy_id: Option<String>,
    pub lookback_days: Option<i64>,    // 30, None = all time

    // Trend line x range
    pub trend_x_min: f64,              // 0
    pub trend_x_max: f64,              // 100

    // Output
    pub compact: bool,
}

impl ReportConfig {
    pub fn from_env() -> Result<Self> {
        let lookback_days: i64 = env::var("CONFIDENCE_LOOKBACK_DAYS")
            .unwrap_or_else(|_| DEFAULT_LOOKBACK_DAYS.to_string())
            .parse()
            .context("CONFIDENCE_LOOKBACK_DAYS must be an integer")?;

        let config = Self {
            trades_path: env::var("CONFIDENCE_TRADES_PATH")
                .unwrap_or_else(|_| "confidence_data.json".to_string()),

            strategy_id: env::var("CONFIDENCE_STRATEGY_ID")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            lookback_days: days_to_option(lookback_days),

            trend_x_min: env::var("TREND_X_MIN")
                .unwrap_or_else(|_| DEFAULT_TREND_RANGE.0.to_string())
                .parse()
                .context("TREND_X_MIN must be a number")?,
            trend_x_max: env::var("TREND_X_MAX")
                .unwrap_or_else(|_| DEFAULT_TREND_RANGE.1.to_string())
                .parse()
                .context("TREND_X_MAX must be a number")?,

            compact: false,
        };

        config.validate()?;
        Ok(config)
    }

    /// Command-line flags override the environment.
    pub fn apply_args(mut self, args: &[String]) -> Result<Self> {
        let mut iter = args.iter().skip(1);
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--strategy" => {
                    let id = iter.next().context("--strategy requires an id")?;
                    self.strategy_id = Some(id.clone());
                }
                "--days" => {
                    let days: i64 = iter
                        .next()
                        .context("--days requires a number")?
                        .parse()
                        .context("--days must be an integer")?;
                    self.lookback_days = days_to_option(days);
                }
                "--compact" => self.compact = true,
                flag if flag.starts_with("--") => bail!("Unknown option: {}", flag),
                path => self.trades_path = path.to_string(),
            }
        }

        self.validate()?;
        Ok(self)
    }

    pub fn filter(&self) -> TradeFilter {
        TradeFilter::new(self.strategy_id.clone(), self.lookback_days)
    }

    pub fn trend_range(&self) -> (f64, f64) {
        (self.trend_x_min, self.trend_x_max)
    }

    fn validate(&self) -> Result<()> {
        if !self.trend_x_min.is_finite() || !self.trend_x_max.is_finite() {
            bail!("Trend line range must be finite");
        }
        if self.trend_x_min >= self.trend_x_max {
            bail!(
                "TREND_X_MIN ({}) must be below TREND_X_MAX ({})",
                self.trend_x_min,
                self.trend_x_max
            );
        }
        if matches!(self.lookback_days, Some(d) if d < 0) {
            bail!("Lookback days cannot be negative");
        }
        Ok(())
    }
}

// 0 disables the period filter
fn days_to_option(days: i64) -> Option<i64> {
    if days == 0 {
        None
    } else {
        Some(days)
    }
}
