//! Correlation Strength
//!
//! Maps a Pearson coefficient onto the qualitative labels shown next to it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CorrelationError, StatsResult};

/// Qualitative strength of a correlation coefficient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrengthLabel {
    StrongPositive,
    StrongNegative,
    ModeratePositive,
    ModerateNegative,
    WeakPositive,
    WeakNegative,
    VeryWeakPositive,
    VeryWeakNegative,
    NoCorrelation,
}

// Descending; comparisons are strict so a value equal to a threshold falls
// through to the next band.
const STRONG: f64 = 0.7;
const MODERATE: f64 = 0.5;
const WEAK: f64 = 0.3;
const VERY_WEAK: f64 = 0.1;

impl StrengthLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrengthLabel::StrongPositive => "Strong positive",
            StrengthLabel::StrongNegative => "Strong negative",
            StrengthLabel::ModeratePositive => "Moderate positive",
            StrengthLabel::ModerateNegative => "Moderate negative",
            StrengthLabel::WeakPositive => "Weak positive",
            StrengthLabel::WeakNegative => "Weak negative",
            StrengthLabel::VeryWeakPositive => "Very weak positive",
            StrengthLabel::VeryWeakNegative => "Very weak negative",
            StrengthLabel::NoCorrelation => "No correlation",
        }
    }

    /// The same band with the opposite sign.
    pub fn mirrored(&self) -> Self {
        match self {
            StrengthLabel::StrongPositive => StrengthLabel::StrongNegative,
            StrengthLabel::StrongNegative => StrengthLabel::StrongPositive,
            StrengthLabel::ModeratePositive => StrengthLabel::ModerateNegative,
            StrengthLabel::ModerateNegative => StrengthLabel::ModeratePositive,
            StrengthLabel::WeakPositive => StrengthLabel::WeakNegative,
            StrengthLabel::WeakNegative => StrengthLabel::WeakPositive,
            StrengthLabel::VeryWeakPositive => StrengthLabel::VeryWeakNegative,
            StrengthLabel::VeryWeakNegative => StrengthLabel::VeryWeakPositive,
            StrengthLabel::NoCorrelation => StrengthLabel::NoCorrelation,
        }
    }

    pub fn is_positive(&self) -> bool {
        matches!(
            self,
            StrengthLabel::StrongPositive
                | StrengthLabel::ModeratePositive
                | StrengthLabel::WeakPositive
                | StrengthLabel::VeryWeakPositive
        )
    }

    pub fn is_negative(&self) -> bool {
        self.mirrored().is_positive()
    }
}

impl fmt::Display for StrengthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a coefficient by |r| band and sign.
///
/// A Pearson r is always within [-1, 1]; anything else (or NaN) means an
/// upstream bug and is rejected rather than clamped.
pub fn classify_strength(r: f64) -> StatsResult<StrengthLabel> {
    if !r.is_finite() || r.abs() > 1.0 {
        return Err(CorrelationError::CoefficientOutOfRange(r));
    }

    let abs_r = r.abs();
    let positive = r > 0.0;
    let label = if abs_r > STRONG {
        if positive {
            StrengthLabel::StrongPositive
        } else {
            StrengthLabel::StrongNegative
        }
    } else if abs_r > MODERATE {
        if positive {
            StrengthLabel::ModeratePositive
        } else {
            StrengthLabel::ModerateNegative
        }
    } else if abs_r > WEAK {
        if positive {
            StrengthLabel::WeakPositive
        } else {
            StrengthLabel::WeakNegative
        }
    } else if abs_r > VERY_WEAK {
        if positive {
            StrengthLabel::VeryWeakPositive
        } else {
            StrengthLabel::VeryWeakNegative
        }
    } else {
        StrengthLabel::NoCorrelation
    };

    Ok(label)
}
