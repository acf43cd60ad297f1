//! Pearson Correlation
//!
//! Measures how well signal confidence tracks trade outcomes.
//!
//! The dashboard historically reported `0` both for "no linear relationship"
//! and for "not enough information to tell". [`correlate`] keeps those apart
//! with [`Correlation::Undefined`]; [`compute_correlation`] keeps the plain
//! number for callers that expect it.

use serde::{Deserialize, Serialize};

use crate::error::StatsResult;
use crate::models::SampleSet;
use crate::strength::{classify_strength, StrengthLabel};

/// A Pearson coefficient, or the absence of one
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Correlation {
    /// Coefficient in [-1, 1]
    Defined(f64),
    /// No samples, or x or y has zero variance
    Undefined,
}

impl Correlation {
    pub fn value(&self) -> Option<f64> {
        match self {
            Correlation::Defined(r) => Some(*r),
            Correlation::Undefined => None,
        }
    }

    /// Legacy sentinel form: undefined reads as 0.
    pub fn value_or_zero(&self) -> f64 {
        self.value().unwrap_or(0.0)
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, Correlation::Defined(_))
    }
}

/// Coefficient plus its qualitative label
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrelationResult {
    pub correlation: Correlation,
    pub strength: StrengthLabel,
    /// Number of samples the coefficient was computed from
    pub sample_size: usize,
}

impl CorrelationResult {
    pub fn from_samples(samples: &SampleSet) -> Self {
        let correlation = correlate(samples);
        // Defined coefficients are clamped to [-1, 1], so this cannot fail.
        let strength = match correlation {
            Correlation::Defined(r) => {
                classify_strength(r).unwrap_or(StrengthLabel::NoCorrelation)
            }
            Correlation::Undefined => StrengthLabel::NoCorrelation,
        };

        Self {
            correlation,
            strength,
            sample_size: samples.len(),
        }
    }

    /// Numeric coefficient, 0 when undefined.
    pub fn coefficient(&self) -> f64 {
        self.correlation.value_or_zero()
    }

    pub fn is_defined(&self) -> bool {
        self.correlation.is_defined()
    }
}

/// Pearson r between the x and y values of a sample set.
pub fn correlate(samples: &SampleSet) -> Correlation {
    let data = samples.samples();
    let n = data.len();
    if n == 0 {
        return Correlation::Undefined;
    }

    // All-equal columns have exactly zero variance; the mean may not reproduce
    // the value exactly, so test directly instead of trusting the sums.
    let first = data[0];
    if data.iter().all(|s| s.x == first.x) || data.iter().all(|s| s.y == first.y) {
        tracing::debug!("Correlation undefined for {} samples: constant column", n);
        return Correlation::Undefined;
    }

    // r is scale invariant; bringing both columns into [-1, 1] keeps the
    // squared sums and their product finite for any finite input.
    let x_scale = data.iter().fold(0.0_f64, |m, s| m.max(s.x.abs()));
    let y_scale = data.iter().fold(0.0_f64, |m, s| m.max(s.y.abs()));

    let nf = n as f64;
    let x_mean = data.iter().map(|s| s.x / x_scale).sum::<f64>() / nf;
    let y_mean = data.iter().map(|s| s.y / y_scale).sum::<f64>() / nf;

    let mut numerator = 0.0;
    let mut x_denom = 0.0;
    let mut y_denom = 0.0;
    for s in data {
        let dx = s.x / x_scale - x_mean;
        let dy = s.y / y_scale - y_mean;
        numerator += dx * dy;
        x_denom += dx * dx;
        y_denom += dy * dy;
    }

    if x_denom == 0.0 || y_denom == 0.0 || !x_denom.is_finite() || !y_denom.is_finite() {
        tracing::debug!("Correlation undefined for {} samples: degenerate variance", n);
        return Correlation::Undefined;
    }

    let r = numerator / (x_denom * y_denom).sqrt();
    if !r.is_finite() {
        tracing::debug!("Correlation undefined for {} samples: non-finite ratio", n);
        return Correlation::Undefined;
    }

    Correlation::Defined(r.clamp(-1.0, 1.0))
}

/// Pearson r with the `0` sentinel for undefined cases.
pub fn compute_correlation(samples: &SampleSet) -> f64 {
    correlate(samples).value_or_zero()
}

/// Pearson r over separate columns. Mismatched lengths and non-finite values
/// are rejected.
pub fn pearson(x: &[f64], y: &[f64]) -> StatsResult<Correlation> {
    let samples = SampleSet::from_columns(x, y)?;
    Ok(correlate(&samples))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn set(pairs: &[(f64, f64)]) -> SampleSet {
        SampleSet::from_pairs(pairs.iter().copied()).unwrap()
    }

    #[test]
    fn test_perfect_positive() {
        let samples = set(&[(10.0, 1.0), (20.0, 2.0), (30.0, 3.0)]);
        assert_eq!(correlate(&samples), Correlation::Defined(1.0));
        assert_eq!(compute_correlation(&samples), 1.0);
    }

    #[test]
    fn test_perfect_negative() {
        let samples = set(&[(1.0, 9.0), (2.0, 6.0), (3.0, 3.0), (4.0, 0.0)]);
        assert_relative_eq!(compute_correlation(&samples), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_is_undefined() {
        let samples = SampleSet::empty();
        assert_eq!(correlate(&samples), Correlation::Undefined);
        assert_eq!(compute_correlation(&samples), 0.0);
    }

    #[test]
    fn test_single_sample_is_undefined() {
        let samples = set(&[(75.0, 4.0)]);
        assert_eq!(correlate(&samples), Correlation::Undefined);
    }

    #[test]
    fn test_constant_x_is_undefined() {
        let samples = set(&[(10.0, 5.0), (10.0, 8.0), (10.0, 2.0)]);
        assert_eq!(correlate(&samples), Correlation::Undefined);
        assert_eq!(compute_correlation(&samples), 0.0);
    }

    #[test]
    fn test_constant_y_is_undefined() {
        let samples = set(&[(0.1, 3.0), (0.2, 3.0), (0.3, 3.0)]);
        assert_eq!(correlate(&samples), Correlation::Undefined);
    }

    #[test]
    fn test_constant_fractional_x_is_undefined() {
        let samples = set(&[(0.1, 1.0), (0.1, 2.0), (0.1, 7.0)]);
        assert_eq!(correlate(&samples), Correlation::Undefined);
    }

    #[test]
    fn test_weak_negative_scenario() {
        let samples = set(&[(50.0, 10.0), (60.0, -5.0), (70.0, 20.0), (80.0, 0.0)]);
        // numerator = -25, x_denom = 500, y_denom = 368.75
        let expected = -25.0 / (500.0_f64 * 368.75).sqrt();
        assert_relative_eq!(compute_correlation(&samples), expected, epsilon = 1e-12);

        let result = CorrelationResult::from_samples(&samples);
        assert_eq!(result.strength, StrengthLabel::NoCorrelation);
        assert_eq!(result.sample_size, 4);
    }

    #[test]
    fn test_large_magnitudes_keep_their_correlation() {
        let samples = set(&[(1e80, 1e80), (2e80, 2e80), (3e80, 3e80)]);
        let r = correlate(&samples).value().unwrap();
        assert_relative_eq!(r, 1.0, epsilon = 1e-12);
        assert_eq!(
            CorrelationResult::from_samples(&samples).strength,
            StrengthLabel::StrongPositive
        );

        let samples = set(&[(1e300, -1e300), (-1e300, 1e300), (5e299, -5e299)]);
        assert_relative_eq!(compute_correlation(&samples), -1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_tiny_magnitudes_keep_their_correlation() {
        let samples = set(&[(1e-200, 3e-200), (2e-200, 2e-200), (3e-200, 1e-200)]);
        assert_relative_eq!(compute_correlation(&samples), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pearson_rejects_mismatched_columns() {
        let err = pearson(&[1.0, 2.0], &[1.0]).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_pearson_columns() {
        let r = pearson(&[1.0, 2.0, 3.0, 4.0], &[2.0, 4.0, 5.0, 8.0]).unwrap();
        let value = r.value().unwrap();
        assert!(value > 0.9 && value <= 1.0);
    }

    #[test]
    fn test_result_distinguishes_undefined_from_zero() {
        let undefined = CorrelationResult::from_samples(&set(&[(10.0, 1.0), (10.0, 2.0)]));
        assert!(!undefined.is_defined());
        assert_eq!(undefined.coefficient(), 0.0);
        assert_eq!(undefined.strength, StrengthLabel::NoCorrelation);

        // Symmetric y around a linear x: genuinely zero.
        let zero = CorrelationResult::from_samples(&set(&[
            (1.0, 1.0),
            (2.0, 0.0),
            (3.0, 1.0),
        ]));
        assert!(zero.is_defined());
        assert_relative_eq!(zero.coefficient(), 0.0, epsilon = 1e-12);
        assert_eq!(zero.strength, StrengthLabel::NoCorrelation);
    }

    #[test]
    fn test_serializes_with_status_tag() {
        let json = serde_json::to_value(Correlation::Defined(0.5)).unwrap();
        assert_eq!(json["status"], "defined");
        assert_eq!(json["value"], 0.5);

        let json = serde_json::to_value(Correlation::Undefined).unwrap();
        assert_eq!(json["status"], "undefined");
    }
}
