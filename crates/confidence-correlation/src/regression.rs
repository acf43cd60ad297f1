//! Least-squares trend line of outcome against confidence.

use serde::{Deserialize, Serialize};

use crate::models::SampleSet;

/// y = slope * x + intercept
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionLine {
    pub slope: f64,
    pub intercept: f64,
}

impl RegressionLine {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Endpoints of the line between two x values, for drawing a trend line.
    pub fn segment(&self, x_start: f64, x_end: f64) -> TrendSegment {
        TrendSegment {
            start: (x_start, self.predict(x_start)),
            end: (x_end, self.predict(x_end)),
        }
    }
}

/// Two points of a fitted line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendSegment {
    pub start: (f64, f64),
    pub end: (f64, f64),
}

/// Ordinary least squares over the samples.
///
/// Returns `None` when fewer than two samples are given or x never varies;
/// callers should skip the trend line rather than treat it as an error.
pub fn fit_line(samples: &SampleSet) -> Option<RegressionLine> {
    let data = samples.samples();
    let n = data.len();
    if n < 2 {
        return None;
    }

    let first_x = data[0].x;
    if data.iter().all(|s| s.x == first_x) {
        tracing::debug!("No trend line for {} samples: constant confidence", n);
        return None;
    }

    let nf = n as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_x2 = 0.0;
    for s in data {
        sum_x += s.x;
        sum_y += s.y;
        sum_xy += s.x * s.y;
        sum_x2 += s.x * s.x;
    }

    let denominator = nf * sum_x2 - sum_x * sum_x;
    if denominator == 0.0 || !denominator.is_finite() {
        return None;
    }

    let slope = (nf * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / nf;
    if !slope.is_finite() || !intercept.is_finite() {
        return None;
    }

    Some(RegressionLine { slope, intercept })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn set(pairs: &[(f64, f64)]) -> SampleSet {
        SampleSet::from_pairs(pairs.iter().copied()).unwrap()
    }

    #[test]
    fn test_fit_identity_scale() {
        let line = fit_line(&set(&[(10.0, 1.0), (20.0, 2.0), (30.0, 3.0)])).unwrap();
        assert_relative_eq!(line.slope, 0.1, epsilon = 1e-12);
        assert_relative_eq!(line.intercept, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_fit_with_offset() {
        let line = fit_line(&set(&[(1.0, 5.0), (2.0, 7.0), (3.0, 9.0), (4.0, 11.0)])).unwrap();
        assert_relative_eq!(line.slope, 2.0, epsilon = 1e-12);
        assert_relative_eq!(line.intercept, 3.0, epsilon = 1e-12);
        assert_relative_eq!(line.predict(10.0), 23.0, epsilon = 1e-12);
    }

    #[test]
    fn test_no_line_for_constant_x() {
        assert!(fit_line(&set(&[(10.0, 5.0), (10.0, 8.0), (10.0, 2.0)])).is_none());
        assert!(fit_line(&set(&[(0.3, 1.0), (0.3, -1.0)])).is_none());
    }

    #[test]
    fn test_no_line_below_two_samples() {
        assert!(fit_line(&SampleSet::empty()).is_none());
        assert!(fit_line(&set(&[(60.0, 3.0)])).is_none());
    }

    #[test]
    fn test_two_points_define_the_line() {
        let line = fit_line(&set(&[(40.0, -2.0), (90.0, 8.0)])).unwrap();
        assert_relative_eq!(line.slope, 0.2, epsilon = 1e-12);
        assert_relative_eq!(line.predict(40.0), -2.0, epsilon = 1e-9);
        assert_relative_eq!(line.predict(90.0), 8.0, epsilon = 1e-9);
    }

    #[test]
    fn test_segment_endpoints() {
        let line = RegressionLine {
            slope: 0.25,
            intercept: -5.0,
        };
        let segment = line.segment(0.0, 100.0);
        assert_eq!(segment.start, (0.0, -5.0));
        assert_eq!(segment.end, (100.0, 20.0));
    }
}
