use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CorrelationError {
    #[error("Invalid input: x has {x_len} values but y has {y_len}")]
    LengthMismatch { x_len: usize, y_len: usize },

    #[error("Invalid input: non-finite {field} at sample {index}")]
    NonFinite { index: usize, field: &'static str },

    #[error("Invalid input: correlation coefficient {0} is outside [-1, 1]")]
    CoefficientOutOfRange(f64),
}

impl CorrelationError {
    /// Every variant is a caller contract violation.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::LengthMismatch { .. } | Self::NonFinite { .. } | Self::CoefficientOutOfRange(_)
        )
    }
}

pub type StatsResult<T> = Result<T, CorrelationError>;
