use thiserror::Error;

pub type ScoreResult<T> = Result<T, ValidationError>;
pub type ChartResult<T> = Result<T, ChartError>;

/// Rejection reason for one raw subtest score.
///
/// Table builders stop at the first field that fails, so callers only ever
/// see one of these per build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("score must be an integer")]
    NotInteger,

    #[error("score must be between {min} and {max}")]
    OutOfRange { min: i64, max: i64 },
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid chart config: {0}")]
    InvalidConfig(String),

    #[error("invalid color `{0}`: expected #rgb, #rrggbb or #rrggbbaa")]
    InvalidColor(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("render backend failure: {0}")]
    Backend(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
