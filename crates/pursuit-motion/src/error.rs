use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum MotionError {
    #[error("motion duration must be positive, got {0}")]
    NonPositiveDuration(f64),

    #[error("motion segment has zero length")]
    ZeroLength,

    #[error("agent speed must be positive, got {0}")]
    NonPositiveSpeed(f32),
}

pub type MotionResult<T> = Result<T, MotionError>;
