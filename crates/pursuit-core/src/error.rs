//! Workspace base error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfig {
        field:  &'static str,
        reason: String,
    },
}

/// Shorthand result type for `pursuit-core`.
pub type CoreResult<T> = Result<T, CoreError>;
