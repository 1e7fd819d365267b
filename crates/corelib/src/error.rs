//! Core shared errors (renderer-agnostic).

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("invalid viewport {width}x{height}: both dimensions must be non-zero")]
    InvalidViewport { width: u32, height: u32 },
    #[error("invalid frustum: {0}")]
    InvalidFrustum(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
