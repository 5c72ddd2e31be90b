//! Construction errors.

use thiserror::Error;

use crate::BoundingBox2D;

#[derive(Debug, Error, PartialEq)]
pub enum QuadtreeError {
    #[error("max objects per leaf must be at least 1")]
    ZeroCapacity,

    #[error("max depth {depth} exceeds supported maximum {max}")]
    DepthTooLarge { depth: u8, max: u8 },

    #[error("world bounds must be finite with min <= max, got {0:?}")]
    InvalidWorldBounds(BoundingBox2D),
}

pub type Result<T> = std::result::Result<T, QuadtreeError>;
