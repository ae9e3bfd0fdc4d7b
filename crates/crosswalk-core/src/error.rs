use std::fmt;

use serde::{Deserialize, Serialize};

/// Spatial size of a raster, in pixels.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Shape {
    pub width: usize,
    pub height: usize,
}

impl Shape {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Number of pixels covered by this shape.
    #[inline]
    pub fn area(self) -> usize {
        self.width * self.height
    }

    /// Fails unless both sides are non-zero.
    pub fn validate(self) -> Result<(), ShapeError> {
        if self.width == 0 || self.height == 0 {
            return Err(ShapeError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Fails unless `other` has exactly this shape.
    pub fn expect_eq(self, other: Shape) -> Result<(), ShapeError> {
        if self != other {
            return Err(ShapeError::Mismatch {
                expected: self,
                got: other,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Errors raised when raster buffers or shapes are inconsistent.
#[derive(thiserror::Error, Debug, Clone, Copy, Eq, PartialEq)]
pub enum ShapeError {
    #[error("invalid dimensions (width={width}, height={height})")]
    InvalidDimensions { width: usize, height: usize },

    #[error("invalid buffer length (expected {expected} values, got {got})")]
    InvalidBuffer { expected: usize, got: usize },

    #[error("invalid channel count {channels} (expected 1 or 3)")]
    InvalidChannels { channels: usize },

    #[error("shape mismatch (expected {expected}, got {got})")]
    Mismatch { expected: Shape, got: Shape },
}
