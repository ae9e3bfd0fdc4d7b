//! Per-pixel hit counters.

use crate::{Mask, MaskView, Shape, ShapeError};

/// Running per-pixel sum of mask values, row-major.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CountMap {
    width: usize,
    height: usize,
    data: Vec<u32>,
}

impl CountMap {
    /// All-zero counters for a `width x height` raster.
    pub fn zeros(width: usize, height: usize) -> Result<Self, ShapeError> {
        let shape = Shape::new(width, height);
        shape.validate()?;
        Ok(Self {
            width,
            height,
            data: vec![0; shape.area()],
        })
    }

    #[inline]
    pub fn shape(&self) -> Shape {
        Shape::new(self.width, self.height)
    }

    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.data
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[y * self.width + x])
    }

    /// Largest counter value.
    pub fn max(&self) -> u32 {
        self.data.iter().copied().max().unwrap_or(0)
    }

    /// Add `mask` elementwise. Counters saturate at `u32::MAX`.
    pub fn accumulate(&mut self, mask: &MaskView<'_>) -> Result<(), ShapeError> {
        self.shape().expect_eq(mask.shape())?;
        for (count, &v) in self.data.iter_mut().zip(mask.data()) {
            *count = count.saturating_add(u32::from(v));
        }
        Ok(())
    }

    /// Binary mask: `1` where the counter reaches `threshold`, else `0`.
    pub fn threshold(&self, threshold: u32) -> Mask {
        let data = self
            .data
            .iter()
            .map(|&c| u8::from(c >= threshold))
            .collect();
        Mask::from_raw_unchecked(self.width, self.height, data)
    }
}
