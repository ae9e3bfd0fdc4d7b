use crate::{Shape, ShapeError};

/// Borrowed single-channel mask, row-major, `len == width * height`.
///
/// Any non-zero value counts as "flagged". Detector masks may carry
/// likelihood-like values; thresholded masks only ever hold `0` or `1`.
#[derive(Clone, Copy, Debug)]
pub struct MaskView<'a> {
    width: usize,
    height: usize,
    data: &'a [u8],
}

impl<'a> MaskView<'a> {
    pub fn new(width: usize, height: usize, data: &'a [u8]) -> Result<Self, ShapeError> {
        let shape = Shape::new(width, height);
        shape.validate()?;
        if data.len() != shape.area() {
            return Err(ShapeError::InvalidBuffer {
                expected: shape.area(),
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn shape(&self) -> Shape {
        Shape::new(self.width, self.height)
    }

    #[inline]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Value at `(x, y)`, or `None` outside the mask.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[y * self.width + x])
    }

    /// Number of flagged pixels.
    pub fn count_nonzero(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    pub fn to_mask(&self) -> Mask {
        Mask {
            width: self.width,
            height: self.height,
            data: self.data.to_vec(),
        }
    }
}

/// Owned single-channel mask.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Mask {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Mask {
    /// All-zero mask.
    pub fn zeros(width: usize, height: usize) -> Result<Self, ShapeError> {
        Self::filled(width, height, 0)
    }

    /// Mask with every pixel set to `value`.
    pub fn filled(width: usize, height: usize, value: u8) -> Result<Self, ShapeError> {
        let shape = Shape::new(width, height);
        shape.validate()?;
        Ok(Self {
            width,
            height,
            data: vec![value; shape.area()],
        })
    }

    /// Wrap a row-major buffer.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self, ShapeError> {
        MaskView::new(width, height, &data)?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Caller guarantees `data.len() == width * height` with both sides non-zero.
    pub(crate) fn from_raw_unchecked(width: usize, height: usize, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            width,
            height,
            data,
        }
    }

    /// Mask flagging exactly the listed `(x, y)` pixels with `1`.
    ///
    /// Pixels outside the mask are ignored.
    pub fn from_pixels(
        width: usize,
        height: usize,
        pixels: &[(usize, usize)],
    ) -> Result<Self, ShapeError> {
        let mut mask = Self::zeros(width, height)?;
        for &(x, y) in pixels {
            mask.set(x, y, 1);
        }
        Ok(mask)
    }

    #[inline]
    pub fn view(&self) -> MaskView<'_> {
        MaskView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn shape(&self) -> Shape {
        Shape::new(self.width, self.height)
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        self.view().get(x, y)
    }

    /// Set `(x, y)` to `value`; out-of-range writes are dropped.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        if x < self.width && y < self.height {
            self.data[y * self.width + x] = value;
        }
    }

    pub fn count_nonzero(&self) -> usize {
        self.view().count_nonzero()
    }

    /// True when every pixel equals `value`.
    pub fn all_eq(&self, value: u8) -> bool {
        self.data.iter().all(|&v| v == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_rejects_wrong_length() {
        let err = Mask::from_raw(3, 2, vec![0; 5]).unwrap_err();
        assert_eq!(
            err,
            ShapeError::InvalidBuffer {
                expected: 6,
                got: 5
            }
        );
    }

    #[test]
    fn pixels_are_row_major() {
        let mask = Mask::from_raw(3, 2, vec![1, 2, 3, 4, 5, 6]).expect("mask");
        assert_eq!(mask.get(0, 0), Some(1));
        assert_eq!(mask.get(2, 0), Some(3));
        assert_eq!(mask.get(0, 1), Some(4));
        assert_eq!(mask.get(3, 0), None);
    }

    #[test]
    fn from_pixels_sets_listed_cells_only() {
        let mask = Mask::from_pixels(2, 2, &[(0, 0), (1, 1), (5, 5)]).expect("mask");
        assert_eq!(mask.data(), &[1, 0, 0, 1]);
        assert_eq!(mask.count_nonzero(), 2);
    }
}
