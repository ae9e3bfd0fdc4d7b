use crate::{Shape, ShapeError};

/// Borrowed video frame: row-major, interleaved, `u8` per channel.
///
/// Only the spatial shape matters to the accumulator; pixel values are
/// handed to the detector untouched.
#[derive(Clone, Copy, Debug)]
pub struct FrameView<'a> {
    width: usize,
    height: usize,
    channels: usize,
    data: &'a [u8],
}

impl<'a> FrameView<'a> {
    pub fn new(
        width: usize,
        height: usize,
        channels: usize,
        data: &'a [u8],
    ) -> Result<Self, ShapeError> {
        Shape::new(width, height).validate()?;
        if channels != 1 && channels != 3 {
            return Err(ShapeError::InvalidChannels { channels });
        }
        let expected = width * height * channels;
        if data.len() != expected {
            return Err(ShapeError::InvalidBuffer {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Single-channel frame.
    pub fn gray(width: usize, height: usize, data: &'a [u8]) -> Result<Self, ShapeError> {
        Self::new(width, height, 1, data)
    }

    /// Interleaved 3-channel frame.
    pub fn color(width: usize, height: usize, data: &'a [u8]) -> Result<Self, ShapeError> {
        Self::new(width, height, 3, data)
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
    pub fn channels(&self) -> usize {
        self.channels
    }

    #[inline]
    pub fn shape(&self) -> Shape {
        Shape::new(self.width, self.height)
    }

    #[inline]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }
}

/// Owned counterpart of [`FrameView`].
#[derive(Clone, Debug)]
pub struct Frame {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<u8>,
}

impl Frame {
    pub fn from_raw(
        width: usize,
        height: usize,
        channels: usize,
        data: Vec<u8>,
    ) -> Result<Self, ShapeError> {
        FrameView::new(width, height, channels, &data)?;
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Black frame with the given shape.
    pub fn blank(width: usize, height: usize, channels: usize) -> Result<Self, ShapeError> {
        Self::from_raw(width, height, channels, vec![0; width * height * channels])
    }

    #[inline]
    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            width: self.width,
            height: self.height,
            channels: self.channels,
            data: &self.data,
        }
    }

    #[inline]
    pub fn shape(&self) -> Shape {
        Shape::new(self.width, self.height)
    }
}
