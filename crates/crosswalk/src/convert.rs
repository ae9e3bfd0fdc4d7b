//! Conversions between `image` buffers and the lightweight raster types.

use crosswalk_core::{FrameView, Mask, MaskView, ShapeError};

/// Borrow an `image::GrayImage` as a single-channel frame.
pub fn gray_frame(img: &::image::GrayImage) -> Result<FrameView<'_>, ShapeError> {
    FrameView::gray(img.width() as usize, img.height() as usize, img.as_raw())
}

/// Borrow an `image::RgbImage` as a 3-channel frame.
pub fn rgb_frame(img: &::image::RgbImage) -> Result<FrameView<'_>, ShapeError> {
    FrameView::color(img.width() as usize, img.height() as usize, img.as_raw())
}

/// Borrow a grayscale image as a mask; any non-zero pixel is flagged.
pub fn mask_view(img: &::image::GrayImage) -> Result<MaskView<'_>, ShapeError> {
    MaskView::new(img.width() as usize, img.height() as usize, img.as_raw())
}

/// Load a mask from a grayscale image, mapping non-zero pixels to `1`.
pub fn binary_mask(img: &::image::GrayImage) -> Result<Mask, ShapeError> {
    let data = img.as_raw().iter().map(|&v| u8::from(v != 0)).collect();
    Mask::from_raw(img.width() as usize, img.height() as usize, data)
}

/// Render a mask as a 0/255 grayscale image, e.g. for saving stable masks.
pub fn mask_to_gray(mask: &Mask) -> ::image::GrayImage {
    ::image::GrayImage::from_fn(mask.width() as u32, mask.height() as u32, |x, y| {
        let on = mask.get(x as usize, y as usize).is_some_and(|v| v != 0);
        ::image::Luma([if on { 255 } else { 0 }])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gray_image_round_trips_as_binary_mask() {
        let img = ::image::GrayImage::from_raw(2, 2, vec![0, 200, 1, 0]).expect("image");
        let mask = binary_mask(&img).expect("mask");
        assert_eq!(mask.data(), &[0, 1, 1, 0]);
        assert_eq!(mask_to_gray(&mask).as_raw(), &vec![0, 255, 255, 0]);
        assert_eq!(mask_view(&img).expect("view").count_nonzero(), 2);
    }

    #[test]
    fn rgb_frame_keeps_shape() {
        let img = ::image::RgbImage::new(4, 3);
        let frame = rgb_frame(&img).expect("frame");
        assert_eq!((frame.width(), frame.height(), frame.channels()), (4, 3, 3));
    }
}
