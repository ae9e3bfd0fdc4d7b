use crosswalk_core::{MaskView, ShapeError};

/// True if any pixel is flagged (non-zero) in both masks.
pub fn overlap_check(vehicle: &MaskView<'_>, stable: &MaskView<'_>) -> Result<bool, ShapeError> {
    vehicle.shape().expect_eq(stable.shape())?;
    Ok(vehicle
        .data()
        .iter()
        .zip(stable.data())
        .any(|(&v, &s)| v != 0 && s != 0))
}

/// Number of pixels flagged in both masks.
pub fn overlap_pixels(a: &MaskView<'_>, b: &MaskView<'_>) -> Result<usize, ShapeError> {
    a.shape().expect_eq(b.shape())?;
    Ok(a.data()
        .iter()
        .zip(b.data())
        .filter(|&(&x, &y)| x != 0 && y != 0)
        .count())
}
