use serde::{Deserialize, Serialize};

/// Summary of one processed frame.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FrameVerdict {
    /// Zero-based frame index since the last reset.
    pub index: u64,
    /// Whether the detector returned a crosswalk mask for this frame.
    pub crosswalk_detected: bool,
    pub stable_pixels: usize,
    pub vehicle_pixels: usize,
    pub overlap_pixels: usize,
    /// A vehicle pixel coincides with a stable crosswalk pixel.
    pub overlap: bool,
}
