//! Contract with the external crosswalk/vehicle detector.

use std::fmt;

use crosswalk_core::{FrameView, Mask};
use serde::{Deserialize, Serialize};

/// Masks produced by the detector for one frame.
#[derive(Clone, Debug)]
pub struct Detection {
    /// Crosswalk likelihood mask, `None` when nothing was found this frame.
    pub crosswalk: Option<Mask>,
    /// Vehicle footprint mask. Always present, possibly empty.
    pub vehicle: Mask,
}

/// Which detector output a shape error refers to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum MaskKind {
    Crosswalk,
    Vehicle,
}

impl fmt::Display for MaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaskKind::Crosswalk => f.write_str("crosswalk"),
            MaskKind::Vehicle => f.write_str("vehicle"),
        }
    }
}

/// A model that segments crosswalks and vehicles in a frame.
///
/// Masks must have the frame's width and height. The accumulator only
/// reacts to whether the crosswalk mask is present; its values are summed
/// as-is, so binary `0/1` masks count frames and likelihood masks count
/// weighted hits.
pub trait CrosswalkVehicleDetector {
    fn detect(&self, frame: &FrameView<'_>) -> Detection;
}

impl<F> CrosswalkVehicleDetector for F
where
    F: Fn(&FrameView<'_>) -> Detection,
{
    fn detect(&self, frame: &FrameView<'_>) -> Detection {
        self(frame)
    }
}
