//! Stable crosswalk masks from noisy per-frame detections.
//!
//! A [`CrosswalkAccumulator`] feeds every frame to an external
//! [`CrosswalkVehicleDetector`], adds the returned crosswalk mask into a
//! per-pixel counter and thresholds the counter into a stable crosswalk
//! mask. [`overlap_check`] then tells whether a vehicle mask touches that
//! stable region.
//!
//! ```
//! use crosswalk::{overlap_check, CrosswalkAccumulator, CrosswalkParams, Detection};
//! use crosswalk::core::{Frame, FrameView, Mask};
//!
//! fn detector(frame: &FrameView<'_>) -> Detection {
//!     let (w, h) = (frame.width(), frame.height());
//!     Detection {
//!         crosswalk: Mask::filled(w, h, 1).ok(),
//!         vehicle: Mask::from_pixels(w, h, &[(1, 1)]).expect("vehicle mask"),
//!     }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let params = CrosswalkParams { count_th_crosswalk: 2 };
//! let mut acc = CrosswalkAccumulator::new(&detector, &params);
//!
//! let frame = Frame::blank(3, 3, 3)?;
//! acc.accumulate_and_threshold(&frame.view())?;
//! let (stable, vehicle) = acc.accumulate_and_threshold(&frame.view())?;
//! assert!(overlap_check(&vehicle.view(), &stable.view())?);
//! # Ok(())
//! # }
//! ```
//!
//! The detector model itself, video decoding and any geometric correction
//! are left to the caller.

mod accumulator;
mod detector;
mod io;

#[cfg(feature = "image")]
pub mod convert;

pub use accumulator::{
    overlap_check, overlap_pixels, AccumulatorState, CrosswalkAccumulator, CrosswalkError,
    CrosswalkParams, FrameVerdict,
};
pub use detector::{CrosswalkVehicleDetector, Detection, MaskKind};
pub use io::{CrosswalkConfig, CrosswalkIoError, CrosswalkReport};

pub use crosswalk_core as core;
