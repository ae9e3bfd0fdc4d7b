//! Crosswalk accumulation pipeline.
//!
//! This module wires the detector call, the per-pixel counter update, the
//! stability threshold and the vehicle overlap test together.

mod error;
mod overlap;
mod params;
mod pipeline;
mod result;

pub use error::CrosswalkError;
pub use overlap::{overlap_check, overlap_pixels};
pub use params::CrosswalkParams;
pub use pipeline::{AccumulatorState, CrosswalkAccumulator};
pub use result::FrameVerdict;
