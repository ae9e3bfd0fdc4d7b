//! Core raster types for crosswalk accumulation.
//!
//! This crate is intentionally small. It knows about frames, binary masks
//! and per-pixel counters, and nothing about the detector that produces the
//! masks.

mod count_map;
mod error;
mod frame;
mod logger;
mod mask;

pub use count_map::CountMap;
pub use error::{Shape, ShapeError};
pub use frame::{Frame, FrameView};
pub use mask::{Mask, MaskView};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
