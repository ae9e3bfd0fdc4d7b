use crate::MaskKind;
use crosswalk_core::{Shape, ShapeError};

/// Errors returned by the crosswalk accumulator.
#[derive(thiserror::Error, Debug, Clone, Copy, Eq, PartialEq)]
pub enum CrosswalkError {
    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error("frame size changed (accumulated {expected}, got {got}); reset before switching streams")]
    FrameSizeChanged { expected: Shape, got: Shape },

    #[error("detector returned a {kind} mask of {got} for a {expected} frame")]
    DetectorMaskShape {
        kind: MaskKind,
        expected: Shape,
        got: Shape,
    },

    #[error("cumulative count is not initialized")]
    Uninitialized,
}
