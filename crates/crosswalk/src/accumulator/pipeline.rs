use super::{overlap_check, overlap_pixels, CrosswalkError, CrosswalkParams, FrameVerdict};
use crate::{CrosswalkVehicleDetector, Detection, MaskKind};
use crosswalk_core::{CountMap, FrameView, Mask, MaskView, Shape, ShapeError};
use log::{debug, trace, warn};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Lifecycle of the accumulated counts.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum AccumulatorState {
    /// No counts yet; the next frame allocates them.
    Uninitialized,
    /// Counts exist for a fixed frame shape.
    Accumulating { shape: Shape },
}

/// Accumulates crosswalk detections over a frame stream.
///
/// The detector and parameters are borrowed for the accumulator's lifetime;
/// the per-pixel counts are owned and survive until [`reset`](Self::reset).
pub struct CrosswalkAccumulator<'a, D: ?Sized> {
    detector: &'a D,
    params: &'a CrosswalkParams,
    counts: Option<CountMap>,
    frames_seen: u64,
}

impl<'a, D> CrosswalkAccumulator<'a, D>
where
    D: CrosswalkVehicleDetector + ?Sized,
{
    pub fn new(detector: &'a D, params: &'a CrosswalkParams) -> Self {
        Self {
            detector,
            params,
            counts: None,
            frames_seen: 0,
        }
    }

    #[inline]
    pub fn detector(&self) -> &'a D {
        self.detector
    }

    #[inline]
    pub fn params(&self) -> &'a CrosswalkParams {
        self.params
    }

    pub fn state(&self) -> AccumulatorState {
        match &self.counts {
            None => AccumulatorState::Uninitialized,
            Some(counts) => AccumulatorState::Accumulating {
                shape: counts.shape(),
            },
        }
    }

    /// Frames processed since construction or the last reset.
    #[inline]
    pub fn frames_seen(&self) -> u64 {
        self.frames_seen
    }

    /// Accumulated per-pixel counts, if any frame has been processed.
    #[inline]
    pub fn cumulative_count(&self) -> Option<&CountMap> {
        self.counts.as_ref()
    }

    /// Stable mask for the current counts without feeding a new frame.
    pub fn stable_mask(&self) -> Option<Mask> {
        threshold_counts(self.counts.as_ref(), self.params.count_th_crosswalk).ok()
    }

    /// Discard all accumulated history.
    pub fn reset(&mut self) {
        if self.counts.take().is_some() {
            debug!("crosswalk counts reset after {} frame(s)", self.frames_seen);
        }
        self.frames_seen = 0;
    }

    /// Run the detector on `frame`, fold its crosswalk mask into the counts and
    /// return `(stable_crosswalk, vehicle)`.
    ///
    /// A frame without a crosswalk mask leaves the counts untouched. Errors
    /// are returned before any state changes.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "debug",
            skip(self, frame),
            fields(width = frame.width(), height = frame.height())
        )
    )]
    pub fn accumulate_and_threshold(
        &mut self,
        frame: &FrameView<'_>,
    ) -> Result<(Mask, Mask), CrosswalkError> {
        let step = self.step(frame)?;
        Ok((step.stable, step.vehicle))
    }

    /// True if any vehicle pixel lies on a stable crosswalk pixel.
    pub fn overlap_check(
        &self,
        vehicle: &MaskView<'_>,
        stable: &MaskView<'_>,
    ) -> Result<bool, ShapeError> {
        overlap_check(vehicle, stable)
    }

    /// Accumulate one frame and report whether a vehicle sits on the stable
    /// crosswalk.
    pub fn process_frame(&mut self, frame: &FrameView<'_>) -> Result<FrameVerdict, CrosswalkError> {
        let index = self.frames_seen;
        let step = self.step(frame)?;
        let overlap_pixels = overlap_pixels(&step.vehicle.view(), &step.stable.view())?;

        if overlap_pixels > 0 {
            debug!("frame {index}: vehicle overlaps stable crosswalk ({overlap_pixels} px)");
        }
        Ok(FrameVerdict {
            index,
            crosswalk_detected: step.crosswalk_detected,
            stable_pixels: step.stable.count_nonzero(),
            vehicle_pixels: step.vehicle.count_nonzero(),
            overlap_pixels,
            overlap: overlap_pixels > 0,
        })
    }

    fn step(&mut self, frame: &FrameView<'_>) -> Result<Step, CrosswalkError> {
        let shape = frame.shape();
        if let Some(counts) = &self.counts {
            if counts.shape() != shape {
                return Err(CrosswalkError::FrameSizeChanged {
                    expected: counts.shape(),
                    got: shape,
                });
            }
        }

        let Detection { crosswalk, vehicle } = self.detector.detect(frame);
        check_mask_shape(MaskKind::Vehicle, shape, vehicle.shape())?;
        if let Some(mask) = &crosswalk {
            check_mask_shape(MaskKind::Crosswalk, shape, mask.shape())?;
        }

        if self.counts.is_none() {
            debug!("crosswalk counts initialized for {shape} frames");
            self.counts = Some(CountMap::zeros(shape.width, shape.height)?);
        }

        match (&crosswalk, self.counts.as_mut()) {
            (Some(mask), Some(counts)) => counts.accumulate(&mask.view())?,
            (Some(_), None) => {}
            (None, _) => trace!("frame {}: no crosswalk detected", self.frames_seen),
        }
        self.frames_seen += 1;

        let stable = stable_or_fail_open(
            self.counts.as_ref(),
            self.params.count_th_crosswalk,
            shape,
        )?;
        trace!(
            "frame {}: {} stable crosswalk px, {} vehicle px",
            self.frames_seen - 1,
            stable.count_nonzero(),
            vehicle.count_nonzero()
        );

        Ok(Step {
            stable,
            vehicle,
            crosswalk_detected: crosswalk.is_some(),
        })
    }
}

struct Step {
    stable: Mask,
    vehicle: Mask,
    crosswalk_detected: bool,
}

fn check_mask_shape(kind: MaskKind, expected: Shape, got: Shape) -> Result<(), CrosswalkError> {
    if expected != got {
        return Err(CrosswalkError::DetectorMaskShape {
            kind,
            expected,
            got,
        });
    }
    Ok(())
}

fn threshold_counts(counts: Option<&CountMap>, threshold: u32) -> Result<Mask, CrosswalkError> {
    counts
        .map(|c| c.threshold(threshold))
        .ok_or(CrosswalkError::Uninitialized)
}

/// Threshold the counts, treating the whole frame as stable crosswalk when
/// no counts exist.
fn stable_or_fail_open(
    counts: Option<&CountMap>,
    threshold: u32,
    shape: Shape,
) -> Result<Mask, ShapeError> {
    match threshold_counts(counts, threshold) {
        Ok(mask) => Ok(mask),
        Err(err) => {
            warn!("{err}; marking the whole {shape} frame as stable crosswalk");
            Mask::filled(shape.width, shape.height, 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crosswalk_core::Frame;
    use std::cell::Cell;

    /// Detector that flags the whole frame as crosswalk on every `period`-th
    /// call and never sees a vehicle.
    struct Periodic {
        period: usize,
        calls: Cell<usize>,
    }

    impl CrosswalkVehicleDetector for Periodic {
        fn detect(&self, frame: &FrameView<'_>) -> Detection {
            let n = self.calls.get();
            self.calls.set(n + 1);
            let (w, h) = (frame.width(), frame.height());
            Detection {
                crosswalk: (n % self.period == 0).then(|| Mask::filled(w, h, 1).expect("mask")),
                vehicle: Mask::zeros(w, h).expect("mask"),
            }
        }
    }

    fn wrong_vehicle(frame: &FrameView<'_>) -> Detection {
        Detection {
            crosswalk: Mask::filled(frame.width(), frame.height(), 1).ok(),
            vehicle: Mask::zeros(frame.width() + 1, frame.height()).expect("mask"),
        }
    }

    #[test]
    fn fail_open_without_counts() {
        let stable = stable_or_fail_open(None, 5, Shape::new(4, 2)).expect("stable");
        assert_eq!(stable.shape(), Shape::new(4, 2));
        assert!(stable.all_eq(1));
    }

    #[test]
    fn threshold_without_counts_is_uninitialized() {
        assert_eq!(
            threshold_counts(None, 1).unwrap_err(),
            CrosswalkError::Uninitialized
        );
    }

    #[test]
    fn state_follows_first_frame_and_reset() {
        let detector = Periodic {
            period: 1,
            calls: Cell::new(0),
        };
        let params = CrosswalkParams {
            count_th_crosswalk: 1,
        };
        let mut acc = CrosswalkAccumulator::new(&detector, &params);
        assert_eq!(acc.state(), AccumulatorState::Uninitialized);
        assert!(acc.stable_mask().is_none());

        let frame = Frame::blank(4, 3, 1).expect("frame");
        acc.accumulate_and_threshold(&frame.view()).expect("frame");
        assert_eq!(
            acc.state(),
            AccumulatorState::Accumulating {
                shape: Shape::new(4, 3)
            }
        );
        assert_eq!(acc.frames_seen(), 1);
        assert!(acc.stable_mask().expect("stable").all_eq(1));

        acc.reset();
        acc.reset();
        assert_eq!(acc.state(), AccumulatorState::Uninitialized);
        assert_eq!(acc.frames_seen(), 0);
        assert!(acc.cumulative_count().is_none());
    }

    #[test]
    fn skipped_frames_do_not_count() {
        let detector = Periodic {
            period: 2,
            calls: Cell::new(0),
        };
        let params = CrosswalkParams {
            count_th_crosswalk: 2,
        };
        let mut acc = CrosswalkAccumulator::new(&detector, &params);
        let frame = Frame::blank(2, 2, 3).expect("frame");

        let verdicts: Vec<FrameVerdict> = (0..4)
            .map(|_| acc.process_frame(&frame.view()).expect("frame"))
            .collect();
        let detected: Vec<bool> = verdicts.iter().map(|v| v.crosswalk_detected).collect();
        assert_eq!(detected, vec![true, false, true, false]);
        assert_eq!(acc.cumulative_count().map(CountMap::max), Some(2));
        assert_eq!(verdicts[1].stable_pixels, 0);
        assert_eq!(verdicts[2].stable_pixels, 4);
        assert!(verdicts.iter().all(|v| !v.overlap));
    }

    #[test]
    fn size_change_is_rejected_without_touching_counts() {
        let detector = Periodic {
            period: 1,
            calls: Cell::new(0),
        };
        let params = CrosswalkParams::default();
        let mut acc = CrosswalkAccumulator::new(&detector, &params);
        acc.accumulate_and_threshold(&Frame::blank(3, 3, 1).expect("frame").view())
            .expect("first frame");

        let err = acc
            .accumulate_and_threshold(&Frame::blank(4, 3, 1).expect("frame").view())
            .unwrap_err();
        assert_eq!(
            err,
            CrosswalkError::FrameSizeChanged {
                expected: Shape::new(3, 3),
                got: Shape::new(4, 3)
            }
        );
        assert_eq!(acc.frames_seen(), 1);
        assert_eq!(detector.calls.get(), 1);
        assert_eq!(acc.cumulative_count().map(CountMap::max), Some(1));
    }

    #[test]
    fn bad_detector_mask_leaves_state_uninitialized() {
        let params = CrosswalkParams::default();
        let mut acc = CrosswalkAccumulator::new(&wrong_vehicle, &params);
        let err = acc
            .accumulate_and_threshold(&Frame::blank(2, 2, 1).expect("frame").view())
            .unwrap_err();
        assert_eq!(
            err,
            CrosswalkError::DetectorMaskShape {
                kind: MaskKind::Vehicle,
                expected: Shape::new(2, 2),
                got: Shape::new(3, 2)
            }
        );
        assert_eq!(acc.state(), AccumulatorState::Uninitialized);
    }
}
