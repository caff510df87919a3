use std::iter::FusedIterator;

use nalgebra::Vector3;
use tracing::{debug, trace, warn};

use crate::error::{non_negative, positive, Error, Result};
use crate::{MagnetizationSample, MagnetizationSampleVec, RelaxationModel};

/// Relative slack when counting how many steps fit into the duration, so that
/// `0.3 / 0.05` counts six steps even though it evaluates to `5.999..`.
const STEP_COUNT_TOLERANCE: f64 = 1e-9;
/// Upper bound on the number of interpolated samples of one trajectory.
pub const MAX_STEPS: usize = 100_000_000;

/// Everything that determines the sample sequence of a trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryRequest {
    pub start: Vector3<f64>,
    pub end: Vector3<f64>,
    /// Unit: `s`
    pub total_duration: f64,
    /// Unit: `s`
    pub step_size: f64,
}

impl TrajectoryRequest {
    pub fn new(
        start: Vector3<f64>,
        end: Vector3<f64>,
        total_duration: f64,
        step_size: f64,
    ) -> Result<Self> {
        for (name, v) in [("start", &start), ("end", &end)] {
            if let Some(&value) = v.iter().find(|x| !x.is_finite()) {
                return Err(Error::InvalidParameter {
                    name,
                    value,
                    reason: "vector components must be finite",
                });
            }
        }
        non_negative("total_duration", total_duration)?;
        positive("step_size", step_size)?;
        let ratio = total_duration / step_size;
        if !ratio.is_finite() || ratio > MAX_STEPS as f64 {
            return Err(Error::InvalidParameter {
                name: "step_size",
                value: step_size,
                reason: "too small for the duration, the trajectory would have too many steps",
            });
        }

        let request = Self {
            start,
            end,
            total_duration,
            step_size,
        };
        if request.is_degenerate() {
            warn!(
                total_duration,
                step_size, "Step is longer than the trajectory, only the final sample is emitted"
            );
        }
        debug!(
            steps = request.step_count(),
            total_duration, step_size, "Created trajectory request"
        );
        Ok(request)
    }

    /// Number of interpolated samples, not counting the final corrective one.
    pub fn step_count(&self) -> usize {
        let ratio = self.total_duration / self.step_size;
        (ratio * (1.0 + STEP_COUNT_TOLERANCE)).floor() as usize
    }

    /// Total number of samples including the final corrective one.
    pub fn len(&self) -> usize {
        self.step_count().saturating_add(1)
    }

    /// Never empty: the final corrective sample is always emitted.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The step does not fit into the duration even once.
    pub fn is_degenerate(&self) -> bool {
        self.step_size > self.total_duration
    }
}

/// A request bound to the model that positions its samples. Every call to
/// [`Trajectory::samples`] starts a fresh, identical sequence.
pub struct Trajectory {
    request: TrajectoryRequest,
    model: Box<dyn RelaxationModel>,
}

impl Trajectory {
    pub fn new(request: TrajectoryRequest, model: Box<dyn RelaxationModel>) -> Self {
        Self { request, model }
    }

    pub fn request(&self) -> &TrajectoryRequest {
        &self.request
    }

    pub fn model_name(&self) -> &'static str {
        self.model.name()
    }

    pub fn samples(&self) -> Samples<'_> {
        Samples {
            request: &self.request,
            model: self.model.as_ref(),
            emitted: 0,
            finished: false,
        }
    }

    pub fn sample_vec(&self) -> MagnetizationSampleVec {
        self.samples().collect()
    }
}

/// Lazy iterator over the samples of a [`Trajectory`]. Dropping it early has
/// no side effects.
#[derive(Clone)]
pub struct Samples<'a> {
    request: &'a TrajectoryRequest,
    model: &'a dyn RelaxationModel,
    emitted: usize,
    finished: bool,
}

impl Iterator for Samples<'_> {
    type Item = MagnetizationSample;

    fn next(&mut self) -> Option<Self::Item> {
        let req = self.request;

        if self.emitted < req.step_count() {
            self.emitted += 1;
            // Clamp so the tolerance in step_count can't push t past the end
            let t = (self.emitted as f64 * req.step_size).min(req.total_duration);
            let position = self
                .model
                .position(&req.start, &req.end, t, req.total_duration);
            trace!(t, ?position, "Trajectory sample");
            Some(MagnetizationSample { position, t })
        } else if !self.finished {
            self.finished = true;
            Some(MagnetizationSample {
                position: req.end,
                t: req.total_duration,
            })
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.finished {
            0
        } else {
            self.request
                .step_count()
                .saturating_sub(self.emitted)
                .saturating_add(1)
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Samples<'_> {}

impl FusedIterator for Samples<'_> {}
