//! Everything an animation of the Bloch equation needs except the drawing:
//! the magnetization trajectory after a 90° pulse, the scene choreography
//! built around it and a small trait the animation engine implements to draw
//! the result.
//!
//! Trajectories are lazy and can be sampled as often as needed; the same
//! inputs always produce the same samples.
//! ```
//! let physics = blochvis::PhysicsParameters::default();
//! let trajectory =
//!     blochvis::relaxation(&physics, 0.3, 0.05, blochvis::ModelKind::Linear).unwrap();
//! for sample in trajectory.samples() {
//!     println!("{sample}");
//! }
//! ```

use nalgebra::Vector3;

mod error;
mod model_linear;
mod model_relaxation;
mod physics;
mod trajectory;
mod types;

pub mod config;
pub mod export;
pub mod render;
pub mod rf;
pub mod scene;
pub mod storyboard;

pub use error::{Error, Result};
pub use model_linear::LinearInterpolation;
pub use model_relaxation::ExponentialRelaxation;
pub use physics::PhysicsParameters;
pub use trajectory::{Samples, Trajectory, TrajectoryRequest};
pub use types::*;

/// Positions the samples of a trajectory. Implementations must be pure: the
/// same arguments always give the same vector.
pub trait RelaxationModel {
    fn name(&self) -> &'static str;

    /// Magnetization at time `t` of a trajectory from `start` to `end` that
    /// lasts `duration` seconds.
    fn position(
        &self,
        start: &Vector3<f64>,
        end: &Vector3<f64>,
        t: f64,
        duration: f64,
    ) -> Vector3<f64>;
}

pub fn linear(request: TrajectoryRequest) -> Trajectory {
    Trajectory::new(request, Box::new(LinearInterpolation))
}

/// Diverges from [`linear`] on purpose: the path is shaped by T1 and T2 and
/// only the final sample is pinned to the end vector.
pub fn exponential(request: TrajectoryRequest, physics: &PhysicsParameters) -> Trajectory {
    Trajectory::new(request, Box::new(ExponentialRelaxation::new(physics)))
}

/// Relaxation from the pulse target back to equilibrium, sampled every
/// `step` seconds for `duration` seconds.
pub fn relaxation(
    physics: &PhysicsParameters,
    duration: f64,
    step: f64,
    model: ModelKind,
) -> Result<Trajectory> {
    physics.validate()?;
    let request =
        TrajectoryRequest::new(physics.pulse_target(), physics.equilibrium(), duration, step)?;
    Ok(match model {
        ModelKind::Linear => linear(request),
        ModelKind::Exponential => {
            tracing::info!(
                t1 = physics.t1,
                t2 = physics.t2,
                "Using exponential relaxation instead of the linear return path"
            );
            exponential(request, physics)
        }
    })
}
