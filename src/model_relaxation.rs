use nalgebra::Vector3;

use crate::{PhysicsParameters, RelaxationModel};

/// Closed-form free relaxation without precession: every component of the
/// deviation from equilibrium decays exponentially, x and y with T2, z with
/// T1.
///
/// The trajectory does not reach the end vector in finite time; the sampler
/// still pins its last sample to it, which shows up as a final jump when the
/// duration is short compared to T1.
#[derive(Debug, Clone, Copy)]
pub struct ExponentialRelaxation {
    physics: PhysicsParameters,
}

impl ExponentialRelaxation {
    pub fn new(physics: &PhysicsParameters) -> Self {
        Self { physics: *physics }
    }
}

impl RelaxationModel for ExponentialRelaxation {
    fn name(&self) -> &'static str {
        "exponential"
    }

    fn position(
        &self,
        start: &Vector3<f64>,
        end: &Vector3<f64>,
        t: f64,
        _duration: f64,
    ) -> Vector3<f64> {
        let factors = self.physics.relaxation_at(t);
        let e2 = factors.transverse_decay;
        let e1 = 1.0 - factors.longitudinal_recovery;
        end + (start - end).component_mul(&Vector3::new(e2, e2, e1))
    }
}
