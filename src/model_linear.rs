use nalgebra::Vector3;

use crate::RelaxationModel;

/// Moves the magnetization on a straight line from start to end, the
/// interpolation factor grows linearly with time.
///
/// This is a visual simplification: T1 and T2 do not influence the path at
/// all (see [`crate::PhysicsParameters::relaxation_at`] for the laws it
/// ignores). Use [`crate::ExponentialRelaxation`] for a physically motivated
/// return to equilibrium.
#[derive(Debug, Default, Clone, Copy)]
pub struct LinearInterpolation;

impl RelaxationModel for LinearInterpolation {
    fn name(&self) -> &'static str {
        "linear"
    }

    fn position(
        &self,
        start: &Vector3<f64>,
        end: &Vector3<f64>,
        t: f64,
        duration: f64,
    ) -> Vector3<f64> {
        if duration <= 0.0 {
            return *end;
        }
        let alpha = (t / duration).clamp(0.0, 1.0);
        start.lerp(end, alpha)
    }
}
