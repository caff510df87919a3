use nalgebra::{Matrix3, Vector3};

/// An instantaneous (hard) RF pulse: rotation by `angle` around an axis in
/// the transverse plane selected by `phase`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RfPulse {
    /// Unit: `rad`
    pub angle: f64,
    /// Unit: `rad`
    pub phase: f64,
}

impl RfPulse {
    pub fn new(angle: f64, phase: f64) -> Self {
        Self { angle, phase }
    }

    /// 90° excitation that tips +z onto +y.
    pub fn excitation() -> Self {
        Self::new(std::f64::consts::FRAC_PI_2, std::f64::consts::PI)
    }

    pub fn rotation(&self) -> Matrix3<f64> {
        let (sa, ca) = self.angle.sin_cos();
        let (sp, cp) = self.phase.sin_cos();
        Matrix3::new(
            ca * sp.powi(2) + cp.powi(2),
            (1.0 - ca) * sp * cp,
            sa * sp,
            (1.0 - ca) * sp * cp,
            ca * cp.powi(2) + sp.powi(2),
            -sa * cp,
            -sa * sp,
            sa * cp,
            ca,
        )
    }

    pub fn apply(&self, m: &Vector3<f64>) -> Vector3<f64> {
        self.rotation() * m
    }
}

/// Angle between `m` and +z, i.e. the flip angle that produced `m` from a
/// relaxed spin.
pub fn flip_angle(m: &Vector3<f64>) -> f64 {
    // Normalize because error can build up during rotations
    (m.z / m.norm()).acos()
}

/// Phase of the pulse that produced `m` from a relaxed spin, in `[0, 2pi)`.
pub fn pulse_phase(m: &Vector3<f64>) -> f64 {
    // We want the phase of the applied rotation, not of the spin itself
    let tmp = f64::atan2(m.y, m.x) + std::f64::consts::FRAC_PI_2;
    if tmp < 0.0 {
        tmp + std::f64::consts::TAU
    } else {
        tmp
    }
}

#[cfg(test)]
mod tests {
    use super::{flip_angle, pulse_phase, RfPulse};
    use assert2::check;
    use nalgebra::Vector3;
    use std::f64::consts::{PI, TAU};

    fn phase_distance(a: f64, b: f64) -> f64 {
        let d = (a - b).rem_euclid(TAU);
        d.min(TAU - d)
    }

    #[test]
    fn excitation_tips_z_onto_y() {
        let m = RfPulse::excitation().apply(&Vector3::z());

        check!(m.x.abs() < 1e-12);
        check!((m.y - 1.0).abs() < 1e-12);
        check!(m.z.abs() < 1e-12);
        check!((pulse_phase(&m) - PI).abs() < 1e-12);
    }

    #[test]
    fn rotation_preserves_length() {
        let m = Vector3::new(0.3, -0.2, 0.9);
        let rotated = RfPulse::new(1.1, 4.0).apply(&m);
        check!((rotated.norm() - m.norm()).abs() < 1e-12);
    }

    #[test]
    fn random_rot() {
        for _ in 0..1000 {
            let angle = 0.01 + rand::random::<f64>() * (PI - 0.02);
            let phase = rand::random::<f64>() * TAU;

            let m = RfPulse::new(angle, phase).apply(&Vector3::z());

            check!((flip_angle(&m) - angle).abs() < 1e-9);
            check!(phase_distance(pulse_phase(&m), phase) < 1e-9);
        }
    }

    #[test]
    fn random_multi_rot() {
        for _ in 0..1000 {
            let angle = 0.01 + rand::random::<f64>() * (PI - 0.02);
            let phase = rand::random::<f64>() * TAU;

            let mut m = Vector3::z();
            let subsamples = rand::random::<u32>() % 100 + 1;
            for _ in 0..subsamples {
                m = RfPulse::new(angle / subsamples as f64, phase).apply(&m);
            }

            check!((flip_angle(&m) - angle).abs() < 1e-9);
            check!(phase_distance(pulse_phase(&m), phase) < 1e-9);
        }
    }
}
