use nalgebra::Vector3;
use std::fmt;

/// Magnetization state for a single point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagnetizationSample {
    /// Unit: `M0`
    pub position: Vector3<f64>,
    /// Time since the end of the excitation pulse. Unit: `s`
    pub t: f64,
}

impl MagnetizationSample {
    pub fn mx(&self) -> f64 {
        self.position.x
    }

    pub fn my(&self) -> f64 {
        self.position.y
    }

    pub fn mz(&self) -> f64 {
        self.position.z
    }
}

/// Formats like the on-screen read-out: `t: 0.30s  Mx: 0.05  My: 0.00  Mz: 0.97`
impl fmt::Display for MagnetizationSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t: {:.2}s  Mx: {:.2}  My: {:.2}  Mz: {:.2}",
            self.t,
            self.mx(),
            self.my(),
            self.mz()
        )
    }
}

/// Analytic relaxation laws evaluated at a point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelaxationFactors {
    /// `exp(-t / T2)`
    pub transverse_decay: f64,
    /// `1 - exp(-t / T1)`
    pub longitudinal_recovery: f64,
}
