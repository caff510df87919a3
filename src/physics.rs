use nalgebra::Vector3;
use tracing::warn;

use crate::error::{non_negative, positive, Error, Result};
use crate::rf::RfPulse;
use crate::RelaxationFactors;

/// Components this small relative to M0 are rotation round-off.
const ROTATION_RESIDUE: f64 = 1e-12;

/// Physical constants of the simulated spin ensemble. Construct with
/// [`PhysicsParameters::new`] or start from `default()` and call
/// [`PhysicsParameters::validate`] after changing fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsParameters {
    /// Longitudinal relaxation. Unit: `s`
    pub t1: f64,
    /// Transverse relaxation. Unit: `s`
    pub t2: f64,
    /// Equilibrium magnetization magnitude.
    pub m0: f64,
    /// Tilt of the equilibrium vector away from +z. Unit: `rad`, in `[0, pi/2)`
    pub tilt: f64,
    /// Main field strength. Unit: `T`
    pub b0: f64,
    /// Gyromagnetic ratio. Unit: `rad / s / T`
    pub gamma: f64,
    /// Multiplies the x-component of the equilibrium vector.
    pub equilibrium_transverse_scale: f64,
}

impl Default for PhysicsParameters {
    fn default() -> Self {
        Self {
            t1: 1.0,
            t2: 0.1,
            m0: 1.0,
            tilt: 15f64.to_radians(),
            b0: 1.5,
            gamma: 2.675e8,
            equilibrium_transverse_scale: 1.0,
        }
    }
}

impl PhysicsParameters {
    pub fn new(t1: f64, t2: f64, m0: f64, tilt: f64) -> Result<Self> {
        let params = Self {
            t1,
            t2,
            m0,
            tilt,
            ..Default::default()
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        positive("t1", self.t1)?;
        positive("t2", self.t2)?;
        positive("m0", self.m0)?;
        positive("b0", self.b0)?;
        positive("gamma", self.gamma)?;
        non_negative("equilibrium_transverse_scale", self.equilibrium_transverse_scale)?;
        non_negative("tilt", self.tilt)?;
        if self.tilt >= std::f64::consts::FRAC_PI_2 {
            return Err(Error::InvalidParameter {
                name: "tilt",
                value: self.tilt,
                reason: "must be less than pi/2",
            });
        }

        if self.t2 >= self.t1 {
            warn!(
                t1 = self.t1,
                t2 = self.t2,
                "T2 is not shorter than T1, transverse decay will not outpace recovery"
            );
        }
        Ok(())
    }

    /// The state the magnetization relaxes back to.
    pub fn equilibrium(&self) -> Vector3<f64> {
        Vector3::new(
            self.equilibrium_transverse_scale * self.m0 * self.tilt.sin(),
            0.0,
            self.m0 * self.tilt.cos(),
        )
    }

    /// Magnetization right after an ideal 90° excitation of a fully relaxed
    /// (untilted) ensemble: exactly `(0, M0, 0)`.
    pub fn pulse_target(&self) -> Vector3<f64> {
        let m = RfPulse::excitation().apply(&(Vector3::z() * self.m0));
        // Drop the rounding residue of sin(pi) and cos(pi/2)
        m.map(|x| if x.abs() < ROTATION_RESIDUE * self.m0 { 0.0 } else { x })
    }

    /// Unit: `rad / s`
    pub fn larmor_frequency(&self) -> f64 {
        self.gamma * self.b0
    }

    pub fn relaxation_at(&self, t: f64) -> RelaxationFactors {
        RelaxationFactors {
            transverse_decay: (-t / self.t2).exp(),
            longitudinal_recovery: 1.0 - (-t / self.t1).exp(),
        }
    }
}
