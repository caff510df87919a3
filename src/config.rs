//! TOML scene configuration. Every field is optional and defaults to the
//! values of the stock animation.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::scene::Quality;
use crate::{ModelKind, PhysicsParameters, Result, Trajectory};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneConfig {
    #[serde(default)]
    pub quality: Quality,
    #[serde(default)]
    pub model: ModelKind,
    #[serde(default)]
    pub physics: PhysicsConfig,
    #[serde(default)]
    pub relaxation: RelaxationConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhysicsConfig {
    #[serde(default = "default_t1")]
    pub t1: f64,
    #[serde(default = "default_t2")]
    pub t2: f64,
    #[serde(default = "default_m0")]
    pub m0: f64,
    #[serde(default = "default_tilt_deg")]
    pub tilt_deg: f64,
    #[serde(default = "default_b0")]
    pub b0: f64,
    #[serde(default = "default_gamma")]
    pub gamma: f64,
    #[serde(default = "default_transverse_scale")]
    pub equilibrium_transverse_scale: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            t1: default_t1(),
            t2: default_t2(),
            m0: default_m0(),
            tilt_deg: default_tilt_deg(),
            b0: default_b0(),
            gamma: default_gamma(),
            equilibrium_transverse_scale: default_transverse_scale(),
        }
    }
}

fn default_t1() -> f64 {
    1.0
}
fn default_t2() -> f64 {
    0.1
}
fn default_m0() -> f64 {
    1.0
}
fn default_tilt_deg() -> f64 {
    15.0
}
fn default_b0() -> f64 {
    1.5
}
fn default_gamma() -> f64 {
    2.675e8
}
fn default_transverse_scale() -> f64 {
    0.2
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelaxationConfig {
    /// Unit: `s`. Falls back to the run time of the selected quality.
    #[serde(default)]
    pub duration: Option<f64>,
    /// Unit: `s`
    #[serde(default = "default_step")]
    pub step: f64,
}

impl Default for RelaxationConfig {
    fn default() -> Self {
        Self {
            duration: None,
            step: default_step(),
        }
    }
}

fn default_step() -> f64 {
    0.05
}

impl SceneConfig {
    pub fn from_toml(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn physics(&self) -> Result<PhysicsParameters> {
        let p = &self.physics;
        let params = PhysicsParameters {
            t1: p.t1,
            t2: p.t2,
            m0: p.m0,
            tilt: p.tilt_deg.to_radians(),
            b0: p.b0,
            gamma: p.gamma,
            equilibrium_transverse_scale: p.equilibrium_transverse_scale,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn relaxation_duration(&self) -> f64 {
        self.relaxation
            .duration
            .unwrap_or_else(|| self.quality.timing().relaxation)
    }

    pub fn trajectory(&self) -> Result<Trajectory> {
        let physics = self.physics()?;
        crate::relaxation(
            &physics,
            self.relaxation_duration(),
            self.relaxation.step,
            self.model,
        )
    }
}

/// Load and parse a TOML scene configuration file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SceneConfig> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let config = SceneConfig::from_toml(&content)?;
    debug!(path = %path.as_ref().display(), ?config, "Loaded scene config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::SceneConfig;
    use crate::scene::Quality;
    use crate::{Error, ModelKind};
    use assert2::{check, let_assert};

    #[test]
    fn empty_file_is_stock_scene() {
        let config = SceneConfig::from_toml("").unwrap();

        check!(config.quality == Quality::Testing);
        check!(config.model == ModelKind::Linear);
        check!(config.relaxation_duration() == 0.3);

        let physics = config.physics().unwrap();
        check!((physics.equilibrium().x - 0.0518).abs() < 1e-4);
        check!(config.trajectory().unwrap().samples().count() == 7);
    }

    #[test]
    fn full_quality_relaxes_longer() {
        let config = SceneConfig::from_toml(
            r#"
            quality = "full"
            model = "exponential"

            [relaxation]
            step = 0.1
            "#,
        )
        .unwrap();

        check!(config.relaxation_duration() == 1.5);
        let trajectory = config.trajectory().unwrap();
        check!(trajectory.model_name() == "exponential");
        check!(trajectory.samples().count() == 16);
    }

    #[test]
    fn explicit_duration_wins() {
        let config = SceneConfig::from_toml(
            r#"
            [relaxation]
            duration = 0.3
            step = 0.07
            "#,
        )
        .unwrap();
        check!(config.trajectory().unwrap().samples().count() == 5);
    }

    #[test]
    fn invalid_physics() {
        let config = SceneConfig::from_toml("[physics]\nt2 = 0.0\n").unwrap();
        let_assert!(Err(Error::InvalidParameter { name: "t2", .. }) = config.physics());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let_assert!(Err(Error::Config(_)) = SceneConfig::from_toml("[physics]\nt3 = 1.0\n"));
        let_assert!(Err(Error::Config(_)) = SceneConfig::from_toml("model = \"quadratic\"\n"));
    }
}
