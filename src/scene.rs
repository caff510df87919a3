//! Immutable scene description. Each choreography step produces a new
//! [`SceneState`] from the previous one; nothing is mutated in place.

use nalgebra::Vector3;
use serde::Deserialize;
use std::fmt;

use crate::MagnetizationSample;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    White,
    Red,
    Green,
    Blue,
    Yellow,
    Orange,
    Gold,
}

impl Color {
    pub fn hex(&self) -> &'static str {
        match self {
            Color::White => "#FFFFFF",
            Color::Red => "#FC6255",
            Color::Green => "#83C167",
            Color::Blue => "#58C4DD",
            Color::Yellow => "#FFFF00",
            Color::Orange => "#FF862F",
            Color::Gold => "#F0AC5F",
        }
    }
}

/// Spherical camera position around the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraOrientation {
    /// Polar angle from +z. Unit: `rad`
    pub phi: f64,
    /// Azimuth. Unit: `rad`
    pub theta: f64,
    pub distance: f64,
}

impl CameraOrientation {
    pub fn from_degrees(phi: f64, theta: f64, distance: f64) -> Self {
        Self {
            phi: phi.to_radians(),
            theta: theta.to_radians(),
            distance,
        }
    }
}

impl Default for CameraOrientation {
    fn default() -> Self {
        Self::from_degrees(45.0, -75.0, 6.0)
    }
}

/// Caption shown at the left edge of the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Equilibrium,
    RfPulseApplied,
    FreeInductionDecay,
    ReturnToEquilibrium,
    LayoutCheck,
}

impl Status {
    pub fn text(&self) -> &'static str {
        match self {
            Status::Equilibrium => "Equilibrium State",
            Status::RfPulseApplied => "90° RF Pulse Applied",
            Status::FreeInductionDecay => "Free Induction Decay",
            Status::ReturnToEquilibrium => "Return to Equilibrium",
            Status::LayoutCheck => "All elements visible & properly aligned",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Status::Equilibrium | Status::LayoutCheck => Color::Yellow,
            Status::RfPulseApplied => Color::Green,
            Status::FreeInductionDecay => Color::Orange,
            Status::ReturnToEquilibrium => Color::Gold,
        }
    }
}

/// Numeric read-out of the magnetization, rounded to two decimals on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterReadout {
    pub mx: f64,
    pub my: f64,
    pub mz: f64,
    /// Unit: `s`
    pub t: f64,
}

impl ParameterReadout {
    /// One line per value, in display order, with the colour of its axis.
    pub fn lines(&self) -> [(String, Color); 4] {
        [
            (format!("Mx: {:.2}", self.mx), Color::Red),
            (format!("My: {:.2}", self.my), Color::Green),
            (format!("Mz: {:.2}", self.mz), Color::Blue),
            (format!("t: {:.2}s", self.t), Color::White),
        ]
    }
}

impl From<MagnetizationSample> for ParameterReadout {
    fn from(s: MagnetizationSample) -> Self {
        Self {
            mx: s.mx(),
            my: s.my(),
            mz: s.mz(),
            t: s.t,
        }
    }
}

impl fmt::Display for ParameterReadout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines = self.lines().map(|(text, _)| text);
        write!(f, "{}", lines.join("  "))
    }
}

/// Run times of the choreography steps, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub setup: f64,
    pub initial: f64,
    pub status_swap: f64,
    pub pulse: f64,
    pub readout: f64,
    pub relaxation: f64,
    pub final_swap: f64,
    pub final_wait: f64,
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    /// Short run times for previewing
    #[default]
    Testing,
    Full,
}

impl Quality {
    pub fn timing(&self) -> Timing {
        match self {
            Quality::Testing => Timing {
                setup: 0.5,
                initial: 0.3,
                status_swap: 0.1,
                pulse: 0.3,
                readout: 0.1,
                relaxation: 0.3,
                final_swap: 0.2,
                final_wait: 0.5,
            },
            Quality::Full => Timing {
                setup: 2.0,
                initial: 1.5,
                status_swap: 0.5,
                pulse: 1.5,
                readout: 0.5,
                relaxation: 1.5,
                final_swap: 1.0,
                final_wait: 2.0,
            },
        }
    }
}

/// Which arrangement of the fixed scene elements to draw.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// The relaxation animation
    #[default]
    Main,
    /// Static check that every element is on screen: B0 on the far side,
    /// red magnetization, compact equation and no time read-out.
    PositionCheck,
}

/// Everything visible in one keyframe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneState {
    pub layout: Layout,
    pub camera: CameraOrientation,
    /// Axes, axis labels, B0 arrow, title and equation
    pub decorations: bool,
    pub magnetization: Option<Vector3<f64>>,
    pub rf_field: bool,
    pub status: Option<Status>,
    pub readout: Option<ParameterReadout>,
}

impl Default for SceneState {
    fn default() -> Self {
        Self {
            layout: Layout::default(),
            camera: CameraOrientation::default(),
            decorations: false,
            magnetization: None,
            rf_field: false,
            status: None,
            readout: None,
        }
    }
}

impl SceneState {
    pub fn with_layout(self, layout: Layout) -> Self {
        Self { layout, ..self }
    }

    pub fn with_camera(self, camera: CameraOrientation) -> Self {
        Self { camera, ..self }
    }

    pub fn with_decorations(self, decorations: bool) -> Self {
        Self {
            decorations,
            ..self
        }
    }

    pub fn with_magnetization(self, m: Vector3<f64>) -> Self {
        Self {
            magnetization: Some(m),
            ..self
        }
    }

    pub fn with_rf_field(self, rf_field: bool) -> Self {
        Self { rf_field, ..self }
    }

    pub fn with_status(self, status: Option<Status>) -> Self {
        Self { status, ..self }
    }

    pub fn with_readout(self, readout: ParameterReadout) -> Self {
        Self {
            readout: Some(readout),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn readout_two_decimals() {
        let readout = ParameterReadout {
            mx: 0.05176,
            my: 0.0,
            mz: 0.96593,
            t: 0.3,
        };
        let lines = readout.lines();

        check!(lines[0].0 == "Mx: 0.05");
        check!(lines[1].0 == "My: 0.00");
        check!(lines[2].0 == "Mz: 0.97");
        check!(lines[3].0 == "t: 0.30s");
        check!(readout.to_string() == "Mx: 0.05  My: 0.00  Mz: 0.97  t: 0.30s");
    }

    #[test]
    fn states_are_replaced() {
        let before = SceneState::default();
        let after = before
            .with_status(Some(Status::Equilibrium))
            .with_magnetization(Vector3::z());

        check!(before.status.is_none());
        check!(before.magnetization.is_none());
        check!(after.status == Some(Status::Equilibrium));
        check!(after.camera == before.camera);
        check!(after.layout == Layout::Main);
    }

    #[test]
    fn layout_check_caption() {
        let status = Status::LayoutCheck;
        check!(status.text() == "All elements visible & properly aligned");
        check!(status.color() == Color::Yellow);
    }

    #[test]
    fn full_quality_is_slower() {
        let testing = Quality::Testing.timing();
        let full = Quality::Full.timing();

        check!(full.setup > testing.setup);
        check!(full.relaxation == 1.5);
        check!(testing.relaxation == 0.3);
    }
}
