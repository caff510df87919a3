use tracing::debug;

use crate::scene::{CameraOrientation, Layout, ParameterReadout, Quality, SceneState, Status};
use crate::{PhysicsParameters, Trajectory};

/// Run time of the camera pan that precedes the relaxation.
const CAMERA_PAN_TIME: f64 = 1.5;
/// Hold on the relaxed state before the closing caption.
const RELAXED_HOLD_TIME: f64 = 1.0;
/// How long the position check stays on screen.
const POSITION_CHECK_TIME: f64 = 3.0;
/// Fixed values printed by the position check, not read off the vector.
const POSITION_CHECK_READOUT: ParameterReadout = ParameterReadout {
    mx: 0.2,
    my: 0.0,
    mz: 0.97,
    t: 0.0,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Setup,
    Equilibrium,
    RfPulse,
    Relaxation,
    Summary,
    PositionCheck,
}

/// A scene state and how long the transition into it takes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    pub stage: Stage,
    pub state: SceneState,
    /// Unit: `s`
    pub run_time: f64,
}

/// The full animation as an ordered list of keyframes.
#[derive(Debug, Clone, Default)]
pub struct Storyboard {
    keyframes: Vec<Keyframe>,
}

impl Storyboard {
    /// Excite the equilibrium magnetization and let it relax along
    /// `trajectory`. `physics` supplies the equilibrium and pulse target the
    /// scene starts from.
    pub fn build(physics: &PhysicsParameters, trajectory: &Trajectory, quality: Quality) -> Self {
        let timing = quality.timing();
        let mut board = Builder::default();

        let state = SceneState::default().with_decorations(true);
        board.push(Stage::Setup, state, timing.setup);

        let state = state
            .with_magnetization(physics.equilibrium())
            .with_status(Some(Status::Equilibrium));
        board.push(Stage::Equilibrium, state, timing.initial);

        // Excitation
        let state = board.swap_status(
            Stage::RfPulse,
            state,
            Status::RfPulseApplied,
            timing.status_swap,
        );
        let state = state.with_rf_field(true);
        board.push(Stage::RfPulse, state, timing.status_swap);

        let camera = CameraOrientation {
            phi: 60f64.to_radians(),
            ..state.camera
        };
        let state = state.with_camera(camera);
        board.push(Stage::RfPulse, state, timing.pulse);

        let target = physics.pulse_target();
        let state = state.with_magnetization(target).with_rf_field(false);
        board.push(Stage::RfPulse, state, timing.pulse);

        let state = state.with_readout(ParameterReadout {
            mx: target.x,
            my: target.y,
            mz: target.z,
            t: 0.0,
        });
        board.push(Stage::RfPulse, state, timing.readout);

        // Relaxation
        let mut state = board.swap_status(
            Stage::Relaxation,
            state,
            Status::FreeInductionDecay,
            timing.status_swap,
        );
        let camera = CameraOrientation {
            theta: (-165f64).to_radians(),
            ..state.camera
        };
        state = state.with_camera(camera);
        board.push(Stage::Relaxation, state, CAMERA_PAN_TIME);

        let step = trajectory.request().step_size;
        for sample in trajectory.samples() {
            state = state
                .with_magnetization(sample.position)
                .with_readout(sample.into());
            board.push(Stage::Relaxation, state, step);
        }
        board.push(Stage::Relaxation, state, RELAXED_HOLD_TIME);

        let state = board.swap_status(
            Stage::Summary,
            state,
            Status::ReturnToEquilibrium,
            timing.final_swap,
        );
        board.push(Stage::Summary, state, timing.final_wait);

        debug!(
            keyframes = board.keyframes.len(),
            model = trajectory.model_name(),
            "Built storyboard"
        );
        Self {
            keyframes: board.keyframes,
        }
    }

    /// Every element of the scene at once, held still so its placement can
    /// be inspected.
    pub fn position_check(physics: &PhysicsParameters) -> Self {
        let state = SceneState::default()
            .with_layout(Layout::PositionCheck)
            .with_camera(CameraOrientation::from_degrees(-75.0, 30.0, 6.0))
            .with_decorations(true)
            .with_magnetization(physics.equilibrium())
            .with_rf_field(true)
            .with_status(Some(Status::LayoutCheck))
            .with_readout(POSITION_CHECK_READOUT);

        let mut board = Builder::default();
        board.push(Stage::PositionCheck, state, POSITION_CHECK_TIME);
        debug!(keyframes = board.keyframes.len(), "Built position check");
        Self {
            keyframes: board.keyframes,
        }
    }

    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    /// Sum of all run times. Unit: `s`
    pub fn duration(&self) -> f64 {
        self.keyframes.iter().map(|k| k.run_time).sum()
    }

    /// Start time of every keyframe, paired with the keyframe.
    pub fn timeline(&self) -> impl Iterator<Item = (f64, &Keyframe)> + '_ {
        self.keyframes.iter().scan(0.0, |acc, k| {
            let start = *acc;
            *acc += k.run_time;
            Some((start, k))
        })
    }
}

#[derive(Default)]
struct Builder {
    keyframes: Vec<Keyframe>,
}

impl Builder {
    fn push(&mut self, stage: Stage, state: SceneState, run_time: f64) {
        self.keyframes.push(Keyframe {
            stage,
            state,
            run_time,
        });
    }

    /// Fade the current caption out and the new one in, half the run time
    /// each.
    fn swap_status(
        &mut self,
        stage: Stage,
        state: SceneState,
        status: Status,
        run_time: f64,
    ) -> SceneState {
        let hidden = state.with_status(None);
        self.push(stage, hidden, run_time / 2.0);
        let shown = hidden.with_status(Some(status));
        self.push(stage, shown, run_time / 2.0);
        shown
    }
}

#[cfg(test)]
mod tests {
    use super::{Stage, Storyboard};
    use crate::scene::{Layout, Quality, Status};
    use crate::PhysicsParameters;
    use assert2::check;

    fn storyboard(quality: Quality) -> (PhysicsParameters, Storyboard) {
        let physics = PhysicsParameters {
            equilibrium_transverse_scale: 0.2,
            ..Default::default()
        };
        let duration = quality.timing().relaxation;
        let trajectory = crate::relaxation(&physics, duration, 0.05, Default::default()).unwrap();
        let board = Storyboard::build(&physics, &trajectory, quality);
        (physics, board)
    }

    #[test]
    fn relaxation_keyframes_follow_trajectory() {
        let (physics, board) = storyboard(Quality::Testing);

        let relaxation: Vec<_> = board
            .keyframes()
            .iter()
            .filter(|k| k.stage == Stage::Relaxation && k.run_time == 0.05)
            .filter(|k| k.state.readout.is_some_and(|r| r.t > 0.0))
            .collect();
        check!(relaxation.len() == 7);

        let last = relaxation[relaxation.len() - 1];
        check!(last.state.magnetization == Some(physics.equilibrium()));
        let readout = last.state.readout.unwrap();
        check!(readout.t == 0.3);
        check!(readout.lines()[0].0 == "Mx: 0.05");
        check!(readout.lines()[2].0 == "Mz: 0.97");
    }

    #[test]
    fn captions_in_order() {
        let (_, board) = storyboard(Quality::Testing);

        let mut captions: Vec<Status> = board
            .keyframes()
            .iter()
            .filter_map(|k| k.state.status)
            .collect();
        captions.dedup();

        check!(
            captions
                == [
                    Status::Equilibrium,
                    Status::RfPulseApplied,
                    Status::FreeInductionDecay,
                    Status::ReturnToEquilibrium
                ]
        );
    }

    #[test]
    fn camera_moves() {
        let (_, board) = storyboard(Quality::Testing);
        let first = board.keyframes()[0].state.camera;
        let last = board.keyframes()[board.len() - 1].state.camera;

        check!((first.phi.to_degrees() - 45.0).abs() < 1e-9);
        check!((last.phi.to_degrees() - 60.0).abs() < 1e-9);
        check!((last.theta.to_degrees() + 165.0).abs() < 1e-9);
    }

    #[test]
    fn rf_field_only_during_pulse() {
        let (_, board) = storyboard(Quality::Testing);
        for k in board.keyframes() {
            if k.state.rf_field {
                check!(k.stage == Stage::RfPulse);
            }
        }
        check!(board.keyframes().iter().any(|k| k.state.rf_field));
    }

    #[test]
    fn position_check_is_one_still() {
        let (physics, _) = storyboard(Quality::Testing);
        let board = Storyboard::position_check(&physics);

        check!(board.len() == 1);
        check!(board.duration() == 3.0);
        let k = board.keyframes()[0];
        check!(k.stage == Stage::PositionCheck);
        check!(k.state.layout == Layout::PositionCheck);
        check!(k.state.decorations);
        check!(k.state.rf_field);
        check!(k.state.magnetization == Some(physics.equilibrium()));
        check!(k.state.status == Some(Status::LayoutCheck));
        check!((k.state.camera.phi.to_degrees() + 75.0).abs() < 1e-9);
        check!((k.state.camera.theta.to_degrees() - 30.0).abs() < 1e-9);
        check!(k.state.camera.distance == 6.0);
    }

    #[test]
    fn main_storyboard_uses_main_layout() {
        let (_, board) = storyboard(Quality::Testing);
        check!(board.keyframes().iter().all(|k| k.state.layout == Layout::Main));
    }

    #[test]
    fn timeline_is_cumulative() {
        let (_, board) = storyboard(Quality::Full);
        let (start, last) = board.timeline().last().unwrap();

        check!((start + last.run_time - board.duration()).abs() < 1e-9);
        check!(board.duration() > storyboard(Quality::Testing).1.duration());
    }
}
