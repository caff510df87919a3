//! The seam to the animation engine. The engine implements [`Renderer`];
//! [`render_storyboard`] translates every keyframe into draw calls.

use nalgebra::Vector3;

use crate::scene::{CameraOrientation, Color, Layout, SceneState};
use crate::storyboard::Storyboard;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowStyle {
    pub color: Color,
    pub thickness: f64,
    pub tip_height: f64,
    pub base_radius: f64,
}

pub const MAGNETIZATION_ARROW: ArrowStyle = ArrowStyle {
    color: Color::Yellow,
    thickness: 0.06,
    tip_height: 0.25,
    base_radius: 0.06,
};

pub const RF_ARROW: ArrowStyle = ArrowStyle {
    color: Color::Green,
    thickness: 0.04,
    tip_height: 0.2,
    base_radius: 0.04,
};

pub const B0_ARROW: ArrowStyle = ArrowStyle {
    color: Color::Blue,
    thickness: 0.05,
    tip_height: 0.3,
    base_radius: 0.05,
};

pub const AXIS: ArrowStyle = ArrowStyle {
    color: Color::White,
    thickness: 0.02,
    tip_height: 0.1,
    base_radius: 0.02,
};

/// Start and end of the x, y and z axis.
const AXES: [([f64; 3], [f64; 3]); 3] = [
    ([-1.5, 0.0, 0.0], [1.5, 0.0, 0.0]),
    ([0.0, -1.5, 0.0], [0.0, 1.5, 0.0]),
    ([0.0, 0.0, -0.5], [0.0, 0.0, 1.5]),
];
const B0_LENGTH: f64 = 1.6;
/// Tip of the RF field arrow, along +x.
const RF_END: [f64; 3] = [1.0, 0.0, 0.0];

/// Placement and text of everything a [`Layout`] fixes.
struct LayoutSpec {
    /// Foot of the B0 arrow, away from the origin so it doesn't hide the
    /// magnetization.
    b0_origin: [f64; 3],
    b0_label: [f64; 3],
    b0_font_size: u32,
    title: &'static str,
    title_font_size: u32,
    equation: &'static str,
    equation_font_size: u32,
    magnetization: ArrowStyle,
    status_font_size: u32,
    readout_font_size: u32,
    /// Read-out lines shown, counted from Mx.
    readout_rows: usize,
}

const MAIN_LAYOUT: LayoutSpec = LayoutSpec {
    b0_origin: [3.0, 3.0, -0.3],
    b0_label: [3.5, 3.5, 1.0],
    b0_font_size: 22,
    title: "Bloch Equations in MRI",
    title_font_size: 34,
    equation: r"\frac{d\vec{M}}{dt} = \gamma\,(\vec{M}\times\vec{B}) - \frac{\vec{M}_{\perp}}{T_2} - \frac{(M_z - M_0)}{T_1}\,\hat{\mathbf z}",
    equation_font_size: 22,
    magnetization: MAGNETIZATION_ARROW,
    status_font_size: 20,
    readout_font_size: 18,
    readout_rows: 4,
};

const POSITION_CHECK_LAYOUT: LayoutSpec = LayoutSpec {
    b0_origin: [-2.5, 2.5, -0.3],
    b0_label: [-2.0, 3.0, 1.0],
    b0_font_size: 26,
    title: "POSITION CHECK - Improved Bloch Equations",
    title_font_size: 30,
    equation: r"\frac{dM}{dt} = \gamma(\vec{M} \times \vec{B}) - \frac{M_{\perp}}{T_2} - \frac{M_z - M_0}{T_1}",
    equation_font_size: 18,
    magnetization: ArrowStyle {
        color: Color::Red,
        ..MAGNETIZATION_ARROW
    },
    status_font_size: 18,
    readout_font_size: 16,
    readout_rows: 3,
};

fn layout_spec(layout: Layout) -> &'static LayoutSpec {
    match layout {
        Layout::Main => &MAIN_LAYOUT,
        Layout::PositionCheck => &POSITION_CHECK_LAYOUT,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenEdge {
    Top,
    Bottom,
    Left,
    Right,
}

/// Labels either live in the 3D scene or are fixed to the camera frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    World(Vector3<f64>),
    /// `row` counts lines downwards from the first label at this edge.
    Screen { edge: ScreenEdge, row: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub color: Color,
    pub font_size: u32,
    pub placement: Placement,
}

/// A world label that is repositioned every frame relative to an anchor
/// point, e.g. the tip of the magnetization arrow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowLabel {
    pub text: &'static str,
    pub color: Color,
    pub font_size: u32,
    pub offset: Vector3<f64>,
}

pub const MAGNETIZATION_LABEL: FollowLabel = FollowLabel {
    text: "M",
    color: Color::Yellow,
    font_size: 22,
    offset: Vector3::new(0.1, 0.1, 0.0),
};

impl FollowLabel {
    pub fn place(&self, anchor: &Vector3<f64>) -> Label {
        Label {
            text: self.text.to_owned(),
            color: self.color,
            font_size: self.font_size,
            placement: Placement::World(anchor + self.offset),
        }
    }
}

/// Drawing primitives supplied by the animation engine.
pub trait Renderer {
    fn set_camera(&mut self, camera: &CameraOrientation);

    /// Directed segment from `start` to `end`.
    fn draw_vector(&mut self, start: &Vector3<f64>, end: &Vector3<f64>, style: &ArrowStyle);

    fn show_label(&mut self, label: &Label);

    /// Everything since the previous call makes up one keyframe, reached
    /// after `run_time` seconds.
    fn end_frame(&mut self, run_time: f64);
}

/// Point that dependent labels follow in this frame, if any.
pub fn anchor(state: &SceneState) -> Option<Vector3<f64>> {
    state.magnetization
}

pub fn render_state<R: Renderer>(state: &SceneState, renderer: &mut R) {
    let layout = layout_spec(state.layout);
    renderer.set_camera(&state.camera);

    if state.decorations {
        draw_decorations(layout, renderer);
    }

    if let Some(m) = &state.magnetization {
        renderer.draw_vector(&Vector3::zeros(), m, &layout.magnetization);
    }
    if let Some(anchor) = anchor(state) {
        renderer.show_label(&MAGNETIZATION_LABEL.place(&anchor));
    }

    if state.rf_field {
        renderer.draw_vector(&Vector3::zeros(), &Vector3::from(RF_END), &RF_ARROW);
    }

    if let Some(status) = &state.status {
        renderer.show_label(&Label {
            text: status.text().to_owned(),
            color: status.color(),
            font_size: layout.status_font_size,
            placement: Placement::Screen {
                edge: ScreenEdge::Left,
                row: 0,
            },
        });
    }

    if let Some(readout) = &state.readout {
        let lines = readout.lines().into_iter().take(layout.readout_rows);
        for (row, (text, color)) in lines.enumerate() {
            renderer.show_label(&Label {
                text,
                color,
                font_size: layout.readout_font_size,
                placement: Placement::Screen {
                    edge: ScreenEdge::Right,
                    row,
                },
            });
        }
    }
}

pub fn render_storyboard<R: Renderer>(storyboard: &Storyboard, renderer: &mut R) {
    for keyframe in storyboard.keyframes() {
        render_state(&keyframe.state, renderer);
        renderer.end_frame(keyframe.run_time);
    }
}

fn draw_decorations<R: Renderer>(layout: &LayoutSpec, renderer: &mut R) {
    for (start, end) in AXES {
        renderer.draw_vector(&Vector3::from(start), &Vector3::from(end), &AXIS);
    }

    let b0_start = Vector3::from(layout.b0_origin);
    let b0_end = b0_start + Vector3::z() * B0_LENGTH;
    renderer.draw_vector(&b0_start, &b0_end, &B0_ARROW);

    let axis_labels = [
        ("Mx", Color::Red, Vector3::new(3.3, 0.0, 0.0)),
        ("My", Color::Green, Vector3::new(0.0, 3.3, 0.0)),
        ("Mz", Color::Blue, Vector3::new(0.0, 0.0, 2.3)),
    ];
    for (text, color, position) in axis_labels {
        renderer.show_label(&Label {
            text: text.to_owned(),
            color,
            font_size: 22,
            placement: Placement::World(position),
        });
    }
    renderer.show_label(&Label {
        text: "B₀".to_owned(),
        color: Color::Blue,
        font_size: layout.b0_font_size,
        placement: Placement::World(Vector3::from(layout.b0_label)),
    });

    renderer.show_label(&Label {
        text: layout.title.to_owned(),
        color: Color::White,
        font_size: layout.title_font_size,
        placement: Placement::Screen {
            edge: ScreenEdge::Top,
            row: 0,
        },
    });
    renderer.show_label(&Label {
        text: layout.equation.to_owned(),
        color: Color::White,
        font_size: layout.equation_font_size,
        placement: Placement::Screen {
            edge: ScreenEdge::Bottom,
            row: 0,
        },
    });
}

/// Every call a [`Renderer`] receives, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Camera(CameraOrientation),
    Vector {
        start: Vector3<f64>,
        end: Vector3<f64>,
        style: ArrowStyle,
    },
    Label(Label),
    EndFrame {
        run_time: f64,
    },
}

/// Renderer that only records what it was asked to draw.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    pub commands: Vec<DrawCommand>,
}

impl Renderer for RecordingRenderer {
    fn set_camera(&mut self, camera: &CameraOrientation) {
        self.commands.push(DrawCommand::Camera(*camera));
    }

    fn draw_vector(&mut self, start: &Vector3<f64>, end: &Vector3<f64>, style: &ArrowStyle) {
        self.commands.push(DrawCommand::Vector {
            start: *start,
            end: *end,
            style: *style,
        });
    }

    fn show_label(&mut self, label: &Label) {
        self.commands.push(DrawCommand::Label(label.clone()));
    }

    fn end_frame(&mut self, run_time: f64) {
        self.commands.push(DrawCommand::EndFrame { run_time });
    }
}

impl RecordingRenderer {
    /// Commands split at every `EndFrame`, without the `EndFrame` itself.
    pub fn frames(&self) -> impl Iterator<Item = &[DrawCommand]> + '_ {
        self.commands
            .split(|c| matches!(c, DrawCommand::EndFrame { .. }))
            .filter(|frame| !frame.is_empty())
    }
}
