mod scalar_types;
mod vector_types;

pub use scalar_types::*;
pub use vector_types::*;

use serde::Deserialize;

/// Selects how a trajectory moves between its start and end vector.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    /// Straight line from start to end, see `LinearInterpolation`
    #[default]
    Linear,
    /// Per-component T1 / T2 relaxation, see `ExponentialRelaxation`
    Exponential,
}
