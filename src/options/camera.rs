use serde::{Deserialize, Serialize};

/// How the camera orientation is chosen.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FramingMode {
    /// Principal axes only; the axis signs are whatever the decomposition
    /// returns.
    PrincipalAxes,
    /// Principal axes with sign flips anchored on the first residue.
    #[default]
    FirstResidue,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Camera projection and framing parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Orientation strategy.
    pub framing: FramingMode,
    /// Extra margin added to the framed radius, in angstroms.
    pub radius_padding: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 45.0,
            framing: FramingMode::FirstResidue,
            radius_padding: 2.0,
        }
    }
}
