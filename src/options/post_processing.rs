use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Strengths of the post-processing effects reserved for big structures.
pub struct PostProcessingOptions {
    /// Darkening applied at depth discontinuities (0 = off, 1 = black).
    pub outline_strength: f32,
    /// Depth jump in angstroms that counts as an edge.
    pub outline_threshold: f32,
    /// Maximum occlusion darkening.
    pub ao_strength: f32,
    /// Occlusion sampling radius in pixels.
    pub ao_radius: u32,
    /// Depth difference in angstroms at which a neighbour fully occludes.
    pub ao_depth_scale: f32,
}

impl Default for PostProcessingOptions {
    fn default() -> Self {
        Self {
            outline_strength: 0.7,
            outline_threshold: 3.0,
            ao_strength: 0.6,
            ao_radius: 6,
            ao_depth_scale: 6.0,
        }
    }
}
