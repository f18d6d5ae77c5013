use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Headlight shading parameters.
pub struct LightingOptions {
    /// Ambient term.
    pub ambient: f32,
    /// Lambertian term.
    pub diffuse: f32,
    /// Light direction in view space, pointing from the light.
    pub direction: [f32; 3],
    /// Depth cueing strength toward the background color (0 = off).
    pub fog: f32,
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            ambient: 0.35,
            diffuse: 0.65,
            direction: [-0.3, -0.4, -1.0],
            fog: 0.25,
        }
    }
}
