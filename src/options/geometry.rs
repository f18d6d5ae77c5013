use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Geometry sizes for the representation layers.
pub struct GeometryOptions {
    /// Radius added to van der Waals radii for surface layers.
    pub surface_radius_offset: f32,
    /// Cartoon tube radius in angstroms.
    pub cartoon_radius: f32,
    /// Scale applied to van der Waals radii for ball-and-stick atoms.
    pub ball_scale: f32,
    /// Bond radius for ball-and-stick layers.
    pub bond_radius: f32,
    /// Carbohydrate glyph radius.
    pub carbohydrate_radius: f32,
}

impl Default for GeometryOptions {
    fn default() -> Self {
        Self {
            surface_radius_offset: 1.4,
            cartoon_radius: 1.0,
            ball_scale: 0.3,
            bond_radius: 0.15,
            carbohydrate_radius: 1.8,
        }
    }
}
