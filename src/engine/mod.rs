//! The rendering engine seam.
//!
//! The orchestrator talks to a [`RenderEngine`]: it adds one layer per
//! planned [`RepresentationLayer`], sets the camera, rasterizes, and clears
//! the surface again. [`SplatEngine`] is the bundled CPU implementation.

mod geometry;
mod splat;

use std::fmt;

pub use geometry::{build_primitives, Sphere};
pub use splat::SplatEngine;

use crate::camera::CameraFrame;
use crate::plan::{RepresentationLayer, SizeClass};

/// Rendering engine failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A layer could not be turned into geometry.
    InvalidLayer(String),
    /// Rasterization was requested before a camera was set.
    NoCamera,
    /// Zero-sized output requested.
    EmptyViewport {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// Pixel readback failed.
    Readback(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLayer(msg) => write!(f, "invalid layer: {msg}"),
            Self::NoCamera => write!(f, "no camera set"),
            Self::EmptyViewport { width, height } => {
                write!(f, "empty viewport {width}x{height}")
            }
            Self::Readback(msg) => write!(f, "readback failed: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {}

/// Screen-space effects applied after rasterization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PostProcessing {
    /// Darken creases by screen-space ambient occlusion.
    pub ambient_occlusion: bool,
    /// Darken silhouettes and depth discontinuities.
    pub outline: bool,
}

impl PostProcessing {
    /// Both effects for big structures, none otherwise.
    #[must_use]
    pub fn for_size_class(size_class: SizeClass) -> Self {
        let big = size_class == SizeClass::Big;
        Self {
            ambient_occlusion: big,
            outline: big,
        }
    }
}

/// Output size and effects for one rasterization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterRequest {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Post-processing to apply.
    pub post: PostProcessing,
}

/// Straight-alpha RGBA8 pixels, row-major from the top-left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height * 4` bytes.
    pub rgba: Vec<u8>,
}

impl RenderedImage {
    /// RGBA of one pixel.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        self.rgba.get(i..i + 4).and_then(|p| p.try_into().ok())
    }
}

/// A drawing surface the orchestrator drives one target at a time.
pub trait RenderEngine {
    /// Build and add one layer.
    fn add_layer(&mut self, layer: &RepresentationLayer) -> Result<(), EngineError>;

    /// Replace the camera.
    fn set_camera(&mut self, frame: &CameraFrame);

    /// Draw every layer and read the pixels back.
    fn rasterize(&mut self, request: &RasterRequest) -> Result<RenderedImage, EngineError>;

    /// Remove every layer and the camera.
    fn clear(&mut self);

    /// Number of layers currently on the surface.
    fn layer_count(&self) -> usize;
}
