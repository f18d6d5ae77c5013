//! CPU sphere-splatting rasterizer.
//!
//! Spheres are splatted as screen-space discs with a per-pixel depth test
//! and headlight shading. Outline and ambient occlusion run on the depth
//! buffer afterwards.

use glam::{Mat4, Vec3};
use log::debug;

use super::geometry::{build_primitives, Sphere};
use super::{EngineError, RasterRequest, RenderEngine, RenderedImage};
use crate::camera::core::Camera;
use crate::camera::CameraFrame;
use crate::options::{
    ColorOptions, GeometryOptions, LightingOptions, Options, PostProcessingOptions,
};
use crate::plan::RepresentationLayer;

/// Offsets of the occlusion sample ring (unit circle, 8 directions).
const AO_DIRECTIONS: [(f32, f32); 8] = [
    (1.0, 0.0),
    (0.707, 0.707),
    (0.0, 1.0),
    (-0.707, 0.707),
    (-1.0, 0.0),
    (-0.707, -0.707),
    (0.0, -1.0),
    (0.707, -0.707),
];

/// Per-pixel buffers of one rasterization.
struct Frame {
    width: usize,
    height: usize,
    depth: Vec<f32>,
    color: Vec<[f32; 3]>,
}

impl Frame {
    fn new(width: u32, height: u32) -> Self {
        let n = width as usize * height as usize;
        Self {
            width: width as usize,
            height: height as usize,
            depth: vec![f32::INFINITY; n],
            color: vec![[0.0; 3]; n],
        }
    }

    fn covered(&self, i: usize) -> bool {
        self.depth[i].is_finite()
    }

    fn depth_at(&self, x: isize, y: isize) -> f32 {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return f32::INFINITY;
        }
        self.depth[y as usize * self.width + x as usize]
    }
}

/// Software [`RenderEngine`] drawing every representation as spheres.
#[derive(Debug, Clone)]
pub struct SplatEngine {
    geometry: GeometryOptions,
    colors: ColorOptions,
    lighting: LightingOptions,
    post: PostProcessingOptions,
    layers: Vec<Vec<Sphere>>,
    camera: Option<CameraFrame>,
}

impl SplatEngine {
    /// Engine using the geometry, color, lighting and post-processing
    /// sections of `options`.
    #[must_use]
    pub fn new(options: &Options) -> Self {
        Self {
            geometry: options.geometry.clone(),
            colors: options.colors.clone(),
            lighting: options.lighting.clone(),
            post: options.post_processing.clone(),
            layers: Vec::new(),
            camera: None,
        }
    }

    fn shade(&self, base: [f32; 3], normal: Vec3, fog_t: f32) -> [f32; 3] {
        let light = -Vec3::from(self.lighting.direction).normalize_or_zero();
        let lambert = normal.dot(light).max(0.0);
        let k = self.lighting.ambient + self.lighting.diffuse * lambert;
        let bg = self.colors.background;
        let fog = (self.lighting.fog * fog_t).clamp(0.0, 1.0);
        [0, 1, 2].map(|c| {
            let lit = (base[c] * k).min(1.0);
            lit + (bg[c] - lit) * fog
        })
    }

    fn splat(&self, frame: &mut Frame, camera: &Camera, vp: &Mat4, fog: (f32, f32), sphere: &Sphere) {
        let (near, span) = fog;
        let Some((cx, cy, depth)) =
            camera.project(vp, sphere.center, frame.width as u32, frame.height as u32)
        else {
            return;
        };
        let r = sphere.radius * camera.pixels_per_unit(depth, frame.height as u32);
        if r <= 0.0 || !r.is_finite() {
            return;
        }
        let x0 = (cx - r).floor().max(0.0) as usize;
        let y0 = (cy - r).floor().max(0.0) as usize;
        let x1 = ((cx + r).ceil().max(0.0) as usize).min(frame.width);
        let y1 = ((cy + r).ceil().max(0.0) as usize).min(frame.height);

        for y in y0..y1 {
            for x in x0..x1 {
                let dx = (x as f32 + 0.5 - cx) / r;
                let dy = (y as f32 + 0.5 - cy) / r;
                let d2 = dx * dx + dy * dy;
                if d2 > 1.0 {
                    continue;
                }
                let nz = (1.0 - d2).sqrt();
                let z = depth - nz * sphere.radius;
                let i = y * frame.width + x;
                if z >= frame.depth[i] {
                    continue;
                }
                frame.depth[i] = z;
                let fog_t = ((z - near) / span).clamp(0.0, 1.0);
                frame.color[i] = self.shade(sphere.color, Vec3::new(dx, -dy, nz), fog_t);
            }
        }
    }

    /// Darken pixels whose neighbours are background or much further away.
    fn outline(&self, frame: &mut Frame) {
        let factor = 1.0 - self.post.outline_strength.clamp(0.0, 1.0);
        let mut edges = Vec::new();
        for y in 0..frame.height {
            for x in 0..frame.width {
                let i = y * frame.width + x;
                if !frame.covered(i) {
                    continue;
                }
                let d = frame.depth[i];
                let (xi, yi) = (x as isize, y as isize);
                let edge = [(1, 0), (-1, 0), (0, 1), (0, -1)]
                    .iter()
                    .any(|&(ox, oy)| frame.depth_at(xi + ox, yi + oy) - d > self.post.outline_threshold);
                if edge {
                    edges.push(i);
                }
            }
        }
        for i in edges {
            frame.color[i] = frame.color[i].map(|c| c * factor);
        }
    }

    /// Screen-space occlusion from a ring of depth samples.
    fn ambient_occlusion(&self, frame: &mut Frame) {
        let radius = self.post.ao_radius.max(1) as f32;
        let scale = self.post.ao_depth_scale.max(f32::EPSILON);
        let mut shade = vec![1.0f32; frame.depth.len()];
        for y in 0..frame.height {
            for x in 0..frame.width {
                let i = y * frame.width + x;
                if !frame.covered(i) {
                    continue;
                }
                let d = frame.depth[i];
                let occlusion: f32 = AO_DIRECTIONS
                    .iter()
                    .map(|&(ox, oy)| {
                        let sx = x as isize + (ox * radius).round() as isize;
                        let sy = y as isize + (oy * radius).round() as isize;
                        let nd = frame.depth_at(sx, sy);
                        if nd.is_finite() {
                            ((d - nd) / scale).clamp(0.0, 1.0)
                        } else {
                            0.0
                        }
                    })
                    .sum();
                shade[i] = 1.0 - self.post.ao_strength * occlusion / AO_DIRECTIONS.len() as f32;
            }
        }
        for (c, s) in frame.color.iter_mut().zip(shade) {
            *c = c.map(|v| v * s);
        }
    }

    fn to_image(&self, frame: &Frame) -> RenderedImage {
        let bg = self.colors.background;
        let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        let mut rgba = Vec::with_capacity(frame.depth.len() * 4);
        for (i, c) in frame.color.iter().enumerate() {
            if frame.covered(i) {
                rgba.extend_from_slice(&[to_u8(c[0]), to_u8(c[1]), to_u8(c[2]), 255]);
            } else {
                rgba.extend_from_slice(&[to_u8(bg[0]), to_u8(bg[1]), to_u8(bg[2]), to_u8(bg[3])]);
            }
        }
        RenderedImage {
            width: frame.width as u32,
            height: frame.height as u32,
            rgba,
        }
    }
}

impl RenderEngine for SplatEngine {
    fn add_layer(&mut self, layer: &RepresentationLayer) -> Result<(), EngineError> {
        let spheres = build_primitives(layer, &self.geometry, &self.colors)?;
        debug!("{:?} layer: {} spheres", layer.kind, spheres.len());
        self.layers.push(spheres);
        Ok(())
    }

    fn set_camera(&mut self, frame: &CameraFrame) {
        self.camera = Some(*frame);
    }

    fn rasterize(&mut self, request: &RasterRequest) -> Result<RenderedImage, EngineError> {
        let frame_pose = self.camera.ok_or(EngineError::NoCamera)?;
        if request.width == 0 || request.height == 0 {
            return Err(EngineError::EmptyViewport {
                width: request.width,
                height: request.height,
            });
        }
        let camera = Camera::from_frame(&frame_pose, request.width as f32 / request.height as f32);
        let near = frame_pose.distance() - frame_pose.radius_max;
        let span = (2.0 * frame_pose.radius_max).max(f32::EPSILON);

        let vp = camera.build_matrix();
        let mut frame = Frame::new(request.width, request.height);
        for sphere in self.layers.iter().flatten() {
            self.splat(&mut frame, &camera, &vp, (near, span), sphere);
        }
        if request.post.ambient_occlusion {
            self.ambient_occlusion(&mut frame);
        }
        if request.post.outline {
            self.outline(&mut frame);
        }
        Ok(self.to_image(&frame))
    }

    fn clear(&mut self) {
        self.layers.clear();
        self.camera = None;
    }

    fn layer_count(&self) -> usize {
        self.layers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::frame;
    use crate::engine::PostProcessing;
    use crate::plan::{plan, PlanOptions, SizeClass, TargetKind};
    use crate::testing::ModelBuilder;

    fn request(post: PostProcessing) -> RasterRequest {
        RasterRequest {
            width: 64,
            height: 48,
            post,
        }
    }

    fn prepared(engine: &mut SplatEngine, size: SizeClass) {
        let s = ModelBuilder::default().protein("A", "1", 20, Vec3::ZERO).structure();
        let p = plan(TargetKind::Model, &s, size, &PlanOptions::default());
        for layer in &p.layers {
            engine.add_layer(layer).unwrap();
        }
        let options = Options::default();
        engine.set_camera(&frame(&p.focus, &s, &options.camera).unwrap());
    }

    #[test]
    fn draws_opaque_pixels_on_transparent_background() {
        let mut engine = SplatEngine::new(&Options::default());
        prepared(&mut engine, SizeClass::Medium);
        let image = engine.rasterize(&request(PostProcessing::default())).unwrap();
        assert_eq!(image.rgba.len(), 64 * 48 * 4);
        assert!(image.rgba.chunks(4).any(|p| p[3] == 255));
        // Corners stay transparent background.
        assert_eq!(image.pixel(0, 0).unwrap()[3], 0);
    }

    #[test]
    fn post_processing_only_darkens() {
        let mut engine = SplatEngine::new(&Options::default());
        prepared(&mut engine, SizeClass::Big);
        let plain = engine.rasterize(&request(PostProcessing::default())).unwrap();
        let post = engine
            .rasterize(&request(PostProcessing::for_size_class(SizeClass::Big)))
            .unwrap();
        assert!(plain
            .rgba
            .chunks(4)
            .zip(post.rgba.chunks(4))
            .all(|(a, b)| b[0] <= a[0] && b[1] <= a[1] && b[2] <= a[2]));
        assert_ne!(plain, post);
    }

    #[test]
    fn clear_resets_layers_and_camera() {
        let mut engine = SplatEngine::new(&Options::default());
        prepared(&mut engine, SizeClass::Medium);
        assert!(engine.layer_count() > 0);
        engine.clear();
        assert_eq!(engine.layer_count(), 0);
        assert_eq!(
            engine.rasterize(&request(PostProcessing::default())),
            Err(EngineError::NoCamera)
        );
    }

    #[test]
    fn zero_sized_viewport_is_an_error() {
        let mut engine = SplatEngine::new(&Options::default());
        prepared(&mut engine, SizeClass::Medium);
        let err = engine
            .rasterize(&RasterRequest {
                width: 0,
                height: 10,
                post: PostProcessing::default(),
            })
            .unwrap_err();
        assert_eq!(err, EngineError::EmptyViewport { width: 0, height: 10 });
    }
}
