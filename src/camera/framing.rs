//! Canonical camera framing from a focus structure.
//!
//! The view direction and up vector come from the principal axes of the
//! focus atoms; the zoom comes from the bounding sphere of the full target
//! so nothing is clipped even when the focus is a small subset.

use std::fmt;

use glam::Vec3;
use log::debug;
use serde::{Deserialize, Serialize};

use super::axes::PrincipalAxes;
use crate::options::{CameraOptions, FramingMode};
use crate::structure::Structure;

/// Distance of the seed eye position from the centroid.
pub const SEED_DISTANCE: f32 = 100.0;
/// Smallest framed radius, keeps single-atom targets visible.
pub const MIN_RADIUS: f32 = 1.0;

/// Camera framing failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FramingError {
    /// The focus structure has no atoms.
    EmptyFocus,
}

impl fmt::Display for FramingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyFocus => write!(f, "focus structure has no atoms"),
        }
    }
}

impl std::error::Error for FramingError {}

/// Which sign flip canonical framing applied to the principal axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Flip {
    /// Axes kept as computed.
    None,
    /// Minor axis negated.
    AroundY,
    /// Major and minor axes negated.
    AroundX,
}

/// A complete camera pose for one target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraFrame {
    /// Eye position.
    pub position: Vec3,
    /// Look-at point (focus centroid).
    pub target: Vec3,
    /// Up direction (major axis).
    pub up: Vec3,
    /// Orientation basis: major, middle, minor.
    pub basis: [Vec3; 3],
    /// Bounding radius of the full target structure.
    pub radius: f32,
    /// Radius the camera distance is fitted to.
    pub radius_max: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Flip applied during canonical framing.
    pub flip: Flip,
}

impl CameraFrame {
    /// Distance from eye to target.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }
}

/// Signed distance from `point` to the plane through `origin` with the
/// given unit `normal`.
#[must_use]
pub fn signed_plane_distance(point: Vec3, origin: Vec3, normal: Vec3) -> f32 {
    // Plane A x + B y + C z + D = 0 with (A, B, C) = normal.
    let d = -normal.dot(origin);
    (normal.dot(point) + d) / normal.length()
}

/// Point canonical framing anchors the orientation on: the first atom of a
/// single-unit focus, otherwise the centroid of the first unit's polymer
/// atoms (all of its atoms when it has none).
#[must_use]
pub fn reference_point(focus: &Structure) -> Option<Vec3> {
    let first = focus.units().first()?;
    if focus.unit_count() == 1 {
        return first.atoms().first().map(|a| a.position);
    }
    let atoms = first.atoms();
    let polymer: Vec<Vec3> = if first.is_polymer() {
        atoms.iter().map(|a| a.position).collect()
    } else {
        Vec::new()
    };
    let points = if polymer.is_empty() {
        atoms.iter().map(|a| a.position).collect()
    } else {
        polymer
    };
    if points.is_empty() {
        return None;
    }
    Some(points.iter().copied().sum::<Vec3>() / points.len() as f32)
}

/// Resolve the sign ambiguity of `axes` against `reference`. The minor
/// check runs first and excludes the major check.
#[must_use]
pub fn canonical_basis(axes: PrincipalAxes, reference: Vec3) -> (PrincipalAxes, Flip) {
    let mut out = axes;
    if signed_plane_distance(reference, axes.centroid, axes.minor) < 0.0 {
        out.minor = -axes.minor;
        (out, Flip::AroundY)
    } else if signed_plane_distance(reference, axes.centroid, axes.major) < 0.0 {
        out.major = -axes.major;
        out.minor = -axes.minor;
        (out, Flip::AroundX)
    } else {
        (out, Flip::None)
    }
}

/// Frame `focus` along its principal axes, zoomed to fit `full`.
pub fn frame(
    focus: &Structure,
    full: &Structure,
    options: &CameraOptions,
) -> Result<CameraFrame, FramingError> {
    let axes = PrincipalAxes::from_positions(&focus.positions())
        .ok_or(FramingError::EmptyFocus)?;
    Ok(look_along(axes, Flip::None, focus, full, options))
}

/// [`frame`] with the axis signs fixed by the reference point, so equal
/// structures always render from the same side.
pub fn frame_canonical(
    focus: &Structure,
    full: &Structure,
    options: &CameraOptions,
) -> Result<CameraFrame, FramingError> {
    let axes = PrincipalAxes::from_positions(&focus.positions())
        .ok_or(FramingError::EmptyFocus)?;
    let (axes, flip) = match reference_point(focus) {
        Some(reference) => canonical_basis(axes, reference),
        None => (axes, Flip::None),
    };
    Ok(look_along(axes, flip, focus, full, options))
}

/// Frame with the strategy selected in `options`.
pub fn frame_with_mode(
    focus: &Structure,
    full: &Structure,
    options: &CameraOptions,
) -> Result<CameraFrame, FramingError> {
    match options.framing {
        FramingMode::PrincipalAxes => frame(focus, full, options),
        FramingMode::FirstResidue => frame_canonical(focus, full, options),
    }
}

fn look_along(
    axes: PrincipalAxes,
    flip: Flip,
    focus: &Structure,
    full: &Structure,
    options: &CameraOptions,
) -> CameraFrame {
    let centroid = axes.centroid;
    let seed = centroid + axes.minor * SEED_DISTANCE;
    let direction = (centroid - seed).normalize_or_zero();

    let sphere = full.bounding_sphere().or_else(|| focus.bounding_sphere());
    let (radius, offset) = sphere.map_or((0.0, 0.0), |s| (s.radius, s.center.distance(centroid)));
    let radius_max = (radius + offset + options.radius_padding).max(MIN_RADIUS);

    let half_fovy = (options.fovy.to_radians() / 2.0).max(f32::EPSILON);
    let distance = radius_max / half_fovy.sin();

    debug!(
        "framed centroid {centroid:?} radius {radius:.2} radius_max {radius_max:.2} flip {flip:?}"
    );
    CameraFrame {
        position: centroid - direction * distance,
        target: centroid,
        up: axes.major,
        basis: [axes.major, axes.middle, axes.minor],
        radius,
        radius_max,
        fovy: options.fovy,
        flip,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::plan::{plan, PlanOptions, SizeClass, TargetKind};
    use crate::structure::query;
    use crate::testing::ModelBuilder;

    fn options() -> CameraOptions {
        CameraOptions::default()
    }

    fn two_chains(mirror: bool) -> Structure {
        let builder = ModelBuilder::default()
            .protein("A", "1", 20, Vec3::new(0.0, 0.0, 4.0))
            .protein("B", "1", 30, Vec3::new(3.0, -8.0, -2.0));
        if mirror {
            builder.mirrored().structure()
        } else {
            builder.structure()
        }
    }

    #[test]
    fn canonical_frame_is_bit_identical_across_runs() {
        let s = two_chains(false);
        let a = frame_canonical(&s, &s, &options()).unwrap();
        let b = frame_canonical(&s, &s, &options()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.basis, b.basis);
    }

    #[test]
    fn mirror_image_takes_the_complementary_flip() {
        let original = two_chains(false);
        let mirrored = two_chains(true);
        let a = frame_canonical(&original, &original, &options()).unwrap();
        let b = frame_canonical(&mirrored, &mirrored, &options()).unwrap();
        assert!(
            (a.flip == Flip::AroundY) != (b.flip == Flip::AroundY),
            "{:?} vs {:?}",
            a.flip,
            b.flip
        );
    }

    /// Flip the canonical rule picks for `reference` against raw `axes`.
    fn expected_flip(axes: &PrincipalAxes, reference: Vec3) -> Flip {
        if signed_plane_distance(reference, axes.centroid, axes.minor) < 0.0 {
            Flip::AroundY
        } else if signed_plane_distance(reference, axes.centroid, axes.major) < 0.0 {
            Flip::AroundX
        } else {
            Flip::None
        }
    }

    #[test]
    fn mirrored_single_chain_takes_the_exact_complementary_flip() {
        let original = ModelBuilder::default()
            .protein("A", "1", 20, Vec3::ZERO)
            .structure();
        let mirrored = ModelBuilder::default()
            .protein("A", "1", 20, Vec3::ZERO)
            .mirrored()
            .structure();

        let axes = PrincipalAxes::from_positions(&original.positions()).unwrap();
        let mirrored_axes = PrincipalAxes::from_positions(&mirrored.positions()).unwrap();
        assert_eq!(axes.major, mirrored_axes.major);
        assert_eq!(axes.minor, mirrored_axes.minor);

        let reference = reference_point(&original).unwrap();
        assert_eq!(reference_point(&mirrored), Some(-reference));

        let a = frame_canonical(&original, &original, &options()).unwrap();
        let b = frame_canonical(&mirrored, &mirrored, &options()).unwrap();
        assert_eq!(a.flip, expected_flip(&axes, reference));
        assert_eq!(b.flip, expected_flip(&mirrored_axes, -reference));
        match a.flip {
            Flip::AroundY => assert_ne!(b.flip, Flip::AroundY),
            Flip::None | Flip::AroundX => assert_eq!(b.flip, Flip::AroundY),
        }
    }

    #[test]
    fn single_unit_reference_is_its_first_atom() {
        let s = ModelBuilder::default()
            .protein("A", "1", 5, Vec3::new(1.0, 2.0, 3.0))
            .structure();
        let first = s.units()[0].atoms()[0].position;
        assert_eq!(first, Vec3::new(1.0, 2.0, 4.0));
        assert_eq!(reference_point(&s), Some(first));
        assert_eq!(reference_point(&Structure::default()), None);
    }

    #[test]
    fn multi_unit_reference_without_polymer_uses_all_atoms_of_first_unit() {
        let s = ModelBuilder::default()
            .ligand("L", "1", "HEM", Vec3::splat(7.0))
            .protein("A", "2", 5, Vec3::ZERO)
            .structure();
        assert!(!s.units()[0].is_polymer());
        assert_eq!(reference_point(&s), Some(Vec3::splat(7.0)));
    }

    #[test]
    fn multi_unit_reference_is_first_polymer_unit_centroid() {
        let s = ModelBuilder::default()
            .protein("A", "1", 4, Vec3::ZERO)
            .ligand("L", "2", "HEM", Vec3::splat(7.0))
            .structure();
        let atoms = s.units()[0].atoms();
        let centroid = atoms.iter().map(|a| a.position).sum::<Vec3>() / atoms.len() as f32;
        assert_eq!(reference_point(&s), Some(centroid));
    }

    #[test]
    fn planned_focus_anchors_on_the_first_chain_not_a_ligand() {
        let s = ModelBuilder::default()
            .protein("A", "1", 30, Vec3::ZERO)
            .ligand("B", "2", "HEM", Vec3::splat(40.0))
            .structure();
        let p = plan(TargetKind::Model, &s, SizeClass::Medium, &PlanOptions::default());
        assert_eq!(p.focus.units()[0].chain_id, "A");

        let trace = query::backbone_trace(&query::chain(&s, "A", None));
        let expected = trace.positions().iter().copied().sum::<Vec3>() / trace.atom_count() as f32;
        let reference = reference_point(&p.focus).unwrap();
        assert!(reference.distance(expected) < 1e-4, "{reference:?} vs {expected:?}");

        let f = frame_canonical(&p.focus, &s, &options()).unwrap();
        let axes = PrincipalAxes::from_positions(&p.focus.positions()).unwrap();
        assert_eq!(f.flip, expected_flip(&axes, expected));
    }

    #[test]
    fn camera_looks_down_minor_axis_with_major_up() {
        let s = two_chains(false);
        let f = frame(&s, &s, &options()).unwrap();
        assert_eq!(f.flip, Flip::None);
        let view = (f.target - f.position).normalize();
        assert_relative_eq!(view.dot(f.basis[2]), -1.0, epsilon = 1e-5);
        assert_eq!(f.up, f.basis[0]);
        let expected = f.radius_max / (f.fovy.to_radians() / 2.0).sin();
        assert_relative_eq!(f.distance(), expected, epsilon = 1e-3);
    }

    #[test]
    fn radius_comes_from_full_structure() {
        let full = two_chains(false);
        let focus = query::chain(&full, "A", None);
        let f = frame(&focus, &full, &options()).unwrap();
        let sphere = full.bounding_sphere().unwrap();
        assert_relative_eq!(f.radius, sphere.radius);
        let centroid = PrincipalAxes::from_positions(&focus.positions()).unwrap().centroid;
        assert_relative_eq!(
            f.radius_max,
            sphere.radius + sphere.center.distance(centroid) + options().radius_padding,
            epsilon = 1e-4
        );
    }

    #[test]
    fn empty_focus_is_an_error() {
        let full = two_chains(false);
        let empty = Structure::default();
        assert_eq!(frame(&empty, &full, &options()), Err(FramingError::EmptyFocus));
        assert_eq!(
            frame_canonical(&empty, &full, &options()),
            Err(FramingError::EmptyFocus)
        );
    }

    #[test]
    fn flips_are_exclusive() {
        let axes = PrincipalAxes {
            centroid: Vec3::ZERO,
            major: Vec3::X,
            middle: Vec3::Y,
            minor: Vec3::Z,
            variances: [3.0, 2.0, 1.0],
        };
        // Behind both planes: only the minor flip applies.
        let (out, flip) = canonical_basis(axes, Vec3::new(-1.0, 0.0, -1.0));
        assert_eq!(flip, Flip::AroundY);
        assert_eq!(out.major, Vec3::X);
        assert_eq!(out.minor, Vec3::NEG_Z);

        let (out, flip) = canonical_basis(axes, Vec3::new(-1.0, 0.0, 1.0));
        assert_eq!(flip, Flip::AroundX);
        assert_eq!(out.major, Vec3::NEG_X);
        assert_eq!(out.minor, Vec3::NEG_Z);

        let (_, flip) = canonical_basis(axes, Vec3::ONE);
        assert_eq!(flip, Flip::None);
    }

    #[test]
    fn signed_distance_matches_plane_equation() {
        let d = signed_plane_distance(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, 2.0), Vec3::Z);
        assert_relative_eq!(d, 3.0);
    }
}
