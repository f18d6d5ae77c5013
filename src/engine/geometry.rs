//! Turning representation layers into sphere primitives.
//!
//! Every representation is approximated by spheres: surfaces by inflated
//! van der Waals spheres, cartoons by a tube of spheres along a spline
//! through the trace atoms, sticks by spheres sampled along each bond, and
//! carbohydrates by one glyph sphere per residue.

use glam::Vec3;
use rustc_hash::FxHashMap;

use super::EngineError;
use crate::color::{vdw_radius, ThemeColorer};
use crate::options::{ColorOptions, GeometryOptions};
use crate::plan::{LayerKind, Quality, RepresentationLayer, SizeTheme};
use crate::structure::{query, Structure, Unit};

/// Trace atoms further apart than this start a new tube segment.
const CHAIN_BREAK_DISTANCE: f32 = 8.0;

/// A shaded sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    /// Centre in world space.
    pub center: Vec3,
    /// Radius in angstroms.
    pub radius: f32,
    /// Linear RGB.
    pub color: [f32; 3],
}

/// Spline samples per trace segment.
fn samples_per_segment(quality: Quality) -> usize {
    match quality {
        Quality::Low => 2,
        Quality::Medium => 4,
        Quality::High => 6,
        Quality::Auto => 8,
    }
}

/// Primitives for one layer. Fails on empty layers and non-finite
/// coordinates.
pub fn build_primitives(
    layer: &RepresentationLayer,
    geometry: &GeometryOptions,
    colors: &ColorOptions,
) -> Result<Vec<Sphere>, EngineError> {
    let structure = &layer.structure;
    if structure.is_empty() {
        return Err(EngineError::InvalidLayer(format!("{:?} layer has no atoms", layer.kind)));
    }
    if let Some((unit, atom)) = structure.atoms().find(|(_, a)| !a.position.is_finite()) {
        return Err(EngineError::InvalidLayer(format!(
            "atom {} of chain {} has a non-finite position",
            atom.id, unit.chain_id
        )));
    }

    let colorer = ThemeColorer::new(layer.color_theme, structure, colors);
    let spheres = match layer.kind {
        LayerKind::Surface => atom_spheres(structure, &colorer, |element| {
            vdw_radius(element) + layer.radius_offset.unwrap_or(0.0)
        }),
        LayerKind::BallAndStick => {
            let mut spheres = atom_spheres(structure, &colorer, |element| match layer.size_theme {
                SizeTheme::Physical => vdw_radius(element) * geometry.ball_scale,
                SizeTheme::Uniform => geometry.ball_scale * 1.5,
            });
            spheres.extend(bond_spheres(structure, &colorer, geometry.bond_radius));
            spheres
        }
        LayerKind::Cartoon => tube_spheres(
            structure,
            &colorer,
            geometry.cartoon_radius,
            samples_per_segment(layer.quality),
        ),
        LayerKind::Carbohydrate => glyph_spheres(structure, &colorer, geometry.carbohydrate_radius),
    };
    Ok(spheres)
}

fn atom_spheres(
    structure: &Structure,
    colorer: &ThemeColorer,
    radius: impl Fn(&str) -> f32,
) -> Vec<Sphere> {
    let mut spheres = Vec::with_capacity(structure.atom_count());
    for (i, unit) in structure.units().iter().enumerate() {
        for atom in unit.atoms() {
            spheres.push(Sphere {
                center: atom.position,
                radius: radius(&atom.element),
                color: colorer.color(i, unit, atom),
            });
        }
    }
    spheres
}

/// Sticks as overlapping spheres, each half colored after its atom. Only
/// bonds with both ends inside the same unit set of the layer are drawn.
fn bond_spheres(structure: &Structure, colorer: &ThemeColorer, radius: f32) -> Vec<Sphere> {
    let mut ends: FxHashMap<(usize, &str, u32), (Vec3, [f32; 3])> = FxHashMap::default();
    for (i, unit) in structure.units().iter().enumerate() {
        for atom in unit.atoms() {
            let _ = ends.insert(
                (unit.model_index, unit.operator.as_str(), atom.id),
                (atom.position, colorer.color(i, unit, atom)),
            );
        }
    }

    let step = radius.max(0.05);
    let mut spheres = Vec::new();
    for (unit, atom) in structure.atoms() {
        for &other in structure.bonds().neighbors(unit.model_index, atom.id) {
            if other <= atom.id {
                continue;
            }
            let Some(&(a, color_a)) = ends.get(&(unit.model_index, unit.operator.as_str(), atom.id))
            else {
                continue;
            };
            let Some(&(b, color_b)) = ends.get(&(unit.model_index, unit.operator.as_str(), other))
            else {
                continue;
            };
            let count = (a.distance(b) / step).ceil().max(1.0) as usize;
            for k in 0..=count {
                let t = k as f32 / count as f32;
                spheres.push(Sphere {
                    center: a.lerp(b, t),
                    radius,
                    color: if t < 0.5 { color_a } else { color_b },
                });
            }
        }
    }
    spheres
}

fn catmull_rom(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * ((2.0 * p1)
        + (p2 - p0) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (3.0 * p1 - p0 - 3.0 * p2 + p3) * t3)
}

/// Tube of spheres along a spline through each unit's trace atoms. Units
/// without trace atoms fall back to their atom positions.
fn tube_spheres(
    structure: &Structure,
    colorer: &ThemeColorer,
    radius: f32,
    samples: usize,
) -> Vec<Sphere> {
    let trace = query::backbone_trace(structure);
    let mut spheres = Vec::new();
    for (i, unit) in structure.units().iter().enumerate() {
        let trace_unit = trace.units().iter().find(|t| {
            t.model_index == unit.model_index
                && t.chain_id == unit.chain_id
                && t.operator == unit.operator
        });
        let atoms = trace_unit.map_or(unit.atoms(), Unit::atoms);
        let points: Vec<(Vec3, [f32; 3])> = atoms
            .iter()
            .map(|a| (a.position, colorer.color(i, unit, a)))
            .collect();

        for segment in split_at_breaks(&points) {
            if let [(p, color)] = segment {
                spheres.push(Sphere { center: *p, radius, color: *color });
                continue;
            }
            let last = segment.len() - 1;
            for j in 0..last {
                let p0 = segment[j.saturating_sub(1)].0;
                let (p1, c1) = segment[j];
                let (p2, c2) = segment[j + 1];
                let p3 = segment[(j + 2).min(last)].0;
                for s in 0..samples {
                    let t = s as f32 / samples as f32;
                    spheres.push(Sphere {
                        center: catmull_rom(p0, p1, p2, p3, t),
                        radius,
                        color: if t < 0.5 { c1 } else { c2 },
                    });
                }
            }
            let (end, color) = segment[last];
            spheres.push(Sphere { center: end, radius, color });
        }
    }
    spheres
}

fn split_at_breaks(points: &[(Vec3, [f32; 3])]) -> Vec<&[(Vec3, [f32; 3])]> {
    let mut segments = Vec::new();
    let mut start = 0;
    for j in 1..points.len() {
        if points[j].0.distance(points[j - 1].0) > CHAIN_BREAK_DISTANCE {
            segments.push(&points[start..j]);
            start = j;
        }
    }
    if start < points.len() {
        segments.push(&points[start..]);
    }
    segments
}

/// One glyph per residue at the residue centroid.
fn glyph_spheres(structure: &Structure, colorer: &ThemeColorer, radius: f32) -> Vec<Sphere> {
    let mut spheres = Vec::new();
    for (i, unit) in structure.units().iter().enumerate() {
        let mut residues: Vec<(i32, Vec3, usize, [f32; 3])> = Vec::new();
        for atom in unit.atoms() {
            match residues.last_mut() {
                Some((seq, sum, n, _)) if *seq == atom.residue_seq => {
                    *sum += atom.position;
                    *n += 1;
                }
                _ => residues.push((atom.residue_seq, atom.position, 1, colorer.color(i, unit, atom))),
            }
        }
        spheres.extend(residues.into_iter().map(|(_, sum, n, color)| Sphere {
            center: sum / n as f32,
            radius,
            color,
        }));
    }
    spheres
}
