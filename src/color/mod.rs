//! Atom coloring for each [`ColorTheme`].
//!
//! A [`ThemeColorer`] is built once per layer; it precomputes whatever the
//! theme needs from the layer's structure (residue ranges per unit, entity
//! order) and then answers per-atom lookups.

mod element;
mod ramp;

pub use element::{element_color, vdw_radius};
pub use ramp::ColorRamp;
use rustc_hash::FxHashMap;

use crate::options::ColorOptions;
use crate::plan::ColorTheme;
use crate::structure::{Atom, Structure, Unit};

/// Confidence band colors, from very high to very low.
pub const PLDDT_VERY_HIGH: [f32; 3] = rgb(0x0053D6);
/// Confident.
pub const PLDDT_CONFIDENT: [f32; 3] = rgb(0x65CBF3);
/// Low.
pub const PLDDT_LOW: [f32; 3] = rgb(0xFFDB13);
/// Very low.
pub const PLDDT_VERY_LOW: [f32; 3] = rgb(0xFF7D45);
/// Atoms without a score.
pub const MISSING_SCORE: [f32; 3] = [0.6, 0.6, 0.6];

/// Distinct colors cycled for units and entities.
const PALETTE: &[[f32; 3]] = &[
    [0.2, 0.6, 1.0],
    [1.0, 0.4, 0.4],
    [0.4, 0.9, 0.4],
    [1.0, 0.8, 0.2],
    [0.9, 0.5, 0.9],
    [0.5, 0.9, 0.9],
    [1.0, 0.6, 0.3],
    [0.7, 0.7, 0.9],
    [0.6, 0.8, 0.2],
    [0.9, 0.3, 0.6],
];

const fn rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
    ]
}

/// Color for a confidence score (0-100 scale).
#[must_use]
pub fn plddt_color(score: f32) -> [f32; 3] {
    if score > 90.0 {
        PLDDT_VERY_HIGH
    } else if score > 70.0 {
        PLDDT_CONFIDENT
    } else if score > 50.0 {
        PLDDT_LOW
    } else {
        PLDDT_VERY_LOW
    }
}

/// Palette entry `index`, cycling.
#[must_use]
pub fn palette_color(index: usize) -> [f32; 3] {
    PALETTE[index % PALETTE.len()]
}

/// Per-atom color lookup for one theme over one structure.
#[derive(Debug, Clone)]
pub struct ThemeColorer {
    theme: ColorTheme,
    ramp: ColorRamp,
    carbohydrate: [f32; 3],
    /// Residue number range per unit index.
    seq_ranges: Vec<(i32, i32)>,
    /// Entity id to order of first appearance.
    entities: FxHashMap<String, usize>,
}

impl ThemeColorer {
    /// Prepare `theme` for the atoms of `structure`.
    #[must_use]
    pub fn new(theme: ColorTheme, structure: &Structure, options: &ColorOptions) -> Self {
        let seq_ranges = structure
            .units()
            .iter()
            .map(|u| {
                u.atoms().iter().fold((i32::MAX, i32::MIN), |(lo, hi), a| {
                    (lo.min(a.residue_seq), hi.max(a.residue_seq))
                })
            })
            .collect();
        let mut entities = FxHashMap::default();
        for unit in structure.units().iter().filter(|u| u.is_polymer()) {
            let next = entities.len();
            let _ = entities.entry(unit.entity_id.clone()).or_insert(next);
        }
        Self {
            theme,
            ramp: ColorRamp::rainbow(),
            carbohydrate: options.carbohydrate,
            seq_ranges,
            entities,
        }
    }

    /// Color of `atom` in the unit at `unit_index` of the structure the
    /// colorer was built for.
    #[must_use]
    pub fn color(&self, unit_index: usize, unit: &Unit, atom: &Atom) -> [f32; 3] {
        match self.theme {
            ColorTheme::SequenceId => {
                let (lo, hi) = self.seq_ranges.get(unit_index).copied().unwrap_or((0, 0));
                let t = if hi > lo {
                    let offset = i64::from(atom.residue_seq) - i64::from(lo);
                    let span = i64::from(hi) - i64::from(lo);
                    offset as f32 / span as f32
                } else {
                    0.0
                };
                self.ramp.sample(t)
            }
            ColorTheme::UnitIndex => palette_color(unit_index),
            ColorTheme::PolymerId => palette_color(
                self.entities.get(&unit.entity_id).copied().unwrap_or(self.entities.len()),
            ),
            ColorTheme::Plddt => atom.confidence.map_or(MISSING_SCORE, plddt_color),
            ColorTheme::ElementSymbol => element_color(&atom.element),
            ColorTheme::CarbohydrateSymbol => self.carbohydrate,
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::testing::ModelBuilder;

    #[test]
    fn plddt_bands() {
        assert_eq!(plddt_color(95.0), PLDDT_VERY_HIGH);
        assert_eq!(plddt_color(90.0), PLDDT_CONFIDENT);
        assert_eq!(plddt_color(60.0), PLDDT_LOW);
        assert_eq!(plddt_color(10.0), PLDDT_VERY_LOW);
        assert_eq!(PLDDT_VERY_HIGH, [0.0, 83.0 / 255.0, 214.0 / 255.0]);
    }

    #[test]
    fn sequence_colors_span_the_ramp() {
        let s = ModelBuilder::default().protein("A", "1", 11, Vec3::ZERO).structure();
        let colorer = ThemeColorer::new(ColorTheme::SequenceId, &s, &ColorOptions::default());
        let unit = &s.units()[0];
        let first = colorer.color(0, unit, &unit.atoms()[0]);
        let last = colorer.color(0, unit, unit.atoms().last().unwrap());
        assert_eq!(first, [0.0, 0.0, 1.0]);
        assert_eq!(last, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn sequence_colors_handle_extreme_residue_numbers() {
        let mut model = ModelBuilder::default().protein("A", "1", 3, Vec3::ZERO).build();
        let last = model.atoms.len() - 1;
        model.atoms[0].residue_seq = i32::MIN;
        model.atoms[last].residue_seq = i32::MAX;
        let s = Structure::from_model(&model, 0);
        let colorer = ThemeColorer::new(ColorTheme::SequenceId, &s, &ColorOptions::default());
        let unit = &s.units()[0];
        let colors: Vec<[f32; 3]> = unit.atoms().iter().map(|a| colorer.color(0, unit, a)).collect();
        assert_eq!(colors[0], [0.0, 0.0, 1.0]);
        assert_eq!(colors[last], [1.0, 0.0, 0.0]);
        assert!(colors.iter().flatten().all(|c| c.is_finite()));
    }

    #[test]
    fn polymer_id_shares_color_per_entity() {
        let s = ModelBuilder::default()
            .protein("A", "1", 3, Vec3::ZERO)
            .protein("B", "1", 3, Vec3::X * 20.0)
            .protein("C", "2", 3, Vec3::Y * 20.0)
            .structure();
        let colorer = ThemeColorer::new(ColorTheme::PolymerId, &s, &ColorOptions::default());
        let pick = |i: usize| {
            let u = &s.units()[i];
            colorer.color(i, u, &u.atoms()[0])
        };
        assert_eq!(pick(0), pick(1));
        assert_ne!(pick(0), pick(2));

        let by_unit = ThemeColorer::new(ColorTheme::UnitIndex, &s, &ColorOptions::default());
        let u = &s.units()[1];
        assert_eq!(by_unit.color(1, u, &u.atoms()[0]), palette_color(1));
    }
}
