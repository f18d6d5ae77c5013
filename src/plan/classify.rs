//! Structure size classification and rendering quality.

use serde::{Deserialize, Serialize};

use crate::structure::{query, Structure};

/// Polymer residue count above which a structure is drawn as a surface.
pub const BIG_RESIDUE_THRESHOLD: usize = 4000;
/// Polymer residue count below which a structure is considered small.
pub const SMALL_RESIDUE_THRESHOLD: usize = 10;
/// Fiber units contribute fewer polymer atoms than this.
pub const FIBER_UNIT_ATOM_LIMIT: usize = 15;
/// A fiber symmetry group has more units than this.
pub const FIBER_MIN_UNITS: usize = 2;

/// Ordinal visual complexity class.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
    Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum SizeClass {
    /// Few residues, or a fiber of tiny repeated units.
    Small,
    /// Ordinary macromolecule.
    Medium,
    /// Very large polymer content.
    Big,
}

/// Per symmetry group counts used by the fiber rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupStats {
    /// Units in the group.
    pub unit_count: usize,
    /// Largest polymer atom count of any unit in the group.
    pub max_polymer_atoms: usize,
}

/// The counts classification depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureStats {
    /// Distinct polymer residues over all units.
    pub polymer_residue_count: usize,
    /// One entry per unit symmetry group.
    pub groups: Vec<GroupStats>,
}

impl StructureStats {
    /// Collect the counts of a structure.
    #[must_use]
    pub fn of(structure: &Structure) -> Self {
        let units = structure.units();
        let groups = structure
            .symmetry_groups()
            .iter()
            .map(|members| GroupStats {
                unit_count: members.len(),
                max_polymer_atoms: members
                    .iter()
                    .map(|&i| units[i].polymer_atom_count())
                    .max()
                    .unwrap_or(0),
            })
            .collect();
        Self {
            polymer_residue_count: structure.polymer_residue_count(),
            groups,
        }
    }

    /// A single symmetry group of more than two units, each contributing
    /// fewer than 15 polymer atoms.
    #[must_use]
    pub fn is_fiber_like(&self) -> bool {
        match self.groups.as_slice() {
            [group] => {
                group.unit_count > FIBER_MIN_UNITS
                    && group.max_polymer_atoms < FIBER_UNIT_ATOM_LIMIT
            }
            _ => false,
        }
    }

    /// Apply the classification rules; the fiber rule takes precedence
    /// over the residue-count rules.
    #[must_use]
    pub fn size_class(&self) -> SizeClass {
        if self.is_fiber_like() {
            SizeClass::Small
        } else if self.polymer_residue_count > BIG_RESIDUE_THRESHOLD {
            SizeClass::Big
        } else if self.polymer_residue_count < SMALL_RESIDUE_THRESHOLD {
            SizeClass::Small
        } else {
            SizeClass::Medium
        }
    }
}

/// Classify a structure's visual complexity.
#[must_use]
pub fn classify(structure: &Structure) -> SizeClass {
    StructureStats::of(structure).size_class()
}

/// Geometry detail requested from the rendering engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Quality {
    /// Coarse geometry for very large structures.
    Low,
    /// Intermediate detail.
    Medium,
    /// Fine detail.
    High,
    /// Let the engine pick; used for small structures.
    Auto,
}

/// Seven-level structure quality heuristic over the (weighted) atom count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DetailLevel {
    /// More than 5M weighted atoms.
    Lowest,
    /// More than 1M.
    Lower,
    /// More than 250k.
    Low,
    /// More than 100k.
    Medium,
    /// More than 20k.
    High,
    /// More than 2k.
    Higher,
    /// Everything else.
    Highest,
}

impl DetailLevel {
    /// Level for a weighted atom count.
    #[must_use]
    pub fn from_score(score: usize) -> Self {
        match score {
            s if s > 5_000_000 => Self::Lowest,
            s if s > 1_000_000 => Self::Lower,
            s if s > 250_000 => Self::Low,
            s if s > 100_000 => Self::Medium,
            s if s > 20_000 => Self::High,
            s if s > 2_000 => Self::Higher,
            _ => Self::Highest,
        }
    }

    /// Collapse to the four values the rendering layers distinguish.
    #[must_use]
    pub fn quality(self) -> Quality {
        match self {
            Self::Lowest | Self::Lower | Self::Low => Quality::Low,
            Self::Medium => Quality::Medium,
            Self::High => Quality::High,
            Self::Higher | Self::Highest => Quality::Auto,
        }
    }
}

/// Whether every polymer atom is a trace atom (CA/P-only model).
fn is_coarse_grained(structure: &Structure) -> bool {
    let polymer = query::polymer(structure);
    !polymer.is_empty()
        && query::backbone_trace(&polymer).atom_count() == polymer.atom_count()
}

/// Rendering quality for a structure. Coarse-grained structures weigh ten
/// times their atom count.
#[must_use]
pub fn quality(structure: &Structure) -> Quality {
    let mut score = structure.atom_count();
    if is_coarse_grained(structure) {
        score *= 10;
    }
    DetailLevel::from_score(score).quality()
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::testing::ModelBuilder;

    fn stats(residues: usize, groups: &[(usize, usize)]) -> StructureStats {
        StructureStats {
            polymer_residue_count: residues,
            groups: groups
                .iter()
                .map(|&(unit_count, max_polymer_atoms)| GroupStats {
                    unit_count,
                    max_polymer_atoms,
                })
                .collect(),
        }
    }

    #[test]
    fn large_fiber_is_small() {
        // 5000 residues, one group, 3 units of 10 polymer atoms.
        assert_eq!(stats(5000, &[(3, 10)]).size_class(), SizeClass::Small);
    }

    #[test]
    fn residue_count_boundaries() {
        let non_fiber = [(1, 400)];
        assert_eq!(stats(9, &non_fiber).size_class(), SizeClass::Small);
        assert_eq!(stats(10, &non_fiber).size_class(), SizeClass::Medium);
        assert_eq!(stats(4000, &non_fiber).size_class(), SizeClass::Medium);
        assert_eq!(stats(4001, &non_fiber).size_class(), SizeClass::Big);
    }

    #[test]
    fn fiber_needs_exactly_one_group_of_three_small_units() {
        assert!(!stats(100, &[(2, 10)]).is_fiber_like());
        assert!(!stats(100, &[(3, 15)]).is_fiber_like());
        assert!(!stats(100, &[(3, 10), (1, 10)]).is_fiber_like());
        assert!(stats(100, &[(3, 14)]).is_fiber_like());
    }

    #[test]
    fn classify_real_structure() {
        let s = ModelBuilder::default()
            .protein("A", "1", 50, Vec3::ZERO)
            .structure();
        assert_eq!(classify(&s), SizeClass::Medium);
        let tiny = ModelBuilder::default()
            .protein("A", "1", 5, Vec3::ZERO)
            .structure();
        assert_eq!(classify(&tiny), SizeClass::Small);
    }

    #[test]
    fn quality_collapses_low_levels() {
        assert_eq!(DetailLevel::from_score(6_000_000).quality(), Quality::Low);
        assert_eq!(DetailLevel::from_score(300_000).quality(), Quality::Low);
        assert_eq!(DetailLevel::from_score(150_000).quality(), Quality::Medium);
        assert_eq!(DetailLevel::from_score(50_000).quality(), Quality::High);
        assert_eq!(DetailLevel::from_score(100).quality(), Quality::Auto);
    }
}
