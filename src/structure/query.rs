//! Named sub-structure selections used by the representation planner.

use rustc_hash::{FxHashMap, FxHashSet};

use super::model::EntityType;
use super::residue::{
    is_nucleotide, is_standard_polymer_residue, is_trace_atom, is_water_residue,
};
use super::view::{Structure, Unit};

/// Atoms of polymer units.
#[must_use]
pub fn polymer(s: &Structure) -> Structure {
    s.filter_units(Unit::is_polymer)
}

fn is_water(unit: &Unit, residue_name: &str) -> bool {
    unit.entity_type == EntityType::Water || is_water_residue(residue_name)
}

/// Solvent water atoms.
#[must_use]
pub fn water(s: &Structure) -> Structure {
    s.filter(|u, a| is_water(u, &a.residue_name))
}

/// Everything except solvent water.
#[must_use]
pub fn non_water(s: &Structure) -> Structure {
    s.filter(|u, a| !is_water(u, &a.residue_name))
}

/// Branched (carbohydrate) entity atoms.
#[must_use]
pub fn branched(s: &Structure) -> Structure {
    s.filter_units(|u| u.entity_type == EntityType::Branched)
}

/// Non-polymer, non-water atoms (ligands and ions).
#[must_use]
pub fn ligands(s: &Structure) -> Structure {
    s.filter(|u, a| {
        u.entity_type == EntityType::NonPolymer && !is_water_residue(&a.residue_name)
    })
}

/// `selection` plus every atom of `parent` covalently bonded to it under the
/// same operator.
#[must_use]
pub fn with_connected(selection: &Structure, parent: &Structure) -> Structure {
    let mut wanted: FxHashMap<(usize, &str), FxHashSet<u32>> = FxHashMap::default();
    for (unit, atom) in selection.atoms() {
        let ids = wanted
            .entry((unit.model_index, unit.operator.as_str()))
            .or_default();
        let _ = ids.insert(atom.id);
        ids.extend(parent.bonds().neighbors(unit.model_index, atom.id));
    }
    parent.filter(|u, a| {
        wanted
            .get(&(u.model_index, u.operator.as_str()))
            .is_some_and(|ids| ids.contains(&a.id))
    })
}

/// Branched atoms plus the atoms they are bonded to.
#[must_use]
pub fn branched_connected(s: &Structure) -> Structure {
    with_connected(&branched(s), s)
}

/// Ligands plus the atoms they are bonded to.
#[must_use]
pub fn ligands_connected(s: &Structure) -> Structure {
    with_connected(&ligands(s), s)
}

fn is_cys_sulfur(residue_name: &str, atom_name: &str) -> bool {
    residue_name == "CYS" && atom_name == "SG"
}

/// `CA`, `CB` and `SG` of cysteines whose sulfur is bonded to another
/// cysteine sulfur.
#[must_use]
pub fn disulfides(s: &Structure) -> Structure {
    let mut sulfurs: FxHashSet<(usize, &str, u32)> = FxHashSet::default();
    for (unit, atom) in s.atoms() {
        if is_cys_sulfur(&atom.residue_name, &atom.name) {
            let _ = sulfurs.insert((unit.model_index, unit.operator.as_str(), atom.id));
        }
    }

    let mut bridged: FxHashSet<(usize, &str, &str, i32)> = FxHashSet::default();
    for (unit, atom) in s.atoms() {
        if !is_cys_sulfur(&atom.residue_name, &atom.name) {
            continue;
        }
        let partnered = s
            .bonds()
            .neighbors(unit.model_index, atom.id)
            .iter()
            .any(|n| sulfurs.contains(&(unit.model_index, unit.operator.as_str(), *n)));
        if partnered {
            let _ = bridged.insert((
                unit.model_index,
                unit.operator.as_str(),
                unit.chain_id.as_str(),
                atom.residue_seq,
            ));
        }
    }

    s.filter(|u, a| {
        matches!(a.name.as_str(), "CA" | "CB" | "SG")
            && bridged.contains(&(
                u.model_index,
                u.operator.as_str(),
                u.chain_id.as_str(),
                a.residue_seq,
            ))
    })
}

/// Polymer atoms of modified or otherwise non-standard residues.
#[must_use]
pub fn non_standard_polymer(s: &Structure) -> Structure {
    s.filter(|u, a| u.is_polymer() && !is_standard_polymer_residue(&a.residue_name))
}

/// Backbone trace atoms (`CA` / `P`) of polymer units.
#[must_use]
pub fn backbone_trace(s: &Structure) -> Structure {
    s.filter(|u, a| u.is_polymer() && is_trace_atom(&a.residue_name, &a.name))
}

/// Nucleic-acid atoms.
#[must_use]
pub fn nucleic(s: &Structure) -> Structure {
    s.filter(|u, a| u.is_polymer() && is_nucleotide(&a.residue_name))
}

/// Atoms of one chain, optionally restricted to one operator.
#[must_use]
pub fn chain(s: &Structure, chain_id: &str, operator: Option<&str>) -> Structure {
    s.filter_units(|u| {
        u.chain_id == chain_id && operator.is_none_or(|op| u.operator == op)
    })
}
