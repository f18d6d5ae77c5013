//! Immutable selected views over model atoms.
//!
//! A [`Structure`] is a list of [`Unit`]s (one per chain copy) plus a shared
//! bond table. Every operation here returns a new value; nothing is mutated
//! in place.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use glam::Vec3;
use rustc_hash::{FxHashMap, FxHashSet, FxHasher};

use super::model::{Atom, EntityType, Model};

/// Name given to the identity operator of an unexpanded model.
pub const IDENTITY_OPERATOR: &str = "1_555";

/// Bond adjacency keyed by `(model index, atom id)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BondTable {
    adjacency: FxHashMap<(usize, u32), Vec<u32>>,
}

impl BondTable {
    /// Build the adjacency of one model's bond list.
    #[must_use]
    pub fn from_model(model_index: usize, bonds: &[[u32; 2]]) -> Self {
        let mut adjacency: FxHashMap<(usize, u32), Vec<u32>> =
            FxHashMap::default();
        for &[a, b] in bonds {
            adjacency.entry((model_index, a)).or_default().push(b);
            adjacency.entry((model_index, b)).or_default().push(a);
        }
        Self { adjacency }
    }

    /// Atom ids bonded to the given atom.
    #[must_use]
    pub fn neighbors(&self, model_index: usize, atom_id: u32) -> &[u32] {
        self.adjacency
            .get(&(model_index, atom_id))
            .map_or(&[][..], Vec::as_slice)
    }

    fn merged(&self, other: &Self) -> Self {
        let mut adjacency = self.adjacency.clone();
        for (key, partners) in &other.adjacency {
            let entry = adjacency.entry(*key).or_default();
            for p in partners {
                if !entry.contains(p) {
                    entry.push(*p);
                }
            }
        }
        Self { adjacency }
    }
}

/// A contiguous run of atoms for one chain copy.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    /// Index of the source model within its trajectory (0-based).
    pub model_index: usize,
    /// Chain identifier.
    pub chain_id: String,
    /// Owning entity identifier.
    pub entity_id: String,
    /// Owning entity classification.
    pub entity_type: EntityType,
    /// Name of the symmetry operator that produced this copy.
    pub operator: String,
    /// `oper` ids composed by that operator.
    pub oper_ids: Vec<u32>,
    /// Position among the units of the structure this unit was built in.
    /// Unions order units by model index, then by this value.
    pub ordinal: usize,
    atoms: Vec<Atom>,
}

impl Unit {
    /// Build a unit. Atoms are kept in the given order.
    #[must_use]
    pub fn new(
        model_index: usize,
        chain_id: String,
        entity_id: String,
        entity_type: EntityType,
        operator: String,
        oper_ids: Vec<u32>,
        atoms: Vec<Atom>,
    ) -> Self {
        Self {
            model_index,
            chain_id,
            entity_id,
            entity_type,
            operator,
            oper_ids,
            ordinal: 0,
            atoms,
        }
    }

    /// Set the unit's position in its source structure.
    #[must_use]
    pub fn with_ordinal(mut self, ordinal: usize) -> Self {
        self.ordinal = ordinal;
        self
    }

    /// Atoms of this unit.
    #[must_use]
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Whether the unit belongs to a polymer entity.
    #[must_use]
    pub fn is_polymer(&self) -> bool {
        self.entity_type == EntityType::Polymer
    }

    /// Number of atoms contributed to the polymer (0 for non-polymer units).
    #[must_use]
    pub fn polymer_atom_count(&self) -> usize {
        if self.is_polymer() {
            self.atoms.len()
        } else {
            0
        }
    }

    /// Number of distinct polymer residues in this unit.
    #[must_use]
    pub fn polymer_residue_count(&self) -> usize {
        if !self.is_polymer() {
            return 0;
        }
        let mut count = 0;
        let mut last: Option<(i32, &str)> = None;
        for atom in &self.atoms {
            let key = (atom.residue_seq, atom.residue_name.as_str());
            if last != Some(key) {
                count += 1;
                last = Some(key);
            }
        }
        count
    }

    fn key(&self) -> (usize, &str, &str) {
        (self.model_index, &self.chain_id, &self.operator)
    }

    /// Digest of the atom ids; equal for copies of one chain that differ
    /// only by operator.
    fn atom_signature(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.model_index.hash(&mut hasher);
        self.chain_id.hash(&mut hasher);
        self.atoms.len().hash(&mut hasher);
        for atom in &self.atoms {
            atom.id.hash(&mut hasher);
        }
        hasher.finish()
    }

    fn with_atoms(&self, atoms: Vec<Atom>) -> Self {
        Self {
            atoms,
            ..self.clone_header()
        }
    }

    fn clone_header(&self) -> Self {
        Self {
            model_index: self.model_index,
            chain_id: self.chain_id.clone(),
            entity_id: self.entity_id.clone(),
            entity_type: self.entity_type,
            operator: self.operator.clone(),
            oper_ids: self.oper_ids.clone(),
            ordinal: self.ordinal,
            atoms: Vec::new(),
        }
    }
}

/// Sphere enclosing a set of positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// Sphere centre.
    pub center: Vec3,
    /// Sphere radius.
    pub radius: f32,
}

impl BoundingSphere {
    /// Centroid-centred sphere reaching the farthest position. `None` for an
    /// empty set.
    #[must_use]
    pub fn from_positions(positions: &[Vec3]) -> Option<Self> {
        if positions.is_empty() {
            return None;
        }
        let center =
            positions.iter().copied().sum::<Vec3>() / positions.len() as f32;
        let radius = positions
            .iter()
            .map(|p| (*p - center).length())
            .fold(0.0f32, f32::max);
        Some(Self { center, radius })
    }
}

/// An immutable selected view over one or more models' atoms.
#[derive(Debug, Clone, Default)]
pub struct Structure {
    units: Vec<Unit>,
    bonds: Arc<BondTable>,
}

impl Structure {
    /// Assemble a structure from units that share one bond table. Empty
    /// units are dropped.
    #[must_use]
    pub fn from_units(units: Vec<Unit>, bonds: Arc<BondTable>) -> Self {
        Self {
            units: units.into_iter().filter(|u| !u.atoms.is_empty()).collect(),
            bonds,
        }
    }

    /// The whole model as one unit per chain, under the identity operator.
    #[must_use]
    pub fn from_model(model: &Model, model_index: usize) -> Self {
        let bonds = Arc::new(BondTable::from_model(model_index, &model.bonds));
        let mut units: Vec<Unit> = Vec::new();
        for atom in &model.atoms {
            let continues = units
                .last()
                .is_some_and(|u: &Unit| u.chain_id == atom.chain_id);
            if !continues {
                let (entity_id, entity_type) = model.chain(&atom.chain_id).map_or_else(
                    || {
                        (
                            String::new(),
                            model.entity_type_of(&atom.chain_id, &atom.residue_name),
                        )
                    },
                    |c| (c.entity_id.clone(), c.entity_type),
                );
                let ordinal = units.len();
                units.push(
                    Unit::new(
                        model_index,
                        atom.chain_id.clone(),
                        entity_id,
                        entity_type,
                        IDENTITY_OPERATOR.to_owned(),
                        Vec::new(),
                        Vec::new(),
                    )
                    .with_ordinal(ordinal),
                );
            }
            if let Some(unit) = units.last_mut() {
                unit.atoms.push(atom.clone());
            }
        }
        Self::from_units(units, bonds)
    }

    /// Units in order.
    #[must_use]
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Shared bond table.
    #[must_use]
    pub fn bonds(&self) -> &BondTable {
        &self.bonds
    }

    /// Whether the structure contains no atoms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Number of units.
    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    /// Number of atoms across all units.
    #[must_use]
    pub fn atom_count(&self) -> usize {
        self.units.iter().map(|u| u.atoms.len()).sum()
    }

    /// Number of polymer residues across all units.
    #[must_use]
    pub fn polymer_residue_count(&self) -> usize {
        self.units.iter().map(Unit::polymer_residue_count).sum()
    }

    /// Number of units belonging to polymer entities.
    #[must_use]
    pub fn polymer_unit_count(&self) -> usize {
        self.units.iter().filter(|u| u.is_polymer()).count()
    }

    /// Whether any atom carries a confidence score.
    #[must_use]
    pub fn has_confidence(&self) -> bool {
        self.atoms().any(|(_, a)| a.confidence.is_some())
    }

    /// Iterate `(unit, atom)` pairs in order.
    pub fn atoms(&self) -> impl Iterator<Item = (&Unit, &Atom)> {
        self.units
            .iter()
            .flat_map(|u| u.atoms.iter().map(move |a| (u, a)))
    }

    /// Flat position array.
    #[must_use]
    pub fn positions(&self) -> Vec<Vec3> {
        self.atoms().map(|(_, a)| a.position).collect()
    }

    /// Bounding sphere of all atom positions.
    #[must_use]
    pub fn bounding_sphere(&self) -> Option<BoundingSphere> {
        BoundingSphere::from_positions(&self.positions())
    }

    /// Keep the atoms matching `keep`; units left empty are dropped.
    #[must_use]
    pub fn filter(&self, mut keep: impl FnMut(&Unit, &Atom) -> bool) -> Self {
        let units = self
            .units
            .iter()
            .map(|u| {
                let atoms =
                    u.atoms.iter().filter(|a| keep(u, a)).cloned().collect();
                u.with_atoms(atoms)
            })
            .collect();
        Self::from_units(units, Arc::clone(&self.bonds))
    }

    /// Keep whole units matching `keep`.
    #[must_use]
    pub fn filter_units(&self, mut keep: impl FnMut(&Unit) -> bool) -> Self {
        let units = self.units.iter().filter(|u| keep(u)).cloned().collect();
        Self::from_units(units, Arc::clone(&self.bonds))
    }

    /// Set union. Units are matched by model, chain and operator; atoms by
    /// id. Units are ordered by model, then by their position in the
    /// structure they were built in; atoms are ordered by id.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self::union_all([self, other])
    }

    /// Set union of any number of structures.
    #[must_use]
    pub fn union_all<'a>(parts: impl IntoIterator<Item = &'a Self>) -> Self {
        let mut units: Vec<Unit> = Vec::new();
        let mut index: FxHashMap<(usize, String, String), usize> =
            FxHashMap::default();
        let mut seen: Vec<FxHashSet<u32>> = Vec::new();
        let mut bonds: Option<Arc<BondTable>> = None;

        for part in parts {
            bonds = Some(match bonds {
                None => Arc::clone(&part.bonds),
                Some(b) if Arc::ptr_eq(&b, &part.bonds) => b,
                Some(b) => Arc::new(b.merged(&part.bonds)),
            });
            for unit in &part.units {
                let (m, c, o) = unit.key();
                let key = (m, c.to_owned(), o.to_owned());
                let slot = *index.entry(key).or_insert_with(|| {
                    units.push(unit.clone_header());
                    seen.push(FxHashSet::default());
                    units.len() - 1
                });
                for atom in &unit.atoms {
                    if seen[slot].insert(atom.id) {
                        units[slot].atoms.push(atom.clone());
                    }
                }
            }
        }
        for unit in &mut units {
            unit.atoms.sort_by_key(|a| a.id);
        }
        units.sort_by_key(|u| (u.model_index, u.ordinal));
        Self::from_units(units, bonds.unwrap_or_default())
    }

    /// Groups of unit indices that are symmetry copies of each other (same
    /// model, chain and atom set; different operator). Groups are ordered
    /// by first member.
    #[must_use]
    pub fn symmetry_groups(&self) -> Vec<Vec<usize>> {
        let mut groups: Vec<Vec<usize>> = Vec::new();
        let mut by_signature: FxHashMap<u64, usize> = FxHashMap::default();
        for (i, unit) in self.units.iter().enumerate() {
            let slot = *by_signature
                .entry(unit.atom_signature())
                .or_insert_with(|| {
                    groups.push(Vec::new());
                    groups.len() - 1
                });
            groups[slot].push(i);
        }
        groups
    }
}
