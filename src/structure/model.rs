//! Parsed structure documents: trajectories, models, chains, assemblies.
//!
//! These types are produced by a [`StructureSource`](super::StructureSource)
//! and are read-only to everything downstream. Field names match the JSON
//! interchange document read by [`JsonSource`](super::JsonSource).

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use super::residue::is_water_residue;
use crate::error::MolsnapError;

/// Coarse classification of the entity a chain belongs to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "kebab-case")]
pub enum EntityType {
    /// Protein or nucleic-acid polymer.
    Polymer,
    /// Ligand, ion or other small molecule.
    #[default]
    NonPolymer,
    /// Branched carbohydrate.
    Branched,
    /// Solvent water.
    Water,
}

/// One row of the model's chain table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainInfo {
    /// Chain identifier (label asym id).
    pub id: String,
    /// Owning entity identifier.
    pub entity_id: String,
    /// Classification of the owning entity.
    pub entity_type: EntityType,
}

/// A single atom site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    /// Atom id, unique within a model.
    pub id: u32,
    /// Atom name, e.g. `CA`.
    pub name: String,
    /// Element symbol, e.g. `C`.
    pub element: String,
    /// Residue (component) name, e.g. `ALA`.
    pub residue_name: String,
    /// Residue sequence number.
    pub residue_seq: i32,
    /// Chain identifier this atom belongs to.
    pub chain_id: String,
    /// Cartesian position in angstroms.
    pub position: Vec3,
    /// Per-residue confidence score (pLDDT) when the model carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

/// A named symmetry operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operator {
    /// Operator name, e.g. `ASM_1`.
    pub name: String,
    /// Ordered list of `oper` ids this operator composes.
    pub oper_ids: Vec<u32>,
    /// Rigid transform applied to chain coordinates.
    #[serde(default)]
    pub transform: Mat4,
}

/// Operators applied to a set of chains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorGroup {
    /// Chains the operators are applied to.
    pub chains: Vec<String>,
    /// Operators of this group.
    pub operators: Vec<Operator>,
}

/// A biological assembly description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assembly {
    /// Stable assembly identifier, e.g. `1` or `pdb_assembly_1`.
    pub id: String,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Operator groups building the assembly.
    pub groups: Vec<OperatorGroup>,
}

impl Assembly {
    /// All operators of all groups, in declaration order.
    pub fn operators(&self) -> impl Iterator<Item = &Operator> {
        self.groups.iter().flat_map(|g| g.operators.iter())
    }
}

/// One coordinate snapshot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Model {
    /// Chain table.
    pub chains: Vec<ChainInfo>,
    /// Atom sites, grouped by chain in file order.
    pub atoms: Vec<Atom>,
    /// Covalent bonds as pairs of atom ids.
    #[serde(default)]
    pub bonds: Vec<[u32; 2]>,
    /// Symmetry assemblies declared for this model.
    #[serde(default)]
    pub assemblies: Vec<Assembly>,
}

impl Model {
    /// Look up a chain by identifier.
    #[must_use]
    pub fn chain(&self, id: &str) -> Option<&ChainInfo> {
        self.chains.iter().find(|c| c.id == id)
    }

    /// Chains whose owning entity is a polymer, in chain table order.
    pub fn polymer_chains(&self) -> impl Iterator<Item = &ChainInfo> {
        self.chains
            .iter()
            .filter(|c| c.entity_type == EntityType::Polymer)
    }

    /// Entity type of a chain. Unknown chains are treated as water when
    /// their residues are water, otherwise as non-polymer.
    #[must_use]
    pub fn entity_type_of(&self, chain_id: &str, residue_name: &str) -> EntityType {
        match self.chain(chain_id) {
            Some(info) => info.entity_type,
            None if is_water_residue(residue_name) => EntityType::Water,
            None => EntityType::NonPolymer,
        }
    }

    /// Assembly by 1-based display index.
    #[must_use]
    pub fn assembly(&self, index: usize) -> Option<&Assembly> {
        index.checked_sub(1).and_then(|i| self.assemblies.get(i))
    }
}

/// An ordered sequence of models sharing chemical composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    /// Model frames, first one is the representative.
    pub models: Vec<Model>,
}

impl Trajectory {
    /// Number of frames.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.models.len()
    }

    /// The first frame, used for assembly and chain enumeration.
    #[must_use]
    pub fn representative(&self) -> Option<&Model> {
        self.models.first()
    }

    /// Model by 1-based display index.
    #[must_use]
    pub fn model(&self, index: usize) -> Option<&Model> {
        index.checked_sub(1).and_then(|i| self.models.get(i))
    }

    /// Reject documents the rest of the pipeline cannot handle: no frames,
    /// frames without atoms, duplicate atom ids.
    pub fn validate(&self) -> Result<(), MolsnapError> {
        if self.models.is_empty() {
            return Err(MolsnapError::StructureLoad(
                "trajectory has no models".to_owned(),
            ));
        }
        for (i, model) in self.models.iter().enumerate() {
            if model.atoms.is_empty() {
                return Err(MolsnapError::StructureLoad(format!(
                    "model {} has no atoms",
                    i + 1
                )));
            }
            let mut seen = rustc_hash::FxHashSet::default();
            for atom in &model.atoms {
                if !seen.insert(atom.id) {
                    return Err(MolsnapError::StructureLoad(format!(
                        "model {} has duplicate atom id {}",
                        i + 1,
                        atom.id
                    )));
                }
            }
        }
        Ok(())
    }
}
