//! Builders for synthetic structures used across unit tests.

use glam::Vec3;

use crate::structure::{
    Assembly, Atom, ChainInfo, EntityType, Model, Operator, OperatorGroup,
    Structure,
};

pub(crate) fn atom(
    id: u32,
    chain: &str,
    res: &str,
    seq: i32,
    name: &str,
    pos: Vec3,
) -> Atom {
    Atom {
        id,
        name: name.to_owned(),
        element: name.chars().next().map(String::from).unwrap_or_default(),
        residue_name: res.to_owned(),
        residue_seq: seq,
        chain_id: chain.to_owned(),
        position: pos,
        confidence: None,
    }
}

pub(crate) fn chain_info(id: &str, entity: &str, entity_type: EntityType) -> ChainInfo {
    ChainInfo {
        id: id.to_owned(),
        entity_id: entity.to_owned(),
        entity_type,
    }
}

/// Incrementally builds a [`Model`] with unique atom ids.
#[derive(Default)]
pub(crate) struct ModelBuilder {
    model: Model,
    next_id: u32,
}

impl ModelBuilder {
    /// Protein chain of `residues` residues laid out along a helix-ish
    /// curve starting at `origin`, one `CA` plus one `CB` per residue.
    pub(crate) fn protein(mut self, chain: &str, entity: &str, residues: i32, origin: Vec3) -> Self {
        self.model.chains.push(chain_info(chain, entity, EntityType::Polymer));
        for r in 0..residues {
            let t = r as f32;
            let ca = origin + Vec3::new(t * 1.5, (t * 0.6).sin() * 2.0, (t * 0.6).cos());
            self.push(chain, "ALA", r + 1, "CA", ca);
            self.push(chain, "ALA", r + 1, "CB", ca + Vec3::new(0.0, 0.0, 1.5));
        }
        self
    }

    /// Single-atom ligand chain.
    pub(crate) fn ligand(mut self, chain: &str, entity: &str, name: &str, pos: Vec3) -> Self {
        self.model.chains.push(chain_info(chain, entity, EntityType::NonPolymer));
        self.push(chain, name, 1, "C1", pos);
        self
    }

    /// Single-residue branched carbohydrate chain.
    pub(crate) fn sugar(mut self, chain: &str, entity: &str, pos: Vec3) -> Self {
        self.model.chains.push(chain_info(chain, entity, EntityType::Branched));
        self.push(chain, "NAG", 1, "C1", pos);
        self.push(chain, "NAG", 1, "O1", pos + Vec3::X);
        self
    }

    /// Water chain with `count` oxygens.
    pub(crate) fn water(mut self, chain: &str, entity: &str, count: i32, origin: Vec3) -> Self {
        self.model.chains.push(chain_info(chain, entity, EntityType::Water));
        for i in 0..count {
            self.push(chain, "HOH", i + 1, "O", origin + Vec3::X * i as f32 * 3.0);
        }
        self
    }

    /// Assembly applying the given `(name, oper ids, translation)` operators
    /// to `chains`.
    pub(crate) fn assembly(mut self, id: &str, chains: &[&str], ops: &[(&str, &[u32], Vec3)]) -> Self {
        self.model.assemblies.push(Assembly {
            id: id.to_owned(),
            details: None,
            groups: vec![OperatorGroup {
                chains: chains.iter().map(|c| (*c).to_owned()).collect(),
                operators: ops
                    .iter()
                    .map(|(name, ids, shift)| Operator {
                        name: (*name).to_owned(),
                        oper_ids: ids.to_vec(),
                        transform: glam::Mat4::from_translation(*shift),
                    })
                    .collect(),
            }],
        });
        self
    }

    pub(crate) fn with_confidence(mut self, score: f32) -> Self {
        for a in &mut self.model.atoms {
            a.confidence = Some(score);
        }
        self
    }

    /// Negate every coordinate.
    pub(crate) fn mirrored(mut self) -> Self {
        for a in &mut self.model.atoms {
            a.position = -a.position;
        }
        self
    }

    fn push(&mut self, chain: &str, res: &str, seq: i32, name: &str, pos: Vec3) {
        self.next_id += 1;
        self.model.atoms.push(atom(self.next_id, chain, res, seq, name, pos));
    }

    pub(crate) fn build(self) -> Model {
        self.model
    }

    pub(crate) fn structure(self) -> Structure {
        Structure::from_model(&self.build(), 0)
    }
}
