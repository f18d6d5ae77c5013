//! Symmetry expansion of a model into an assembly structure.

use std::sync::Arc;

use super::model::{Assembly, Model};
use super::view::{BondTable, Structure, Unit};

impl Structure {
    /// Build the assembly: every operator of every group applied to the
    /// chains that group names. Chains keep model order within a group;
    /// repeated (chain, operator) pairs collapse into one unit.
    #[must_use]
    pub fn assembly(model: &Model, model_index: usize, assembly: &Assembly) -> Self {
        let bonds = Arc::new(BondTable::from_model(model_index, &model.bonds));
        let base = Self::from_model(model, model_index);
        let mut units = Vec::new();

        for group in &assembly.groups {
            for operator in &group.operators {
                for unit in base.units() {
                    if !group.chains.iter().any(|c| *c == unit.chain_id) {
                        continue;
                    }
                    let atoms = unit
                        .atoms()
                        .iter()
                        .map(|a| {
                            let mut moved = a.clone();
                            moved.position =
                                operator.transform.transform_point3(a.position);
                            moved
                        })
                        .collect();
                    let ordinal = units.len();
                    units.push(
                        Unit::new(
                            model_index,
                            unit.chain_id.clone(),
                            unit.entity_id.clone(),
                            unit.entity_type,
                            operator.name.clone(),
                            operator.oper_ids.clone(),
                            atoms,
                        )
                        .with_ordinal(ordinal),
                    );
                }
            }
        }

        let expanded = Self::from_units(units, bonds);
        Self::union_all([&expanded])
    }

    /// Union of every model of a trajectory, one unit set per frame.
    #[must_use]
    pub fn ensemble(models: &[Model]) -> Self {
        let frames: Vec<Self> = models
            .iter()
            .enumerate()
            .map(|(i, m)| Self::from_model(m, i))
            .collect();
        Self::union_all(&frames)
    }
}

#[cfg(test)]
mod tests {
    use glam::{Mat4, Vec3};

    use super::*;
    use crate::structure::model::{ChainInfo, EntityType, Operator, OperatorGroup};
    use crate::testing::atom;

    fn dimer_model() -> Model {
        Model {
            chains: vec![
                ChainInfo {
                    id: "A".to_owned(),
                    entity_id: "1".to_owned(),
                    entity_type: EntityType::Polymer,
                },
                ChainInfo {
                    id: "B".to_owned(),
                    entity_id: "2".to_owned(),
                    entity_type: EntityType::NonPolymer,
                },
            ],
            atoms: vec![
                atom(1, "A", "ALA", 1, "CA", Vec3::ZERO),
                atom(2, "B", "HEM", 1, "FE", Vec3::ONE),
            ],
            bonds: Vec::new(),
            assemblies: vec![Assembly {
                id: "1".to_owned(),
                details: None,
                groups: vec![OperatorGroup {
                    chains: vec!["A".to_owned()],
                    operators: vec![
                        Operator {
                            name: "ASM_1".to_owned(),
                            oper_ids: vec![1],
                            transform: Mat4::IDENTITY,
                        },
                        Operator {
                            name: "ASM_2".to_owned(),
                            oper_ids: vec![2],
                            transform: Mat4::from_translation(Vec3::X * 10.0),
                        },
                    ],
                }],
            }],
        }
    }

    #[test]
    fn test_assembly_applies_operators_to_group_chains() {
        let model = dimer_model();
        let s = Structure::assembly(&model, 0, &model.assemblies[0]);
        assert_eq!(s.unit_count(), 2);
        assert!(s.units().iter().all(|u| u.chain_id == "A"));
        assert_eq!(s.units()[1].operator, "ASM_2");
        assert_eq!(s.units()[1].atoms()[0].position, Vec3::X * 10.0);
        assert_eq!(s.symmetry_groups().len(), 1);
    }

    #[test]
    fn test_ensemble_keeps_frames_apart() {
        let model = dimer_model();
        let s = Structure::ensemble(&[model.clone(), model]);
        assert_eq!(s.unit_count(), 4);
        assert_eq!(s.atom_count(), 4);
    }
}
