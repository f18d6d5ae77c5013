//! Resolving parsed chain runs against an assembly and selecting their atoms.

use log::debug;
use rustc_hash::FxHashMap;

use super::{ChainListError, ChainRun, OperatorQualifier, ResolvedChain};
use crate::structure::{query, Assembly, Structure};

/// Lookup key of an oper id set: sorted and comma-joined.
#[must_use]
pub fn operator_key(ids: &[u32]) -> String {
    let mut sorted = ids.to_vec();
    sorted.sort_unstable();
    sorted
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Map every operator of every group from its key to the distinct operator
/// names sharing that key, in declaration order.
#[must_use]
pub fn operator_lookup(assembly: &Assembly) -> FxHashMap<String, Vec<String>> {
    let mut lookup: FxHashMap<String, Vec<String>> = FxHashMap::default();
    for operator in assembly.operators() {
        let names = lookup.entry(operator_key(&operator.oper_ids)).or_default();
        if !names.contains(&operator.name) {
            names.push(operator.name.clone());
        }
    }
    lookup
}

/// Resolve operator-list qualifiers to operator names. Operator names are
/// passed through as given; bare chains stay unqualified.
pub fn resolve(
    assembly: &Assembly,
    runs: &[ChainRun],
) -> Result<Vec<ResolvedChain>, ChainListError> {
    let lookup = operator_lookup(assembly);
    runs.iter()
        .map(|run| {
            let operator = match &run.qualifier {
                None => None,
                Some(OperatorQualifier::Name(name)) => Some(name.clone()),
                Some(OperatorQualifier::List(ids)) => {
                    let key = operator_key(ids);
                    match lookup.get(&key).map(Vec::as_slice) {
                        Some([name]) => Some(name.clone()),
                        Some(names) if !names.is_empty() => {
                            return Err(ChainListError::AmbiguousOperatorList {
                                chain: run.chain.clone(),
                                key,
                                names: names.to_vec(),
                            })
                        }
                        _ => {
                            return Err(ChainListError::UnmatchedOperatorList {
                                chain: run.chain.clone(),
                                key,
                            })
                        }
                    }
                }
            };
            Ok(ResolvedChain {
                chain: run.chain.clone(),
                operator,
            })
        })
        .collect()
}

/// One selection per resolved chain, in order. Selections may be empty.
#[must_use]
pub fn to_structures(structure: &Structure, chains: &[ResolvedChain]) -> Vec<Structure> {
    chains
        .iter()
        .map(|c| query::chain(structure, &c.chain, c.operator.as_deref()))
        .collect()
}

/// Union of all per-chain selections.
#[must_use]
pub fn select(structure: &Structure, chains: &[ResolvedChain]) -> Structure {
    let parts = to_structures(structure, chains);
    for (chain, part) in chains.iter().zip(&parts) {
        if part.is_empty() {
            debug!("chain-list entry {chain:?} selects nothing");
        }
    }
    Structure::union_all(&parts)
}

/// File-name fragment for a resolved list: `A` for bare chains,
/// `A.ASM_1` for qualified ones, joined by `-`.
#[must_use]
pub fn pair_spec(chains: &[ResolvedChain]) -> String {
    chains
        .iter()
        .map(|c| match &c.operator {
            Some(op) => format!("{}.{op}", c.chain),
            None => c.chain.clone(),
        })
        .collect::<Vec<_>>()
        .join("-")
}
