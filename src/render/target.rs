//! Render targets and their names in logs and errors.

use std::fmt;

use crate::plan::TargetKind;

/// One image to produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderTarget {
    /// Model by 1-based index.
    Model(usize),
    /// Assembly of the representative model by 1-based index.
    Assembly(usize),
    /// Polymer chain of the representative model by chain id.
    Chain(String),
    /// Chain-list selection over an assembly (1-based index).
    ChainList {
        /// Assembly index.
        assembly: usize,
        /// Raw chain-list tokens.
        tokens: Vec<String>,
    },
    /// Every model overlaid.
    Ensemble,
}

impl RenderTarget {
    /// Layer policy kind of this target.
    #[must_use]
    pub fn kind(&self) -> TargetKind {
        match self {
            Self::Model(_) => TargetKind::Model,
            Self::Assembly(_) => TargetKind::Assembly,
            Self::Chain(_) => TargetKind::Chain,
            Self::ChainList { .. } => TargetKind::ChainList,
            Self::Ensemble => TargetKind::Ensemble,
        }
    }
}

impl fmt::Display for RenderTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Model(n) => write!(f, "model {n}"),
            Self::Assembly(n) => write!(f, "assembly {n}"),
            Self::Chain(name) => write!(f, "chain {name}"),
            Self::ChainList { assembly, tokens } => {
                write!(f, "chain list `{}` of assembly {assembly}", tokens.join(" "))
            }
            Self::Ensemble => write!(f, "ensemble"),
        }
    }
}
