//! Structure data model: parsed trajectories and the immutable
//! [`Structure`] views derived from them.
//!
//! Parsing of the original file formats happens upstream; this crate reads a
//! pre-parsed interchange document through a [`StructureSource`].

mod model;
pub mod query;
mod residue;
mod source;
mod symmetry;
mod view;

pub use model::{
    Assembly, Atom, ChainInfo, EntityType, Model, Operator, OperatorGroup,
    Trajectory,
};
pub use source::{JsonSource, StructureSource};
pub use view::{BondTable, BoundingSphere, Structure, Unit, IDENTITY_OPERATOR};
