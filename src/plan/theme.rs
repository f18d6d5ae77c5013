//! Layer kinds and the color/size themes a layer can request.

use serde::{Deserialize, Serialize};

/// Visual representation drawn for a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayerKind {
    /// Smoothed backbone trace.
    Cartoon,
    /// Molecular surface.
    Surface,
    /// Atoms as spheres, bonds as sticks.
    BallAndStick,
    /// Symbolic carbohydrate glyphs.
    Carbohydrate,
}

/// How a layer colors its atoms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorTheme {
    /// Gradient along the residue sequence.
    SequenceId,
    /// One palette entry per unit.
    UnitIndex,
    /// One palette entry per polymer entity.
    PolymerId,
    /// Per-residue confidence bands.
    Plddt,
    /// CPK colors by element.
    ElementSymbol,
    /// Fixed carbohydrate glyph color.
    CarbohydrateSymbol,
}

impl ColorTheme {
    /// Stable name written to state sidecars.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::SequenceId => "sequence-id",
            Self::UnitIndex => "unit-index",
            Self::PolymerId => "polymer-id",
            Self::Plddt => "plddt-confidence",
            Self::ElementSymbol => "element-symbol",
            Self::CarbohydrateSymbol => "carbohydrate-symbol",
        }
    }
}

/// How a layer sizes its atoms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SizeTheme {
    /// Every element drawn at the same radius.
    Uniform,
    /// Van der Waals radius per element.
    Physical,
}

impl LayerKind {
    /// Size theme used by this kind of layer.
    #[must_use]
    pub fn size_theme(self) -> SizeTheme {
        match self {
            Self::BallAndStick | Self::Surface => SizeTheme::Physical,
            Self::Cartoon | Self::Carbohydrate => SizeTheme::Uniform,
        }
    }
}
