use serde::{Deserialize, Serialize};

/// When per-residue confidence coloring replaces the default theme.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PlddtMode {
    /// Whenever the structure carries confidence scores.
    On,
    /// Only for targets made of exactly one polymer unit.
    SingleChain,
    /// Never.
    #[default]
    Off,
}

/// Color policy and palette options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorOptions {
    /// Confidence coloring policy.
    pub plddt: PlddtMode,
    /// RGBA clear color. Alpha 0 gives a transparent PNG background.
    pub background: [f32; 4],
    /// RGB color of carbohydrate glyphs.
    pub carbohydrate: [f32; 3],
}

impl Default for ColorOptions {
    fn default() -> Self {
        Self {
            plddt: PlddtMode::Off,
            background: [1.0, 1.0, 1.0, 0.0],
            carbohydrate: [0.2, 0.6, 0.9],
        }
    }
}
