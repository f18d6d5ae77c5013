//! Rendering options with TOML file support.
//!
//! Everything that is not a per-invocation choice (image size, camera
//! projection, color policy, geometry sizes, post-processing strength)
//! lives here. Options serialize to and from TOML; command-line flags
//! override individual fields after loading.

mod camera;
mod colors;
mod geometry;
mod lighting;
mod output;
mod post_processing;

use std::path::Path;

pub use camera::{CameraOptions, FramingMode};
pub use colors::{ColorOptions, PlddtMode};
pub use geometry::GeometryOptions;
pub use lighting::LightingOptions;
pub use output::{ImageFormat, OutputOptions};
pub use post_processing::PostProcessingOptions;
use serde::{Deserialize, Serialize};

use crate::error::MolsnapError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[output]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Image size, format and sidecar toggle.
    pub output: OutputOptions,
    /// Camera projection and framing parameters.
    pub camera: CameraOptions,
    /// Color policy and palette.
    pub colors: ColorOptions,
    /// Representation geometry sizes.
    pub geometry: GeometryOptions,
    /// Shading parameters.
    pub lighting: LightingOptions,
    /// Post-processing effect parameters.
    pub post_processing: PostProcessingOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, MolsnapError> {
        let content = std::fs::read_to_string(path).map_err(MolsnapError::Io)?;
        Self::parse(&content)
    }

    /// Parse options from TOML text.
    pub fn parse(content: &str) -> Result<Self, MolsnapError> {
        toml::from_str(content).map_err(|e| MolsnapError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), MolsnapError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| MolsnapError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(MolsnapError::Io)?;
        }
        std::fs::write(path, content).map_err(MolsnapError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[output]
width = 800
format = "jpeg"

[colors]
plddt = "single-chain"
"#;
        let opts = Options::parse(toml_str).unwrap();
        assert_eq!(opts.output.width, 800);
        assert_eq!(opts.output.format, ImageFormat::Jpeg);
        assert_eq!(opts.colors.plddt, PlddtMode::SingleChain);
        // Everything else should be default
        assert_eq!(opts.output.height, 1536);
        assert_eq!(opts.camera.fovy, 45.0);
        assert_eq!(opts.camera.framing, FramingMode::FirstResidue);
    }

    #[test]
    fn unknown_enum_value_is_a_parse_error() {
        let err = Options::parse("[output]\nformat = \"gif\"\n").unwrap_err();
        assert!(matches!(err, MolsnapError::OptionsParse(_)));
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("presets/big.toml");
        let mut opts = Options::default();
        opts.post_processing.outline_strength = 0.2;
        opts.save(&path).unwrap();
        assert_eq!(Options::load(&path).unwrap(), opts);
    }
}
