//! Deterministic output names.

use crate::options::ImageFormat;

/// What an output file is named after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetLabel {
    /// 1-based model index.
    Model(usize),
    /// Assembly identifier.
    Assembly(String),
    /// Chain identifier.
    Chain(String),
    /// Assembly identifier plus the resolved chain pair spec.
    ChainList {
        /// Assembly identifier.
        assembly_id: String,
        /// `A-B.ASM_1` style fragment.
        pair_spec: String,
    },
    /// The ensemble of all models.
    Models,
}

impl TargetLabel {
    /// Name without extension, e.g. `1abc_model-1`.
    #[must_use]
    pub fn name(&self, stem: &str) -> String {
        match self {
            Self::Model(n) => format!("{stem}_model-{n}"),
            Self::Assembly(id) => format!("{stem}_assembly-{id}"),
            Self::Chain(id) => format!("{stem}_chain-{id}"),
            Self::ChainList {
                assembly_id,
                pair_spec,
            } => format!("{stem}_chain-list-assembly-{assembly_id}-{pair_spec}"),
            Self::Models => format!("{stem}_models"),
        }
    }

    /// Image file name.
    #[must_use]
    pub fn image_file(&self, stem: &str, format: ImageFormat) -> String {
        format!("{}.{}", self.name(stem), format.extension())
    }

    /// State sidecar file name.
    #[must_use]
    pub fn state_file(&self, stem: &str) -> String {
        format!("{}.json", self.name(stem))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_follow_the_convention() {
        assert_eq!(TargetLabel::Model(2).name("1abc"), "1abc_model-2");
        assert_eq!(TargetLabel::Assembly("1".to_owned()).name("1abc"), "1abc_assembly-1");
        assert_eq!(TargetLabel::Chain("B".to_owned()).name("1abc"), "1abc_chain-B");
        assert_eq!(
            TargetLabel::ChainList {
                assembly_id: "1".to_owned(),
                pair_spec: "A-B.ASM_2".to_owned(),
            }
            .name("1abc"),
            "1abc_chain-list-assembly-1-A-B.ASM_2"
        );
        assert_eq!(TargetLabel::Models.name("1abc"), "1abc_models");
    }

    #[test]
    fn file_names_carry_extensions() {
        let label = TargetLabel::Model(1);
        assert_eq!(label.image_file("x", ImageFormat::Png), "x_model-1.png");
        assert_eq!(label.image_file("x", ImageFormat::Jpeg), "x_model-1.jpeg");
        assert_eq!(label.state_file("x"), "x_model-1.json");
    }
}
