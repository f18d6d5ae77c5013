//! JSON state sidecars written next to images.

use serde::{Deserialize, Serialize};

use crate::camera::CameraFrame;

/// Which target a sidecar describes, tagged by `case`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "case",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum StateSelector {
    /// Single chain.
    Chain {
        /// Chain identifier.
        chain: String,
    },
    /// Single model.
    Model {
        /// 1-based model index.
        model_index: usize,
    },
    /// Assembly.
    Assembly {
        /// Assembly identifier.
        assembly_id: String,
    },
    /// Chain-list selection.
    ChainList {
        /// Assembly identifier.
        assembly_id: String,
        /// Resolved `chain[.operator]` entries.
        chains: Vec<String>,
    },
    /// Ensemble of models.
    Models {
        /// Number of models overlaid.
        model_count: usize,
    },
}

/// Enough state to reproduce the camera and coloring of one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderState {
    /// Output name without extension.
    pub id: String,
    /// Name of the polymer color theme.
    pub color_theme: String,
    /// Camera pose.
    pub camera_state: CameraFrame,
    /// Target selector.
    #[serde(flatten)]
    pub selector: StateSelector,
}

impl RenderState {
    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
