//! Representation planning: which layers to draw for a target and which
//! sub-structure the camera frames.
//!
//! Planning is a pure function of the target kind, the structure and its
//! size class. Each size class maps to a fixed recipe; the target kind only
//! decides whether branched content and solvent may take part.

use log::{debug, warn};

use super::classify::{quality, Quality, SizeClass};
use super::theme::{ColorTheme, LayerKind, SizeTheme};
use crate::options::{Options, PlddtMode};
use crate::structure::{query, Structure};

/// Polymer unit count from which per-unit coloring gives way to
/// per-entity coloring.
pub const UNIT_INDEX_LIMIT: usize = 40;

/// Kind of render target, as far as layer policy is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    /// One model of the trajectory.
    Model,
    /// A symmetry-expanded assembly.
    Assembly,
    /// A single polymer chain.
    Chain,
    /// A user-selected union of chains.
    ChainList,
    /// Every model overlaid.
    Ensemble,
}

impl TargetKind {
    /// All target kinds.
    pub const ALL: [Self; 5] = [
        Self::Model,
        Self::Assembly,
        Self::Chain,
        Self::ChainList,
        Self::Ensemble,
    ];

    /// Whether carbohydrate content is drawn for this kind.
    #[must_use]
    pub fn allows_branched(self) -> bool {
        !matches!(self, Self::Chain)
    }

    /// Whether solvent water takes part in ball-and-stick layers.
    #[must_use]
    pub fn includes_water(self) -> bool {
        matches!(self, Self::Model | Self::Assembly | Self::Ensemble)
    }
}

/// Settings the planner reads from [`Options`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanOptions {
    /// Confidence coloring policy.
    pub plddt: PlddtMode,
    /// Radius offset for surface layers.
    pub surface_radius_offset: f32,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self::from(&Options::default())
    }
}

impl From<&Options> for PlanOptions {
    fn from(options: &Options) -> Self {
        Self {
            plddt: options.colors.plddt,
            surface_radius_offset: options.geometry.surface_radius_offset,
        }
    }
}

/// One layer the engine is asked to build.
#[derive(Debug, Clone)]
pub struct RepresentationLayer {
    /// Representation type.
    pub kind: LayerKind,
    /// Coloring.
    pub color_theme: ColorTheme,
    /// Atom sizing.
    pub size_theme: SizeTheme,
    /// Geometry detail.
    pub quality: Quality,
    /// Extra radius for surfaces.
    pub radius_offset: Option<f32>,
    /// Atoms the layer covers. Never empty.
    pub structure: Structure,
}

/// Ordered layers plus the structure the camera frames.
#[derive(Debug, Clone)]
pub struct RenderPlan {
    /// Layers in draw order. Never empty for a non-empty structure, always
    /// empty for an empty one.
    pub layers: Vec<RepresentationLayer>,
    /// Sub-structure used for framing only.
    pub focus: Structure,
    /// Theme applied to polymer layers, recorded in state sidecars.
    pub color_theme: ColorTheme,
    /// Size class the plan was made for.
    pub size_class: SizeClass,
}

/// Sub-structures a recipe can refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Content {
    Polymer,
    Branched,
    BranchedConnected,
    NonWater,
    /// Ligands, carbohydrates and their bonded atoms, disulfides,
    /// non-standard residues and (where allowed) water.
    Curated,
    /// [`Content::Curated`] plus backbone trace and nucleic-acid atoms.
    CuratedWithTrace,
}

struct Recipe {
    layers: &'static [(LayerKind, Content)],
    focus: Content,
}

const BIG: Recipe = Recipe {
    layers: &[(LayerKind::Surface, Content::Polymer)],
    focus: Content::Polymer,
};

const MEDIUM: Recipe = Recipe {
    layers: &[
        (LayerKind::Cartoon, Content::Polymer),
        (LayerKind::Carbohydrate, Content::BranchedConnected),
        (LayerKind::BallAndStick, Content::Curated),
    ],
    focus: Content::CuratedWithTrace,
};

const SMALL: Recipe = Recipe {
    layers: &[
        (LayerKind::Cartoon, Content::Polymer),
        (LayerKind::Carbohydrate, Content::Branched),
        (LayerKind::BallAndStick, Content::NonWater),
    ],
    focus: Content::NonWater,
};

fn recipe(size_class: SizeClass) -> &'static Recipe {
    match size_class {
        SizeClass::Big => &BIG,
        SizeClass::Medium => &MEDIUM,
        SizeClass::Small => &SMALL,
    }
}

fn select(content: Content, kind: TargetKind, s: &Structure) -> Structure {
    match content {
        Content::Polymer => query::polymer(s),
        Content::Branched => query::branched(s),
        Content::BranchedConnected => query::branched_connected(s),
        Content::NonWater => query::non_water(s),
        Content::Curated => curated(kind, s),
        Content::CuratedWithTrace => Structure::union_all(&[
            curated(kind, s),
            query::backbone_trace(s),
            query::nucleic(s),
        ]),
    }
}

fn curated(kind: TargetKind, s: &Structure) -> Structure {
    let mut parts = vec![
        query::ligands_connected(s),
        query::disulfides(s),
        query::non_standard_polymer(s),
    ];
    if kind.allows_branched() {
        parts.push(query::branched_connected(s));
    }
    if kind.includes_water() {
        parts.push(query::water(s));
    }
    Structure::union_all(&parts)
}

/// Default theme for polymer layers, with the confidence override applied.
#[must_use]
pub fn polymer_color_theme(structure: &Structure, plddt: PlddtMode) -> ColorTheme {
    let polymer_units = structure.polymer_unit_count();
    let confidence = match plddt {
        PlddtMode::On => structure.has_confidence(),
        PlddtMode::SingleChain => polymer_units == 1 && structure.has_confidence(),
        PlddtMode::Off => false,
    };
    if confidence {
        ColorTheme::Plddt
    } else if polymer_units == 1 {
        ColorTheme::SequenceId
    } else if polymer_units < UNIT_INDEX_LIMIT {
        ColorTheme::UnitIndex
    } else {
        ColorTheme::PolymerId
    }
}

/// Plan the layers and framing focus for one target.
#[must_use]
pub fn plan(
    kind: TargetKind,
    structure: &Structure,
    size_class: SizeClass,
    options: &PlanOptions,
) -> RenderPlan {
    let recipe = recipe(size_class);
    let color_theme = polymer_color_theme(structure, options.plddt);
    let quality = quality(structure);

    let mut layers: Vec<RepresentationLayer> = recipe
        .layers
        .iter()
        .filter(|(layer, _)| *layer != LayerKind::Carbohydrate || kind.allows_branched())
        .map(|&(layer, content)| {
            let sub = select(content, kind, structure);
            make_layer(layer, color_theme, quality, options, sub)
        })
        .filter(|layer| !layer.structure.is_empty())
        .collect();

    if layers.is_empty() && !structure.is_empty() {
        warn!("no {size_class:?} layer has content, drawing everything as ball-and-stick");
        layers.push(make_layer(
            LayerKind::BallAndStick,
            color_theme,
            quality,
            options,
            structure.clone(),
        ));
    }

    let mut focus = select(recipe.focus, kind, structure);
    if focus.is_empty() {
        debug!("empty focus, framing on the whole structure");
        focus = structure.clone();
    }

    debug!(
        "planned {} layer(s) for {kind:?} ({size_class:?}, {color_theme:?}, {quality:?})",
        layers.len()
    );
    RenderPlan {
        layers,
        focus,
        color_theme,
        size_class,
    }
}

fn make_layer(
    kind: LayerKind,
    polymer_theme: ColorTheme,
    quality: Quality,
    options: &PlanOptions,
    structure: Structure,
) -> RepresentationLayer {
    let color_theme = match kind {
        LayerKind::Cartoon | LayerKind::Surface => polymer_theme,
        LayerKind::BallAndStick => ColorTheme::ElementSymbol,
        LayerKind::Carbohydrate => ColorTheme::CarbohydrateSymbol,
    };
    RepresentationLayer {
        kind,
        color_theme,
        size_theme: kind.size_theme(),
        quality,
        radius_offset: (kind == LayerKind::Surface).then_some(options.surface_radius_offset),
        structure,
    }
}
