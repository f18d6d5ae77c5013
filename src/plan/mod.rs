//! Size classification and representation planning.

mod classify;
mod planner;
mod theme;

pub use classify::{
    classify, quality, DetailLevel, GroupStats, Quality, SizeClass, StructureStats,
    BIG_RESIDUE_THRESHOLD, FIBER_MIN_UNITS, FIBER_UNIT_ATOM_LIMIT, SMALL_RESIDUE_THRESHOLD,
};
pub use planner::{
    plan, polymer_color_theme, PlanOptions, RenderPlan, RepresentationLayer, TargetKind,
    UNIT_INDEX_LIMIT,
};
pub use theme::{ColorTheme, LayerKind, SizeTheme};
