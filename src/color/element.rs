//! Per-element display colors and van der Waals radii.

struct ElementStyle {
    symbol: &'static str,
    color: [f32; 3],
    vdw: f32,
}

const ELEMENTS: &[ElementStyle] = &[
    ElementStyle { symbol: "H", color: [0.9, 0.9, 0.9], vdw: 1.1 },
    ElementStyle { symbol: "C", color: [0.56, 0.56, 0.56], vdw: 1.7 },
    ElementStyle { symbol: "N", color: [0.19, 0.31, 0.97], vdw: 1.55 },
    ElementStyle { symbol: "O", color: [1.0, 0.05, 0.05], vdw: 1.52 },
    ElementStyle { symbol: "F", color: [0.56, 0.88, 0.31], vdw: 1.47 },
    ElementStyle { symbol: "NA", color: [0.67, 0.36, 0.95], vdw: 2.27 },
    ElementStyle { symbol: "MG", color: [0.54, 1.0, 0.0], vdw: 1.73 },
    ElementStyle { symbol: "P", color: [1.0, 0.5, 0.0], vdw: 1.8 },
    ElementStyle { symbol: "S", color: [1.0, 1.0, 0.19], vdw: 1.8 },
    ElementStyle { symbol: "CL", color: [0.12, 0.94, 0.12], vdw: 1.75 },
    ElementStyle { symbol: "K", color: [0.56, 0.25, 0.83], vdw: 2.75 },
    ElementStyle { symbol: "CA", color: [0.24, 1.0, 0.0], vdw: 2.31 },
    ElementStyle { symbol: "MN", color: [0.61, 0.48, 0.78], vdw: 2.0 },
    ElementStyle { symbol: "FE", color: [0.88, 0.4, 0.2], vdw: 2.0 },
    ElementStyle { symbol: "CO", color: [0.94, 0.56, 0.63], vdw: 2.0 },
    ElementStyle { symbol: "NI", color: [0.31, 0.82, 0.31], vdw: 1.63 },
    ElementStyle { symbol: "CU", color: [0.78, 0.5, 0.2], vdw: 1.4 },
    ElementStyle { symbol: "ZN", color: [0.49, 0.5, 0.69], vdw: 1.39 },
    ElementStyle { symbol: "SE", color: [1.0, 0.63, 0.0], vdw: 1.9 },
    ElementStyle { symbol: "BR", color: [0.65, 0.16, 0.16], vdw: 1.85 },
    ElementStyle { symbol: "I", color: [0.58, 0.0, 0.58], vdw: 1.98 },
];

const UNKNOWN_COLOR: [f32; 3] = [1.0, 0.08, 0.58];
const UNKNOWN_VDW: f32 = 1.7;

fn style(symbol: &str) -> Option<&'static ElementStyle> {
    ELEMENTS
        .iter()
        .find(|e| e.symbol.eq_ignore_ascii_case(symbol.trim()))
}

/// CPK color of an element symbol; unknown elements are hot pink.
#[must_use]
pub fn element_color(symbol: &str) -> [f32; 3] {
    style(symbol).map_or(UNKNOWN_COLOR, |e| e.color)
}

/// Van der Waals radius in angstroms.
#[must_use]
pub fn vdw_radius(symbol: &str) -> f32 {
    style(symbol).map_or(UNKNOWN_VDW, |e| e.vdw)
}
