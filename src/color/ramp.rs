//! Piecewise-linear color ramps.

/// A color ramp defined by N evenly-spaced color stops.
/// `t = 0` maps to the first color, `t = 1` maps to the last.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorRamp {
    stops: Vec<[f32; 3]>,
}

impl ColorRamp {
    /// Ramp through `stops`. A single stop gives a constant ramp.
    #[must_use]
    pub fn new(stops: Vec<[f32; 3]>) -> Self {
        Self { stops }
    }

    /// Blue → cyan → green → yellow → red, used for sequence position.
    #[must_use]
    pub fn rainbow() -> Self {
        Self::new(vec![
            [0.0, 0.0, 1.0],
            [0.0, 1.0, 1.0],
            [0.0, 1.0, 0.0],
            [1.0, 1.0, 0.0],
            [1.0, 0.0, 0.0],
        ])
    }

    /// Interpolate the ramp at position `t` in [0, 1].
    #[must_use]
    pub fn sample(&self, t: f32) -> [f32; 3] {
        match self.stops.as_slice() {
            [] => [0.5, 0.5, 0.5],
            [only] => *only,
            stops => {
                let t = t.clamp(0.0, 1.0);
                let n = stops.len() - 1;
                let scaled = t * n as f32;
                let idx = (scaled as usize).min(n - 1);
                let frac = scaled - idx as f32;

                let a = &stops[idx];
                let b = &stops[idx + 1];
                [
                    a[0] + (b[0] - a[0]) * frac,
                    a[1] + (b[1] - a[1]) * frac,
                    a[2] + (b[2] - a[2]) * frac,
                ]
            }
        }
    }
}

impl Default for ColorRamp {
    fn default() -> Self {
        Self::rainbow()
    }
}
