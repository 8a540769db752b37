//! Color mapping for the scatter plot

use egui::Color32;

/// Viridis control points, dark purple to yellow
const VIRIDIS: &[[f32; 3]] = &[
    [68.0, 1.0, 84.0],
    [59.0, 82.0, 139.0],
    [33.0, 145.0, 140.0],
    [94.0, 201.0, 98.0],
    [253.0, 231.0, 37.0],
];

/// Map a normalized value in [0, 1] onto the viridis ramp
pub fn viridis_color(t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let scaled = t * (VIRIDIS.len() - 1) as f32;
    let idx = (scaled.floor() as usize).min(VIRIDIS.len() - 2);
    let s = scaled - idx as f32;

    let lo = VIRIDIS[idx];
    let hi = VIRIDIS[idx + 1];
    Color32::from_rgb(
        (lo[0] + (hi[0] - lo[0]) * s) as u8,
        (lo[1] + (hi[1] - lo[1]) * s) as u8,
        (lo[2] + (hi[2] - lo[2]) * s) as u8,
    )
}

/// Normalize a color value against the observed range; a degenerate
/// range maps everything to the middle of the ramp
pub fn normalize(value: f64, range: Option<(f64, f64)>) -> f32 {
    match range {
        Some((min, max)) if max > min => ((value - min) / (max - min)) as f32,
        _ => 0.5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viridis_endpoints() {
        assert_eq!(viridis_color(0.0), Color32::from_rgb(68, 1, 84));
        assert_eq!(viridis_color(1.0), Color32::from_rgb(253, 231, 37));
    }

    #[test]
    fn test_normalize_degenerate_range() {
        assert_eq!(normalize(5.0, Some((5.0, 5.0))), 0.5);
        assert_eq!(normalize(5.0, None), 0.5);
    }

    #[test]
    fn test_normalize_linear() {
        assert_eq!(normalize(25.0, Some((0.0, 100.0))), 0.25);
    }
}
