use eframe::egui::Color32;
use palette::{LinSrgb, Mix, Srgb};

/// Outline for the company the user asked about.
pub const HIGHLIGHT: Color32 = Color32::from_rgb(0xFF, 0xD7, 0x00);

/// Histogram bar fill (sky blue).
pub const HISTOGRAM_FILL: Color32 = Color32::from_rgb(0x87, 0xCE, 0xEB);

/// Anchor colours of the viridis colour map, dark purple to yellow.
const VIRIDIS: [(u8, u8, u8); 5] = [
    (0x44, 0x01, 0x54),
    (0x3B, 0x52, 0x8B),
    (0x21, 0x90, 0x8C),
    (0x5D, 0xC8, 0x63),
    (0xFD, 0xE7, 0x25),
];

/// Light teal (#5A9) fading into near-black.
const TEAL_TO_DARK: [(u8, u8, u8); 2] = [(0x55, 0xAA, 0x99), (0x26, 0x27, 0x30)];

// ---------------------------------------------------------------------------
// Palette generators
// ---------------------------------------------------------------------------

/// `n` colours sampled evenly along viridis, for the revenue bars.
pub fn viridis(n: usize) -> Vec<Color32> {
    ramp(&VIRIDIS, n)
}

/// `n` colours from light teal to dark, for the profit-share slices.
pub fn teal_ramp(n: usize) -> Vec<Color32> {
    ramp(&TEAL_TO_DARK, n)
}

/// Sample `n` colours along a piecewise-linear gradient through `stops`,
/// mixing in linear RGB.
fn ramp(stops: &[(u8, u8, u8)], n: usize) -> Vec<Color32> {
    if n == 0 || stops.is_empty() {
        return Vec::new();
    }
    let linear: Vec<LinSrgb> = stops
        .iter()
        .map(|&(r, g, b)| Srgb::new(r, g, b).into_format::<f32>().into_linear())
        .collect();
    let segments = (linear.len() - 1).max(1);

    (0..n)
        .map(|i| {
            let t = if n == 1 { 0.0 } else { i as f32 / (n - 1) as f32 };
            let pos = t * segments as f32;
            let seg = (pos.floor() as usize).min(linear.len().saturating_sub(2));
            let mixed = if linear.len() == 1 {
                linear[0]
            } else {
                linear[seg].mix(linear[seg + 1], pos - seg as f32)
            };
            let rgb: Srgb<u8> = Srgb::<f32>::from_linear(mixed).into_format();
            Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_hits_both_ends() {
        let colors = viridis(5);
        assert_eq!(colors.len(), 5);
        assert_eq!(colors[0], Color32::from_rgb(0x44, 0x01, 0x54));
        assert_eq!(colors[4], Color32::from_rgb(0xFD, 0xE7, 0x25));
    }

    #[test]
    fn single_and_empty() {
        assert!(teal_ramp(0).is_empty());
        assert_eq!(teal_ramp(1), vec![Color32::from_rgb(0x55, 0xAA, 0x99)]);
    }
}
