use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues, starting
/// at `hue_offset` degrees.
pub fn generate_palette(n: usize, hue_offset: f32) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (hue_offset + (i as f32 / n as f32) * 360.0) % 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Plot theme
// ---------------------------------------------------------------------------

/// Colours used by the chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotTheme {
    pub points: Color32,
    pub curve: Color32,
}

impl Default for PlotTheme {
    fn default() -> Self {
        // Blue points, orange curve.
        Self::from_hue(210.0)
    }
}

impl PlotTheme {
    /// Two complementary colours, the first at `hue` degrees.
    pub fn from_hue(hue: f32) -> Self {
        let colors = generate_palette(2, hue);
        PlotTheme {
            points: colors[0],
            curve: colors[1],
        }
    }
}
