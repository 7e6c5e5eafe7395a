use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// HSL → Color32
// ---------------------------------------------------------------------------

fn hsl(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    Color32::from_rgb(
        (rgb.red * 255.0).round() as u8,
        (rgb.green * 255.0).round() as u8,
        (rgb.blue * 255.0).round() as u8,
    )
}

fn with_alpha(color: Color32, opacity: f32) -> Color32 {
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

// ---------------------------------------------------------------------------
// Chart theme
// ---------------------------------------------------------------------------

/// Colours used by the chart painter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub marker_fill: Color32,
    pub marker_stroke: Color32,
    pub marker_text: Color32,
    pub label_active: Color32,
    pub label_inactive: Color32,
    pub axis: Color32,
}

impl Theme {
    /// Light blue markers with white abbreviations.
    pub fn new(marker_opacity: f32) -> Self {
        Self {
            marker_fill: with_alpha(hsl(198.0, 0.47, 0.68), marker_opacity),
            marker_stroke: hsl(0.0, 0.0, 0.89),
            marker_text: Color32::WHITE,
            label_active: hsl(0.0, 0.0, 0.92),
            label_inactive: hsl(0.0, 0.0, 0.55),
            axis: hsl(0.0, 0.0, 0.75),
        }
    }
}
