use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
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
// Category → colour
// ---------------------------------------------------------------------------

/// Assigns a distinct colour to each category label, in first-seen order,
/// so legend order follows the data.
#[derive(Debug, Clone)]
pub struct CategoryColors {
    order: Vec<String>,
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl CategoryColors {
    pub fn new<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let mut order: Vec<String> = Vec::new();
        for label in labels {
            if !order.iter().any(|l| l == label) {
                order.push(label.to_string());
            }
        }
        let mapping = order
            .iter()
            .cloned()
            .zip(generate_palette(order.len()))
            .collect();

        CategoryColors {
            order,
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Categories in first-seen order.
    pub fn labels(&self) -> &[String] {
        &self.order
    }
}
