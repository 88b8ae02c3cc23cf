use std::collections::HashMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::SplitPartition;

// ---------------------------------------------------------------------------
// Palette generator
// ---------------------------------------------------------------------------

/// `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| hsl_color(i as f32 / n as f32 * 360.0, 0.75, 0.55))
        .collect()
}

fn hsl_color(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Fixed colour per split partition, stable across datasets.
pub fn partition_color(partition: SplitPartition) -> Color32 {
    match partition {
        SplitPartition::Training => hsl_color(210.0, 0.70, 0.55),
        SplitPartition::Validation => hsl_color(35.0, 0.85, 0.55),
        SplitPartition::Testing => hsl_color(140.0, 0.60, 0.45),
    }
}

// ---------------------------------------------------------------------------
// Column colours
// ---------------------------------------------------------------------------

/// Assigns each column of a dataset a distinct colour, in column order.
#[derive(Debug, Clone, Default)]
pub struct ColumnColors {
    mapping: HashMap<String, Color32>,
    default_color: Color32,
}

impl ColumnColors {
    pub fn new(columns: &[String]) -> Self {
        let mapping = columns
            .iter()
            .cloned()
            .zip(generate_palette(columns.len()))
            .collect();
        Self {
            mapping,
            default_color: Color32::LIGHT_BLUE,
        }
    }

    pub fn color_for(&self, column: &str) -> Color32 {
        self.mapping
            .get(column)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colours_are_distinct() {
        let colors = generate_palette(6);
        assert_eq!(colors.len(), 6);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn unknown_column_gets_default() {
        let colors = ColumnColors::new(&["a".to_string(), "b".to_string()]);
        assert_ne!(colors.color_for("a"), colors.color_for("b"));
        assert_eq!(colors.color_for("zzz"), Color32::LIGHT_BLUE);
    }

    #[test]
    fn partitions_have_distinct_colours() {
        let [t, v, s] = SplitPartition::ALL.map(partition_color);
        assert!(t != v && v != s && t != s);
    }
}
