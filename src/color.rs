use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Season;

// ---------------------------------------------------------------------------
// Sequential palette generator
// ---------------------------------------------------------------------------

/// Generates `n` shades of blue, light to dark.
pub fn blues(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let t = if n == 1 { 0.5 } else { i as f32 / (n - 1) as f32 };
            let lightness = 0.78 - 0.5 * t;
            let hsl = Hsl::new(210.0_f32, 0.7, lightness);
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
// Season → Color32
// ---------------------------------------------------------------------------

/// Fixed colour per season, so a season keeps its colour whatever the
/// current filters leave in the chart.
#[derive(Debug, Clone)]
pub struct SeasonColors {
    mapping: BTreeMap<Season, Color32>,
}

impl Default for SeasonColors {
    fn default() -> Self {
        let mapping = Season::ALL
            .into_iter()
            .zip(blues(Season::ALL.len()))
            .collect();
        SeasonColors { mapping }
    }
}

impl SeasonColors {
    pub fn color_for(&self, season: Season) -> Color32 {
        self.mapping.get(&season).copied().unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blues_get_darker() {
        let shades = blues(5);
        assert_eq!(shades.len(), 5);
        let brightness = |c: &Color32| c.r() as u32 + c.g() as u32 + c.b() as u32;
        for pair in shades.windows(2) {
            assert!(brightness(&pair[0]) > brightness(&pair[1]));
        }
        assert!(blues(0).is_empty());
        assert_eq!(blues(1).len(), 1);
    }

    #[test]
    fn every_season_has_a_distinct_colour() {
        let colors = SeasonColors::default();
        let mut seen: Vec<Color32> = Season::ALL.iter().map(|s| colors.color_for(*s)).collect();
        seen.dedup();
        assert_eq!(seen.len(), Season::ALL.len());
    }
}
