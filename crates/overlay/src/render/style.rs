use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Immutable styling for hull layers and labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RenderStyle {
    /// Number of translucent copies drawn per hull, the untouched outline included
    pub layer_count: usize,
    /// Opacity of layer 0
    pub base_opacity: f64,
    /// Opacity lost per additional layer
    pub opacity_step: f64,
    /// Lowest opacity any layer is drawn with
    pub opacity_floor: f64,
    /// Jitter added per layer index, in document units
    pub jitter_step: f64,
    /// Upper bound for the positional jitter
    pub jitter_max: f64,
    /// Maximum per-channel color deviation (0-255)
    pub color_jitter: u8,
    pub stroke_width: f64,
    pub stroke_opacity: f64,
    pub label: LabelStyle,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            layer_count: 4,
            base_opacity: 0.25,
            opacity_step: 0.05,
            opacity_floor: 0.05,
            jitter_step: 1.5,
            jitter_max: 4.5,
            color_jitter: 12,
            stroke_width: 1.5,
            stroke_opacity: 0.35,
            label: LabelStyle::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LabelStyle {
    pub font_family: String,
    pub font_size: f64,
    pub font_weight: String,
    pub opacity: f64,
    /// Average glyph advance as a fraction of `font_size`, used to size label boxes
    pub glyph_width_em: f64,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            font_family: "Helvetica, Arial, sans-serif".to_string(),
            font_size: 28.0,
            font_weight: "bold".to_string(),
            opacity: 0.35,
            glyph_width_em: 0.6,
        }
    }
}

impl LabelStyle {
    /// Estimated width and height of a rendered label
    pub fn estimate_size(&self, text: &str) -> (f64, f64) {
        let width = text.chars().count() as f64 * self.font_size * self.glyph_width_em;
        (width, self.font_size)
    }
}
