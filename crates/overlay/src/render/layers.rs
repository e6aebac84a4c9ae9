use std::fmt::Write;

use hull::fmt_coord;
use serde::Serialize;
use svgtypes::{SimplePathSegment, SimplifyingPathParser};

use crate::{
    document::Element,
    error::{OverlayError, Result},
    render::{color::Rgb, style::RenderStyle},
};

/// Offset into the noise stream reserved for color channels
const COLOR_NOISE_OFFSET: usize = 100_000;

/// One translucent copy of a hull outline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layer {
    pub index: usize,
    pub path: String,
    pub opacity: f64,
    pub color: String,
}

impl Layer {
    pub fn to_element(&self, style: &RenderStyle) -> Element {
        Element::new("path")
            .attr("d", self.path.as_str())
            .attr("fill", self.color.as_str())
            .attr("fill-opacity", fmt_coord(self.opacity))
            .attr("stroke", self.color.as_str())
            .attr("stroke-width", fmt_coord(style.stroke_width))
            .attr("stroke-opacity", fmt_coord(style.stroke_opacity))
            .attr("stroke-linejoin", "round")
    }
}

/// Deterministic noise in [-1, 1) keyed by layer and coordinate index.
///
/// `fract(sin(layer * 12.9898 + index * 78.233) * 43758.5453)`, rescaled.
pub fn noise(layer: usize, index: usize) -> f64 {
    let v = ((layer as f64) * 12.9898 + (index as f64) * 78.233).sin() * 43758.5453;
    2.0 * (v - v.floor()) - 1.0
}

/// Positional jitter amplitude for a layer: zero for layer 0, then growing
/// by `jitter_step` per layer up to `jitter_max`.
pub fn jitter_magnitude(layer: usize, style: &RenderStyle) -> f64 {
    (layer as f64 * style.jitter_step).min(style.jitter_max)
}

pub fn layer_opacity(layer: usize, style: &RenderStyle) -> f64 {
    (style.base_opacity - layer as f64 * style.opacity_step).max(style.opacity_floor)
}

fn jittered_color(base: Rgb, layer: usize, style: &RenderStyle) -> Rgb {
    if layer == 0 {
        return base;
    }
    let amplitude = style.color_jitter as f64;
    let delta = |channel: usize| (noise(layer, COLOR_NOISE_OFFSET + channel) * amplitude).round() as i32;
    base.offset([delta(0), delta(1), delta(2)])
}

/// Re-emit `d` with every coordinate moved by the layer's noise
fn jitter_path(d: &str, layer: usize, magnitude: f64) -> Result<String> {
    let mut out = String::with_capacity(d.len() + 16);
    let mut index = 0usize;
    let mut shift = |value: f64| {
        let moved = value + noise(layer, index) * magnitude;
        index += 1;
        fmt_coord(moved)
    };

    for segment in SimplifyingPathParser::from(d) {
        let segment = segment.map_err(|e| OverlayError::Hull(hull::HullError::InvalidPath(e.to_string())))?;
        match segment {
            SimplePathSegment::MoveTo { x, y } => {
                let _ = write!(out, "M{},{}", shift(x), shift(y));
            }
            SimplePathSegment::LineTo { x, y } => {
                let _ = write!(out, "L{},{}", shift(x), shift(y));
            }
            SimplePathSegment::Quadratic { x1, y1, x, y } => {
                let _ = write!(out, "Q{},{},{},{}", shift(x1), shift(y1), shift(x), shift(y));
            }
            SimplePathSegment::CurveTo { x1, y1, x2, y2, x, y } => {
                let _ = write!(
                    out,
                    "C{},{},{},{},{},{}",
                    shift(x1),
                    shift(y1),
                    shift(x2),
                    shift(y2),
                    shift(x),
                    shift(y)
                );
            }
            SimplePathSegment::ClosePath => out.push('Z'),
        }
    }
    Ok(out)
}

/// Build `layer_count` translucent copies of a path.
///
/// Layer 0 is the untouched path; later layers get deterministic positional
/// and color jitter with decreasing opacity, so identical input always
/// yields identical output.
pub fn render_layers(d: &str, base_color: &str, layer_count: usize, style: &RenderStyle) -> Result<Vec<Layer>> {
    let base = Rgb::parse(base_color)?;

    (0..layer_count)
        .map(|index| {
            let path = if index == 0 {
                d.to_string()
            } else {
                jitter_path(d, index, jitter_magnitude(index, style))?
            };
            Ok(Layer {
                index,
                path,
                opacity: layer_opacity(index, style),
                color: jittered_color(base, index, style).to_hex(),
            })
        })
        .collect()
}
