pub mod color;
pub mod label;
pub mod layers;
pub mod style;

pub use color::Rgb;
pub use label::{LabelPlacer, label_element};
pub use layers::{Layer, jitter_magnitude, layer_opacity, noise, render_layers};
pub use style::{LabelStyle, RenderStyle};
