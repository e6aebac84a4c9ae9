//! Assembling rendered hulls into output markup.

use hull::{Point, SplineConfig, centroid, generate_spline};
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    document::{Element, Node, SvgDocument},
    error::Result,
    render::{LabelPlacer, RenderStyle, label_element, render_layers},
};

/// Final geometry and presentation of one group, ready for composition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderResult {
    pub name: String,
    /// Text shown on the label, usually the group or focus area name
    pub label: String,
    pub points: Vec<Point>,
    pub color: String,
    pub url: Option<String>,
    pub centroid: Point,
}

impl RenderResult {
    pub fn new(name: impl Into<String>, points: Vec<Point>, color: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            centroid: centroid(&points),
            points,
            color: color.into(),
            url: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_url(mut self, url: Option<String>) -> Self {
        self.url = url;
        self
    }
}

/// Rendered pieces of one group before they are placed in a document
struct GroupMarkup {
    layers: Element,
    label: Element,
    url: Option<String>,
}

fn link(url: Option<&str>, content: Element) -> Element {
    match url {
        Some(href) => Element::new("a").attr("href", href).child(content),
        None => content,
    }
}

fn render_group(
    result: &RenderResult,
    spline: &SplineConfig,
    style: &RenderStyle,
    placer: Option<&mut LabelPlacer>,
) -> Result<GroupMarkup> {
    let d = generate_spline(&result.points, spline)?;
    let layers = render_layers(&d, &result.color, style.layer_count, style)?;

    let mut group = Element::new("g")
        .attr("class", "hull-layers")
        .attr("data-hull", result.name.as_str());
    for layer in &layers {
        group = group.child(layer.to_element(style));
    }

    let position = match placer {
        Some(placer) => {
            let (width, height) = style.label.estimate_size(&result.label);
            placer.place(result.centroid, width, height)
        }
        None => result.centroid,
    };

    debug!(
        name = %result.name,
        layers = layers.len(),
        x = position.x,
        y = position.y,
        "rendered group"
    );

    Ok(GroupMarkup {
        layers: group,
        label: label_element(&result.label, position, &style.label),
        url: result.url.clone(),
    })
}

/// Compose rendered hulls into markup.
///
/// Without a base document every group is emitted as a standalone fragment
/// (layers then label), in the order of `results`. With a base document the
/// layer groups become the first children of its `<svg>` root, so they sit
/// beneath the diagram, and the labels are appended as its last children.
/// A group with a url has each of its pieces wrapped in `<a href>`.
///
/// Passing a [`LabelPlacer`] moves labels away from each other and from the
/// placer's obstacles; otherwise labels sit exactly on the centroid.
pub fn compose(
    results: &[RenderResult],
    spline: &SplineConfig,
    base: Option<&SvgDocument>,
    style: &RenderStyle,
    mut placer: Option<LabelPlacer>,
) -> Result<String> {
    // Validate the target before any rendering work
    let mut document = base.cloned();
    if let Some(document) = document.as_mut() {
        document.svg_root_mut()?;
    }

    let groups = results
        .iter()
        .map(|result| render_group(result, spline, style, placer.as_mut()))
        .collect::<Result<Vec<_>>>()?;

    let Some(mut document) = document else {
        let mut out = String::new();
        for group in groups {
            let url = group.url.as_deref();
            let fragment = Element::new("g")
                .attr("class", "hull")
                .child(group.layers)
                .child(group.label);
            link(url, fragment).write_to(&mut out);
        }
        info!(groups = results.len(), "composed fragments");
        return Ok(out);
    };

    let root = document.svg_root_mut()?;
    let mut layer_nodes = Vec::with_capacity(groups.len());
    for group in groups {
        let url = group.url.as_deref();
        layer_nodes.push(Node::Element(link(url, group.layers)));
        root.children.push(Node::Element(link(url, group.label)));
    }
    root.children.splice(0..0, layer_nodes);

    info!(groups = results.len(), "composed into base document");
    Ok(document.to_xml())
}
