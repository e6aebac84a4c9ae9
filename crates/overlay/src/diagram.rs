//! Diagram parser: indexes entity groups of an SVG by an identifying
//! attribute and computes document-space bounding boxes for their members.

use std::{path::Path, str::FromStr};

use geo::AffineTransform;
use hull::{BoundingBox, Point};
use serde::Serialize;
use strum::{Display, EnumString, IntoStaticStr};
use tracing::{debug, info};

use crate::{
    document::{SvgDocument, parse_xml},
    error::{OverlayError, Result},
};

/// Attribute PlantUML-style renderers put on entity groups
pub const DEFAULT_ID_ATTRIBUTE: &str = "data-entity";

/// Average glyph advance as a fraction of the font size
const GLYPH_WIDTH_EM: f64 = 0.6;
/// Distance from the text baseline to the top of the glyph box, in em
const ASCENT_EM: f64 = 0.8;
const DEFAULT_FONT_SIZE: f64 = 12.0;

/// Geometric element classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum ElementKind {
    Rect,
    Circle,
    Ellipse,
    Line,
    Polyline,
    Polygon,
    Path,
    Text,
    Image,
    Use,
}

/// One geometric element belonging to an entity group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementRecord {
    pub kind: ElementKind,
    pub attributes: Vec<(String, String)>,
    pub bbox: BoundingBox,
}

impl ElementRecord {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// A named cluster of diagram elements
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityGroup {
    pub name: String,
    pub elements: Vec<ElementRecord>,
    /// Union of the member boxes
    pub bbox: BoundingBox,
}

impl EntityGroup {
    /// Centers of the member bounding boxes
    pub fn representative_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.elements.iter().map(|e| e.bbox.center())
    }
}

/// Whether a group name matches an exact name or a trailing-`*` prefix pattern
pub fn name_matches(pattern: &str, name: &str) -> bool {
    match pattern.strip_suffix('*') {
        Some(prefix) => name.starts_with(prefix),
        None => pattern == name,
    }
}

/// A parsed diagram and its entity groups, in document order
#[derive(Debug, Clone)]
pub struct Diagram {
    document: SvgDocument,
    groups: Vec<EntityGroup>,
    id_attribute: String,
}

impl Diagram {
    /// Load and parse a diagram from disk
    pub fn load(path: impl AsRef<Path>, id_attribute: &str) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(OverlayError::NotFound(format!(
                "diagram file {}",
                path.display()
            )));
        }
        let bytes = std::fs::read(path)?;
        let text = String::from_utf8(bytes).map_err(|e| {
            OverlayError::MalformedDocument(format!("{}: {e}", path.display()))
        })?;
        let diagram = Self::parse(&text, id_attribute)?;
        info!(
            path = %path.display(),
            groups = diagram.groups.len(),
            "loaded diagram"
        );
        Ok(diagram)
    }

    pub fn parse(text: &str, id_attribute: &str) -> Result<Self> {
        let xml = parse_xml(text)?;

        let mut groups: Vec<EntityGroup> = Vec::new();
        for node in xml.descendants().filter(|n| n.is_element()) {
            let Some(name) = node.attribute(id_attribute) else {
                continue;
            };
            if groups.iter().any(|g| g.name == name) {
                return Err(OverlayError::MalformedDocument(format!(
                    "duplicate entity group '{name}'"
                )));
            }

            let elements: Vec<ElementRecord> = node
                .descendants()
                .filter(|n| n.is_element())
                .filter_map(element_record)
                .collect();

            let bbox = elements
                .iter()
                .map(|e| e.bbox)
                .reduce(|acc, b| acc.union(&b))
                .unwrap_or_default();

            debug!(group = name, elements = elements.len(), "indexed entity group");
            groups.push(EntityGroup {
                name: name.to_string(),
                elements,
                bbox,
            });
        }

        Ok(Self {
            document: SvgDocument::from_roxmltree(&xml),
            groups,
            id_attribute: id_attribute.to_string(),
        })
    }

    pub fn document(&self) -> &SvgDocument {
        &self.document
    }

    pub fn into_document(self) -> SvgDocument {
        self.document
    }

    pub fn id_attribute(&self) -> &str {
        &self.id_attribute
    }

    pub fn groups(&self) -> impl Iterator<Item = &EntityGroup> {
        self.groups.iter()
    }

    pub fn group(&self, name: &str) -> Option<&EntityGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn group_names(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.name.as_str()).collect()
    }

    /// Groups matching a name or prefix pattern, in document order
    pub fn groups_matching<'a>(&'a self, pattern: &'a str) -> impl Iterator<Item = &'a EntityGroup> + 'a {
        self.groups.iter().filter(move |g| name_matches(pattern, &g.name))
    }

    /// Representative points of every group matching any of `names`.
    ///
    /// Names without a matching group are skipped; an empty result is left
    /// for the hull builder to reject.
    pub fn groups_by_names<S: AsRef<str>>(&self, names: &[S]) -> Vec<Point> {
        let mut points = Vec::new();
        for group in &self.groups {
            if names.iter().any(|n| name_matches(n.as_ref(), &group.name)) {
                points.extend(group.representative_points());
            }
        }
        for name in names {
            if self.groups_matching(name.as_ref()).next().is_none() {
                debug!(name = name.as_ref(), "no entity group matches");
            }
        }
        points
    }

    /// Bounding boxes of every indexed element, for label collision checks
    pub fn element_boxes(&self) -> Vec<BoundingBox> {
        self.groups
            .iter()
            .flat_map(|g| g.elements.iter().map(|e| e.bbox))
            .collect()
    }
}

fn parse_transform(value: &str) -> Option<AffineTransform> {
    let t = svgtypes::Transform::from_str(value).ok()?;
    // SVG matrix(a b c d e f) maps x' = a*x + c*y + e, y' = b*x + d*y + f
    Some(AffineTransform::new(t.a, t.c, t.e, t.b, t.d, t.f))
}

/// Transform from the node's user space to document space
fn current_transform(node: roxmltree::Node<'_, '_>) -> AffineTransform {
    let mut chain: Vec<AffineTransform> = node
        .ancestors()
        .filter(|n| n.is_element())
        .filter_map(|n| n.attribute("transform").and_then(parse_transform))
        .collect();
    chain.reverse();
    // compose applies its argument first, so inner transforms act before outer ones
    chain
        .iter()
        .fold(AffineTransform::identity(), |outer, inner| outer.compose(inner))
}

fn number(node: roxmltree::Node<'_, '_>, name: &str) -> Option<f64> {
    let value = node.attribute(name)?;
    // Coordinate lists (text x="1 2 3") use their first entry
    let first = value.split([' ', ',']).find(|s| !s.is_empty())?;
    svgtypes::Length::from_str(first).ok().map(|l| l.number)
}

fn number_or_zero(node: roxmltree::Node<'_, '_>, name: &str) -> f64 {
    number(node, name).unwrap_or(0.0)
}

fn style_property<'a>(node: roxmltree::Node<'a, '_>, property: &str) -> Option<&'a str> {
    node.attribute("style")?.split(';').find_map(|decl| {
        let (key, value) = decl.split_once(':')?;
        (key.trim() == property).then(|| value.trim())
    })
}

fn font_size(node: roxmltree::Node<'_, '_>) -> f64 {
    node.ancestors()
        .filter(|n| n.is_element())
        .find_map(|n| {
            let raw = n.attribute("font-size").or_else(|| style_property(n, "font-size"))?;
            svgtypes::Length::from_str(raw).ok().map(|l| l.number)
        })
        .unwrap_or(DEFAULT_FONT_SIZE)
}

/// Untransformed geometry of an element in its own user space
fn local_points(node: roxmltree::Node<'_, '_>, kind: ElementKind) -> Option<Vec<Point>> {
    let rect = |x: f64, y: f64, w: f64, h: f64| {
        BoundingBox::new(x, y, w, h).corners().to_vec()
    };

    let points = match kind {
        ElementKind::Rect | ElementKind::Image | ElementKind::Use => {
            let width = number(node, "width");
            let height = number(node, "height");
            if kind == ElementKind::Use && (width.is_none() || height.is_none()) {
                return None;
            }
            rect(
                number_or_zero(node, "x"),
                number_or_zero(node, "y"),
                width.unwrap_or(0.0),
                height.unwrap_or(0.0),
            )
        }
        ElementKind::Circle => {
            let r = number_or_zero(node, "r");
            rect(number_or_zero(node, "cx") - r, number_or_zero(node, "cy") - r, 2.0 * r, 2.0 * r)
        }
        ElementKind::Ellipse => {
            let rx = number_or_zero(node, "rx");
            let ry = number_or_zero(node, "ry");
            rect(number_or_zero(node, "cx") - rx, number_or_zero(node, "cy") - ry, 2.0 * rx, 2.0 * ry)
        }
        ElementKind::Line => vec![
            Point::new(number_or_zero(node, "x1"), number_or_zero(node, "y1")),
            Point::new(number_or_zero(node, "x2"), number_or_zero(node, "y2")),
        ],
        ElementKind::Polyline | ElementKind::Polygon => {
            svgtypes::PointsParser::from(node.attribute("points")?)
                .map(|(x, y)| Point::new(x, y))
                .collect()
        }
        ElementKind::Path => {
            use svgtypes::{SimplePathSegment, SimplifyingPathParser};

            // Control points bound the curve, so this box is conservative
            let mut points = Vec::new();
            for segment in SimplifyingPathParser::from(node.attribute("d")?) {
                match segment.ok()? {
                    SimplePathSegment::MoveTo { x, y } | SimplePathSegment::LineTo { x, y } => {
                        points.push(Point::new(x, y));
                    }
                    SimplePathSegment::Quadratic { x1, y1, x, y } => {
                        points.push(Point::new(x1, y1));
                        points.push(Point::new(x, y));
                    }
                    SimplePathSegment::CurveTo { x1, y1, x2, y2, x, y } => {
                        points.push(Point::new(x1, y1));
                        points.push(Point::new(x2, y2));
                        points.push(Point::new(x, y));
                    }
                    SimplePathSegment::ClosePath => {}
                }
            }
            points
        }
        ElementKind::Text => {
            let size = font_size(node);
            let content: String = node
                .descendants()
                .filter(|n| n.is_text())
                .filter_map(|n| n.text())
                .collect();
            let width = number(node, "textLength")
                .unwrap_or_else(|| content.trim().chars().count() as f64 * size * GLYPH_WIDTH_EM);
            let x = number_or_zero(node, "x");
            let left = match node.attribute("text-anchor").or_else(|| style_property(node, "text-anchor")) {
                Some("middle") => x - width / 2.0,
                Some("end") => x - width,
                _ => x,
            };
            rect(left, number_or_zero(node, "y") - size * ASCENT_EM, width, size)
        }
    };

    (!points.is_empty()).then_some(points)
}

fn element_record(node: roxmltree::Node<'_, '_>) -> Option<ElementRecord> {
    let kind = ElementKind::from_str(node.tag_name().name()).ok()?;
    let local = local_points(node, kind)?;

    let transform = current_transform(node);
    let transformed: Vec<Point> = local.into_iter().map(|p| transform.apply(p.into()).into()).collect();
    let bbox = BoundingBox::from_points(&transformed)?;

    let attributes = node
        .attributes()
        .map(|a| (a.name().to_string(), a.value().to_string()))
        .collect();

    Some(ElementRecord {
        kind,
        attributes,
        bbox,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIAGRAM: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="400" height="300">
  <g data-entity="Carlos">
    <rect x="10" y="10" width="100" height="40"/>
    <text x="20" y="30" font-size="10" textLength="50">Carlos</text>
  </g>
  <g data-entity="Carl" transform="translate(200,0)">
    <circle cx="50" cy="50" r="10"/>
    <g transform="scale(2)"><rect x="0" y="0" width="10" height="10"/></g>
  </g>
  <g data-entity="Luca">
    <path d="M 0 200 L 100 200 L 100 250 Z"/>
    <polygon points="120,200 140,200 130,220"/>
    <line x1="0" y1="260" x2="40" y2="260"/>
    <title>not geometry</title>
  </g>
</svg>"#;

    fn diagram() -> Diagram {
        Diagram::parse(DIAGRAM, DEFAULT_ID_ATTRIBUTE).unwrap()
    }

    #[test]
    fn test_groups_indexed_in_document_order() {
        assert_eq!(diagram().group_names(), vec!["Carlos", "Carl", "Luca"]);
    }

    #[test]
    fn test_rect_and_text_boxes() {
        let d = diagram();
        let carlos = d.group("Carlos").unwrap();
        assert_eq!(carlos.elements.len(), 2);
        assert_eq!(carlos.elements[0].kind, ElementKind::Rect);
        assert_eq!(carlos.elements[0].bbox, BoundingBox::new(10.0, 10.0, 100.0, 40.0));

        let text = &carlos.elements[1].bbox;
        assert_eq!(text.x, 20.0);
        assert_eq!(text.width, 50.0);
        assert!((text.y - 22.0).abs() < 1e-9);
        assert_eq!(carlos.bbox, BoundingBox::new(10.0, 10.0, 100.0, 40.0));
    }

    #[test]
    fn test_nested_transforms_are_applied() {
        let d = diagram();
        let carl = d.group("Carl").unwrap();
        assert_eq!(carl.elements[0].bbox, BoundingBox::new(240.0, 40.0, 20.0, 20.0));
        assert_eq!(carl.elements[1].bbox, BoundingBox::new(200.0, 0.0, 20.0, 20.0));
    }

    #[test]
    fn test_matrix_transform_shears_box() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg">
            <g data-entity="sheared" transform="translate(5, 0)">
              <rect transform="matrix(1 0 1 1 0 0)" x="0" y="10" width="10" height="10"/>
            </g>
        </svg>"#;
        let d = Diagram::parse(svg, DEFAULT_ID_ATTRIBUTE).unwrap();
        let rect = &d.group("sheared").unwrap().elements[0];
        // x' = x + y, then shifted right by 5
        assert_eq!(rect.bbox, BoundingBox::new(15.0, 10.0, 20.0, 10.0));
    }

    #[test]
    fn test_path_polygon_and_line_boxes() {
        let d = diagram();
        let luca = d.group("Luca").unwrap();
        let kinds: Vec<ElementKind> = luca.elements.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![ElementKind::Path, ElementKind::Polygon, ElementKind::Line]);
        assert_eq!(luca.elements[0].bbox, BoundingBox::new(0.0, 200.0, 100.0, 50.0));
        assert_eq!(luca.elements[1].bbox, BoundingBox::new(120.0, 200.0, 20.0, 20.0));
        assert_eq!(luca.elements[2].bbox.height, 0.0);
    }

    #[test]
    fn test_groups_by_names_uses_element_centers() {
        let d = diagram();
        let points = d.groups_by_names(&["Carlos"]);
        assert_eq!(points, vec![Point::new(60.0, 30.0), Point::new(45.0, 27.0)]);
    }

    #[test]
    fn test_wildcard_matches_prefix() {
        let d = diagram();
        let names: Vec<&str> = d.groups_matching("Carl*").map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Carlos", "Carl"]);
        assert_eq!(d.groups_by_names(&["Carl*"]).len(), 4);
        assert!(name_matches("*", "anything"));
        assert!(!name_matches("Carl", "Carlos"));
    }

    #[test]
    fn test_unknown_names_are_skipped() {
        let d = diagram();
        assert!(d.groups_by_names(&["Nobody"]).is_empty());
        assert_eq!(d.groups_by_names(&["Nobody", "Carl"]).len(), 2);
    }

    #[test]
    fn test_custom_id_attribute() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"><g id="ent_A"><rect width="4" height="4"/></g></svg>"#;
        let d = Diagram::parse(svg, "id").unwrap();
        assert_eq!(d.group_names(), vec!["ent_A"]);
        assert_eq!(d.id_attribute(), "id");
    }

    #[test]
    fn test_duplicate_group_names_rejected() {
        let svg = r#"<svg><g data-entity="A"/><g data-entity="A"/></svg>"#;
        let err = Diagram::parse(svg, DEFAULT_ID_ATTRIBUTE).unwrap_err();
        assert!(matches!(err, OverlayError::MalformedDocument(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Diagram::load("/definitely/not/here.svg", DEFAULT_ID_ATTRIBUTE).unwrap_err();
        assert!(matches!(err, OverlayError::NotFound(_)));
    }

    #[test]
    fn test_non_utf8_file_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.svg");
        std::fs::write(
            &path,
            b"<svg xmlns=\"http://www.w3.org/2000/svg\"><text data-entity=\"caf\xe9\">x</text></svg>",
        )
        .unwrap();
        let err = Diagram::load(&path, DEFAULT_ID_ATTRIBUTE).unwrap_err();
        assert!(matches!(err, OverlayError::MalformedDocument(_)));
    }

    #[test]
    fn test_unparseable_content() {
        let err = Diagram::parse("not xml at all", DEFAULT_ID_ATTRIBUTE).unwrap_err();
        assert!(matches!(err, OverlayError::MalformedDocument(_)));
    }
}
