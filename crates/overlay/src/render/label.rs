use hull::{BoundingBox, Point, fmt_coord};
use tracing::debug;

use crate::{document::Element, render::style::LabelStyle};

/// Centered text label for a hull
pub fn label_element(text: &str, position: Point, style: &LabelStyle) -> Element {
    Element::new("text")
        .attr("x", fmt_coord(position.x))
        .attr("y", fmt_coord(position.y))
        .attr("font-family", style.font_family.as_str())
        .attr("font-size", fmt_coord(style.font_size))
        .attr("font-weight", style.font_weight.as_str())
        .attr("fill-opacity", fmt_coord(style.opacity))
        .attr("text-anchor", "middle")
        .attr("dominant-baseline", "middle")
        .text(text)
}

const DIRECTIONS: [(f64, f64); 8] = [
    (1.0, 0.0),
    (1.0, 1.0),
    (0.0, 1.0),
    (-1.0, 1.0),
    (-1.0, 0.0),
    (-1.0, -1.0),
    (0.0, -1.0),
    (1.0, -1.0),
];

/// Bounded search for label positions that avoid already occupied boxes.
///
/// Candidates are the centroid, then the eight compass directions at
/// `step`, `2 * step`, ... up to `max_radius`. When every candidate collides
/// the centroid is used anyway.
#[derive(Debug, Clone)]
pub struct LabelPlacer {
    pub step: f64,
    pub max_radius: f64,
    obstacles: Vec<BoundingBox>,
}

impl Default for LabelPlacer {
    fn default() -> Self {
        Self::new(20.0, 120.0)
    }
}

impl LabelPlacer {
    pub fn new(step: f64, max_radius: f64) -> Self {
        Self {
            step,
            max_radius,
            obstacles: Vec::new(),
        }
    }

    /// Add fixed obstacles such as the diagram's own element boxes
    pub fn with_obstacles(mut self, obstacles: impl IntoIterator<Item = BoundingBox>) -> Self {
        self.obstacles.extend(obstacles);
        self
    }

    pub fn candidates(&self, centroid: Point) -> Vec<Point> {
        let mut candidates = vec![centroid];
        if self.step <= 0.0 {
            return candidates;
        }
        let rings = (self.max_radius / self.step).floor() as usize;
        for ring in 1..=rings {
            let distance = ring as f64 * self.step;
            for (dx, dy) in DIRECTIONS {
                // Diagonals are normalized so every candidate of a ring is equidistant
                let norm = dx.hypot(dy);
                candidates.push(Point::new(
                    centroid.x + dx / norm * distance,
                    centroid.y + dy / norm * distance,
                ));
            }
        }
        candidates
    }

    /// Pick a position for a label of the given size and reserve its box
    pub fn place(&mut self, centroid: Point, width: f64, height: f64) -> Point {
        let chosen = self
            .candidates(centroid)
            .into_iter()
            .find(|c| {
                let bbox = BoundingBox::centered_at(*c, width, height);
                !self.obstacles.iter().any(|o| o.intersects(&bbox))
            })
            .unwrap_or_else(|| {
                debug!(x = centroid.x, y = centroid.y, "no free label position, using centroid");
                centroid
            });

        self.obstacles.push(BoundingBox::centered_at(chosen, width, height));
        chosen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_element_is_centered() {
        let el = label_element("Carlos", Point::new(10.0, 20.5), &LabelStyle::default());
        assert_eq!(el.name, "text");
        assert_eq!(el.get_attr("x"), Some("10"));
        assert_eq!(el.get_attr("y"), Some("20.5"));
        assert_eq!(el.get_attr("text-anchor"), Some("middle"));
        assert_eq!(el.get_attr("dominant-baseline"), Some("middle"));
        assert_eq!(el.text_content(), "Carlos");
    }

    #[test]
    fn test_candidate_count_is_bounded() {
        let placer = LabelPlacer::new(10.0, 35.0);
        // centroid + 3 rings of 8
        assert_eq!(placer.candidates(Point::default()).len(), 25);
    }

    #[test]
    fn test_free_centroid_is_used() {
        let mut placer = LabelPlacer::default();
        let p = placer.place(Point::new(50.0, 50.0), 20.0, 10.0);
        assert_eq!(p, Point::new(50.0, 50.0));
    }

    #[test]
    fn test_second_label_moves_away() {
        let mut placer = LabelPlacer::new(10.0, 100.0);
        let first = placer.place(Point::new(0.0, 0.0), 40.0, 10.0);
        let second = placer.place(Point::new(0.0, 0.0), 40.0, 10.0);
        assert_eq!(first, Point::new(0.0, 0.0));
        assert_ne!(second, first);
        let a = BoundingBox::centered_at(first, 40.0, 10.0);
        let b = BoundingBox::centered_at(second, 40.0, 10.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_fallback_to_centroid_when_boxed_in() {
        let wall = BoundingBox::new(-1000.0, -1000.0, 2000.0, 2000.0);
        let mut placer = LabelPlacer::new(10.0, 50.0).with_obstacles([wall]);
        assert_eq!(placer.place(Point::new(3.0, 4.0), 10.0, 10.0), Point::new(3.0, 4.0));
    }
}
