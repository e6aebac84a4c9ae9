use geo_types::{Coord, LineString, MultiPoint, Polygon};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A coordinate pair in document space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<Coord<f64>> for Point {
    fn from(coord: Coord<f64>) -> Self {
        Self::new(coord.x, coord.y)
    }
}

impl From<Point> for Coord<f64> {
    fn from(point: Point) -> Self {
        Coord { x: point.x, y: point.y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Axis-aligned rectangle, always derived from geometry
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Smallest box containing every point, `None` for an empty input
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Self> {
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;

        for p in points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        if min_x > max_x || min_y > max_y {
            return None;
        }

        Some(Self::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x, self.y),
            Point::new(self.max_x(), self.y),
            Point::new(self.max_x(), self.max_y()),
            Point::new(self.x, self.max_y()),
        ]
    }

    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let min_x = self.x.min(other.x);
        let min_y = self.y.min(other.y);
        let max_x = self.max_x().max(other.max_x());
        let max_y = self.max_y().max(other.max_y());
        BoundingBox::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Strict overlap test; boxes that only touch do not intersect
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.x < other.max_x()
            && other.x < self.max_x()
            && self.y < other.max_y()
            && other.y < self.max_y()
    }

    /// Box of the given size centered on `center`
    pub fn centered_at(center: Point, width: f64, height: f64) -> Self {
        Self::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }
}

/// A closed polygon produced by a hull builder.
///
/// The closing edge from the last vertex back to the first is implicit, so
/// `points` never repeats its first vertex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HullResult {
    pub points: Vec<Point>,
    pub area: f64,
    pub perimeter: f64,
}

impl HullResult {
    /// Build a result from polygon vertices, deriving area and perimeter
    pub fn from_points(points: Vec<Point>) -> Self {
        let area = polygon_area(&points);
        let perimeter = polygon_perimeter(&points);
        Self {
            points,
            area,
            perimeter,
        }
    }

    /// Convert to geo-types Polygon for geometric operations
    pub fn to_geo_polygon(&self) -> Polygon<f64> {
        let exterior: Vec<Coord<f64>> = self.points.iter().map(|&p| p.into()).collect();
        Polygon::new(LineString::new(exterior), vec![])
    }

    pub fn centroid(&self) -> Point {
        centroid(&self.points)
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(&self.points)
    }
}

/// Arithmetic mean of a point set, the origin for an empty set
pub fn centroid(points: &[Point]) -> Point {
    if points.is_empty() {
        return Point::default();
    }
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Point::new(sx / n, sy / n)
}

/// Absolute shoelace area over the given vertex order
pub fn polygon_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut twice_area = 0.0;
    for (i, p) in points.iter().enumerate() {
        let q = &points[(i + 1) % points.len()];
        twice_area += p.x * q.y - q.x * p.y;
    }
    (twice_area / 2.0).abs()
}

/// Sum of consecutive edge lengths plus the closing edge
pub fn polygon_perimeter(points: &[Point]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    let open: f64 = points.windows(2).map(|w| w[0].distance(&w[1])).sum();
    match (points.first(), points.last()) {
        (Some(first), Some(last)) => open + last.distance(first),
        _ => open,
    }
}

pub(crate) fn to_multi_point(points: &[Point]) -> MultiPoint<f64> {
    points
        .iter()
        .map(|p| geo_types::Point::new(p.x, p.y))
        .collect::<Vec<_>>()
        .into()
}

/// Strip the repeated closing coordinate that geo rings carry
pub(crate) fn ring_to_points(ring: &LineString<f64>) -> Vec<Point> {
    let mut points: Vec<Point> = ring.coords().map(|&c| c.into()).collect();
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    points
}
