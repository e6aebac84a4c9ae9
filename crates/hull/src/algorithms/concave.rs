use geo::{Area, ConcaveHull, ConvexHull};
use tracing::debug;

use crate::{
    error::{HullError, Result},
    traits::{HullBuilder, PointFilter},
    types::{HullResult, Point, ring_to_points, to_multi_point},
};

/// Default concavity; values at or below 1 approach the convex hull's detail level
pub const DEFAULT_CONCAVITY: f64 = 2.0;

const MIN_HULL_POINTS: usize = 3;
const DEGENERATE_AREA_EPSILON: f64 = 1e-9;

/// Compute a concave hull, merging points closer than `length_threshold` first.
///
/// Higher `concavity` gives straighter edges; the result never covers more than
/// the convex hull of the same points.
pub fn compute_hull(points: &[Point], concavity: f64, length_threshold: f64) -> Result<HullResult> {
    let merged = ShortEdgeMerger { length_threshold }.filter(points);
    ConcaveHullBuilder { concavity }.build_hull(&merged)
}

/// Reject point sets a hull cannot be built from.
///
/// Returns the distinct, finite points of the input.
pub fn validate_point_set(points: &[Point]) -> Result<Vec<Point>> {
    let mut distinct: Vec<Point> = Vec::with_capacity(points.len());
    for p in points.iter().filter(|p| p.is_finite()) {
        if !distinct.contains(p) {
            distinct.push(*p);
        }
    }

    if distinct.len() < MIN_HULL_POINTS {
        return Err(HullError::InsufficientPoints {
            found: distinct.len(),
            required: MIN_HULL_POINTS,
            reason: if points.len() > distinct.len() {
                format!("{} input point(s) are coincident or non-finite", points.len() - distinct.len())
            } else {
                "too few points".to_string()
            },
        });
    }

    let convex_area = to_multi_point(&distinct).convex_hull().unsigned_area();
    if convex_area <= DEGENERATE_AREA_EPSILON {
        return Err(HullError::degenerate(distinct.len(), "points are collinear"));
    }

    Ok(distinct)
}

/// Concave hull delegated to geo's implementation
#[derive(Debug, Clone)]
pub struct ConcaveHullBuilder {
    pub concavity: f64,
}

impl Default for ConcaveHullBuilder {
    fn default() -> Self {
        Self {
            concavity: DEFAULT_CONCAVITY,
        }
    }
}

impl HullBuilder for ConcaveHullBuilder {
    fn build_hull(&self, points: &[Point]) -> Result<HullResult> {
        let distinct = validate_point_set(points)?;
        let polygon = to_multi_point(&distinct).concave_hull(self.concavity);
        let vertices = ring_to_points(polygon.exterior());

        if vertices.len() < MIN_HULL_POINTS {
            return Err(HullError::GeometricComputation(format!(
                "concave hull collapsed to {} vertices",
                vertices.len()
            )));
        }

        let result = HullResult::from_points(vertices);
        debug!(
            input = distinct.len(),
            vertices = result.points.len(),
            area = result.area,
            concavity = self.concavity,
            "computed concave hull"
        );
        Ok(result)
    }
}

/// Convex hull using geo crate's implementation
#[derive(Debug, Clone, Default)]
pub struct ConvexHullBuilder;

impl HullBuilder for ConvexHullBuilder {
    fn build_hull(&self, points: &[Point]) -> Result<HullResult> {
        let distinct = validate_point_set(points)?;
        let polygon = to_multi_point(&distinct).convex_hull();
        Ok(HullResult::from_points(ring_to_points(polygon.exterior())))
    }
}

/// Merges points that lie closer together than `length_threshold`.
///
/// Each point is folded into the first already-kept point within the
/// threshold, so every surviving vertex is an original input point.
#[derive(Debug, Clone, Default)]
pub struct ShortEdgeMerger {
    pub length_threshold: f64,
}

impl PointFilter for ShortEdgeMerger {
    fn filter(&self, points: &[Point]) -> Vec<Point> {
        if self.length_threshold <= 0.0 {
            return points.to_vec();
        }

        let mut kept: Vec<Point> = Vec::with_capacity(points.len());
        for p in points {
            if !kept.iter().any(|k| k.distance(p) < self.length_threshold) {
                kept.push(*p);
            }
        }

        if kept.len() != points.len() {
            debug!(
                before = points.len(),
                after = kept.len(),
                threshold = self.length_threshold,
                "merged short edges"
            );
        }
        kept
    }
}
