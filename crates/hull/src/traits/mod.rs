use crate::{error::Result, types::{HullResult, Point}};

/// Trait for point-set preprocessing before a hull is extracted
pub trait PointFilter: Send + Sync {
    /// Filter or merge input points (e.g. remove near-duplicates)
    fn filter(&self, points: &[Point]) -> Vec<Point>;
}

/// Trait for hull construction algorithms
pub trait HullBuilder: Send + Sync {
    /// Compute a closed boundary polygon enclosing the points
    fn build_hull(&self, points: &[Point]) -> Result<HullResult>;
}

/// Trait for polygon post-processing algorithms
pub trait PolygonPostProcessor: Send + Sync {
    /// Transform the polygon vertices in place
    fn process(&self, points: &mut Vec<Point>) -> Result<()>;
}
