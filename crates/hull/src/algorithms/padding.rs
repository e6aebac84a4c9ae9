use crate::{
    error::Result,
    traits::PolygonPostProcessor,
    types::{Point, centroid},
};

/// Push every point `distance` units further away from the centroid.
///
/// This is a uniform radial expansion rather than a true polygon offset:
/// concave inlets grow less faithfully than convex outlets. Points sitting on
/// the centroid stay where they are.
pub fn add_padding(points: &[Point], distance: f64) -> Vec<Point> {
    if distance <= 0.0 || points.is_empty() {
        return points.to_vec();
    }

    let center = centroid(points);
    points
        .iter()
        .map(|p| {
            let dx = p.x - center.x;
            let dy = p.y - center.y;
            let original = dx.hypot(dy);
            if original == 0.0 {
                return *p;
            }
            let scale = (original + distance) / original;
            Point::new(center.x + dx * scale, center.y + dy * scale)
        })
        .collect()
}

/// Radial padding as a pipeline post-processing step
#[derive(Debug, Clone, Default)]
pub struct RadialPadding {
    pub distance: f64,
}

impl PolygonPostProcessor for RadialPadding {
    fn process(&self, points: &mut Vec<Point>) -> Result<()> {
        *points = add_padding(points, self.distance);
        Ok(())
    }
}
