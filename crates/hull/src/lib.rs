//! # Hull Geometry Library
//!
//! Geometry core for drawing boundaries around groups of diagram elements:
//! concave hulls, radial padding and closed spline smoothing.
//!
//! ## Core Features
//!
//! - **Concave hulls**: delegated to the `geo` crate, with a tunable concavity
//! - **Pipeline System**: point filters, a hull builder and post-processors composed in sequence
//! - **Radial padding**: grow a polygon away from its centroid
//! - **Splines**: d3-style linear, catmull-rom, cardinal and basis curves as SVG path data
//! - **GeoJSON Support**: export computed hulls
//!
//! ## Quick Start
//!
//! ```rust
//! use hull::{HullPipeline, Point, SplineConfig, CurveType, generate_spline};
//!
//! let points = vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(40.0, 0.0),
//!     Point::new(40.0, 30.0),
//!     Point::new(0.0, 30.0),
//!     Point::new(20.0, 15.0),
//! ];
//!
//! let pipeline = HullPipeline::builder()
//!     .with_concavity(2.0)
//!     .with_padding(10.0)
//!     .build();
//!
//! let hull = pipeline.process(&points)?;
//! let d = generate_spline(&hull.points, &SplineConfig::new(CurveType::CatmullRom))?;
//! assert!(d.ends_with('Z'));
//! # Ok::<(), hull::HullError>(())
//! ```

pub mod error;
pub mod types;
pub mod traits;
pub mod algorithms;
pub mod pipeline;
pub mod spline;
pub mod io;

pub use error::{HullError, Result};
pub use types::{BoundingBox, HullResult, Point, centroid, polygon_area, polygon_perimeter};
pub use traits::*;
pub use algorithms::*;
pub use pipeline::{HullPipeline, builder::HullPipelineBuilder};
pub use spline::{CurveType, SplineConfig, fmt_coord, generate_spline, path_vertices};
pub use io::*;

#[cfg(test)]
mod tests {
    use super::*;

    fn clustered_points() -> Vec<Point> {
        let mut points = Vec::new();
        for (cx, cy) in [(0.0, 0.0), (120.0, 10.0), (60.0, 90.0)] {
            for (dx, dy) in [(-15.0, -10.0), (15.0, -10.0), (15.0, 10.0), (-15.0, 10.0)] {
                points.push(Point::new(cx + dx, cy + dy));
            }
        }
        points
    }

    #[test]
    fn test_pipeline_basic() {
        let pipeline = HullPipeline::builder().build();
        let hull = pipeline.process(&clustered_points()).expect("Should process successfully");
        assert!(hull.points.len() >= 3);
        assert!(hull.area > 0.0);
    }

    #[test]
    fn test_pipeline_with_padding_grows_area() {
        let points = clustered_points();
        let plain = HullPipeline::builder().build().process(&points).unwrap();
        let padded = HullPipeline::builder()
            .with_padding(10.0)
            .build()
            .process(&points)
            .unwrap();

        assert_eq!(plain.points.len(), padded.points.len());
        assert!(padded.area > plain.area);
        assert!(padded.perimeter > plain.perimeter);
    }

    #[test]
    fn test_pipeline_convex_matches_builder() {
        let points = clustered_points();
        let hull = HullPipeline::builder().with_convex_hull().build().process(&points).unwrap();
        let expected = ConvexHullBuilder.build_hull(&points).unwrap();
        assert!((hull.area - expected.area).abs() < 1e-9);
    }

    #[test]
    fn test_pipeline_propagates_insufficient_points() {
        let pipeline = HullPipeline::builder().with_length_threshold(5.0).build();
        let points = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 1.0)];
        let err = pipeline.process(&points).unwrap_err();
        assert!(matches!(err, HullError::InsufficientPoints { found: 1, .. }));
    }

    #[test]
    fn test_pipeline_info() {
        let pipeline = HullPipeline::builder()
            .with_length_threshold(1.0)
            .with_padding(2.0)
            .build();
        assert_eq!(
            pipeline.info(),
            "HullPipeline: 1 point filters, 1 hull builder, 1 postprocessors"
        );
    }
}
