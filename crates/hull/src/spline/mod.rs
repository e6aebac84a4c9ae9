pub mod curves;

use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr, VariantNames};

use crate::{
    error::{HullError, Result},
    types::Point,
};

pub use curves::fmt_coord;

/// Curve family used to smooth a hull outline
#[derive(
    Debug, Clone, Copy,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, VariantNames, IntoStaticStr,
    PartialEq, Eq, Default
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum CurveType {
    /// Straight edges between the hull vertices
    Linear,
    /// Interpolating spline parameterized by `alpha`
    #[default]
    CatmullRom,
    /// Interpolating spline shaped by `tension`
    Cardinal,
    /// Approximating B-spline, left open
    Basis,
    /// Approximating B-spline, closed
    BasisClosed,
}

impl CurveType {
    /// Parse a family name, mapping unknown names to `InvalidCurveType`
    pub fn parse(name: &str) -> Result<Self> {
        Self::from_str(name).map_err(|_| HullError::InvalidCurveType(name.to_string()))
    }

    /// Whether the curve passes through its input points
    pub fn is_interpolating(&self) -> bool {
        !matches!(self, Self::Basis | Self::BasisClosed)
    }

    pub fn is_closed(&self) -> bool {
        !matches!(self, Self::Basis)
    }

    pub fn names() -> &'static [&'static str] {
        <Self as VariantNames>::VARIANTS
    }
}

/// Curve family plus its shape parameters.
///
/// `tension` (cardinal) and `alpha` (catmull-rom) are documented for [0, 1];
/// values outside that range are passed through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SplineConfig {
    pub curve: CurveType,
    #[serde(default = "default_tension")]
    pub tension: f64,
    #[serde(default = "default_alpha")]
    pub alpha: f64,
}

fn default_tension() -> f64 {
    0.5
}

fn default_alpha() -> f64 {
    0.5
}

impl Default for SplineConfig {
    fn default() -> Self {
        Self {
            curve: CurveType::default(),
            tension: default_tension(),
            alpha: default_alpha(),
        }
    }
}

impl SplineConfig {
    pub fn new(curve: CurveType) -> Self {
        Self {
            curve,
            ..Self::default()
        }
    }

    pub fn with_tension(mut self, tension: f64) -> Self {
        self.tension = tension;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }
}

/// Turn polygon vertices into an SVG path `d` string.
///
/// Needs at least two points; two points yield a straight segment.
pub fn generate_spline(points: &[Point], config: &SplineConfig) -> Result<String> {
    if points.len() < 2 {
        return Err(HullError::insufficient(points.len(), 2));
    }

    let d = match config.curve {
        CurveType::Linear => curves::linear_closed_path_d(points),
        CurveType::CatmullRom => curves::catmull_rom_closed_path_d(points, config.alpha),
        CurveType::Cardinal => curves::cardinal_closed_path_d(points, config.tension),
        CurveType::Basis => curves::basis_path_d(points),
        CurveType::BasisClosed => curves::basis_closed_path_d(points),
    };
    Ok(d)
}

/// On-curve endpoints of every drawing command in a path.
///
/// Control points are skipped, so for a linear path this recovers the
/// polygon vertices exactly (up to coordinate formatting).
pub fn path_vertices(d: &str) -> Result<Vec<Point>> {
    use svgtypes::{SimplePathSegment, SimplifyingPathParser};

    let mut vertices = Vec::new();
    for segment in SimplifyingPathParser::from(d) {
        let segment = segment.map_err(|e| HullError::InvalidPath(e.to_string()))?;
        match segment {
            SimplePathSegment::MoveTo { x, y }
            | SimplePathSegment::LineTo { x, y }
            | SimplePathSegment::CurveTo { x, y, .. }
            | SimplePathSegment::Quadratic { x, y, .. } => vertices.push(Point::new(x, y)),
            SimplePathSegment::ClosePath => {}
        }
    }
    Ok(vertices)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pentagon() -> Vec<Point> {
        vec![
            Point::new(10.0, 0.0),
            Point::new(40.25, 5.5),
            Point::new(50.0, 35.0),
            Point::new(20.125, 45.0),
            Point::new(-3.5, 20.0),
        ]
    }

    #[test]
    fn test_curve_names_are_kebab_case() {
        assert_eq!(CurveType::parse("catmull-rom").unwrap(), CurveType::CatmullRom);
        assert_eq!(CurveType::parse("basis-closed").unwrap(), CurveType::BasisClosed);
        assert_eq!(CurveType::Cardinal.to_string(), "cardinal");
        assert_eq!(CurveType::names().len(), 5);
    }

    #[test]
    fn test_unknown_curve_type() {
        let err = CurveType::parse("bezier").unwrap_err();
        assert!(matches!(err, HullError::InvalidCurveType(name) if name == "bezier"));
    }

    #[test]
    fn test_linear_round_trip_reproduces_points() {
        let points = pentagon();
        let d = generate_spline(&points, &SplineConfig::new(CurveType::Linear)).unwrap();
        let vertices = path_vertices(&d).unwrap();

        // SVG close path returns to the start without an extra vertex
        assert_eq!(vertices.len(), points.len());
        for (v, p) in vertices.iter().zip(&points) {
            assert!(v.distance(p) < 1e-3, "{v:?} != {p:?}");
        }
    }

    #[test]
    fn test_closed_families_end_with_close_path() {
        let points = pentagon();
        for curve in [CurveType::Linear, CurveType::CatmullRom, CurveType::Cardinal, CurveType::BasisClosed] {
            let d = generate_spline(&points, &SplineConfig::new(curve)).unwrap();
            assert!(d.starts_with('M'), "{curve}: {d}");
            assert!(d.ends_with('Z'), "{curve}: {d}");
        }
        let open = generate_spline(&points, &SplineConfig::new(CurveType::Basis)).unwrap();
        assert!(!open.ends_with('Z'));
    }

    #[test]
    fn test_interpolating_curves_pass_through_points() {
        let points = pentagon();
        for config in [
            SplineConfig::new(CurveType::CatmullRom).with_alpha(0.5),
            SplineConfig::new(CurveType::Cardinal).with_tension(0.2),
        ] {
            let d = generate_spline(&points, &config).unwrap();
            let vertices = path_vertices(&d).unwrap();
            for p in &points {
                assert!(
                    vertices.iter().any(|v| v.distance(p) < 1e-3),
                    "{:?} misses {p:?}",
                    config.curve
                );
            }
        }
    }

    #[test]
    fn test_two_points_degenerate_to_segment() {
        let points = &pentagon()[..2];
        for curve in [CurveType::Linear, CurveType::CatmullRom, CurveType::Cardinal] {
            let d = generate_spline(points, &SplineConfig::new(curve)).unwrap();
            assert!(!d.contains('C'), "{curve}: {d}");
            assert_eq!(path_vertices(&d).unwrap().len(), 2);
        }
    }

    #[test]
    fn test_single_point_rejected() {
        let err = generate_spline(&pentagon()[..1], &SplineConfig::default()).unwrap_err();
        assert!(matches!(err, HullError::InsufficientPoints { found: 1, required: 2, .. }));
    }

    #[test]
    fn test_spline_config_deserializes_with_defaults() {
        let config: SplineConfig = serde_json::from_str(r#"{"curve":"cardinal"}"#).unwrap();
        assert_eq!(config.curve, CurveType::Cardinal);
        assert_eq!(config.tension, 0.5);
        assert_eq!(config.alpha, 0.5);
    }
}
