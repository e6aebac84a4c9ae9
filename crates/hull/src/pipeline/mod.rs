pub mod builder;

use tracing::debug;

use crate::{
    error::Result,
    traits::{HullBuilder, PointFilter, PolygonPostProcessor},
    types::{HullResult, Point},
};

/// Point filtering, hull construction and polygon post-processing in sequence
pub struct HullPipeline {
    filters: Vec<Box<dyn PointFilter>>,
    hull_builder: Box<dyn HullBuilder>,
    postprocessors: Vec<Box<dyn PolygonPostProcessor>>,
}

impl HullPipeline {
    /// Create a new pipeline builder
    pub fn builder() -> builder::HullPipelineBuilder {
        builder::HullPipelineBuilder::new()
    }

    pub fn new(
        filters: Vec<Box<dyn PointFilter>>,
        hull_builder: Box<dyn HullBuilder>,
        postprocessors: Vec<Box<dyn PolygonPostProcessor>>,
    ) -> Self {
        Self {
            filters,
            hull_builder,
            postprocessors,
        }
    }

    /// Run a point set through the pipeline.
    ///
    /// Area and perimeter of the result describe the final, post-processed
    /// polygon.
    pub fn process(&self, points: &[Point]) -> Result<HullResult> {
        let mut filtered = points.to_vec();
        for filter in &self.filters {
            filtered = filter.filter(&filtered);
        }

        let hull = self.hull_builder.build_hull(&filtered)?;
        if self.postprocessors.is_empty() {
            return Ok(hull);
        }

        let mut vertices = hull.points;
        for postprocessor in &self.postprocessors {
            postprocessor.process(&mut vertices)?;
        }

        let result = HullResult::from_points(vertices);
        debug!(
            raw_area = hull.area,
            area = result.area,
            perimeter = result.perimeter,
            "post-processed hull"
        );
        Ok(result)
    }

    pub fn info(&self) -> String {
        format!(
            "HullPipeline: {} point filters, 1 hull builder, {} postprocessors",
            self.filters.len(),
            self.postprocessors.len()
        )
    }
}
