use crate::{
    algorithms::{ConcaveHullBuilder, ConvexHullBuilder, RadialPadding, ShortEdgeMerger},
    pipeline::HullPipeline,
    traits::{HullBuilder, PointFilter, PolygonPostProcessor},
};

/// Builder for hull pipelines with a fluent API
pub struct HullPipelineBuilder {
    filters: Vec<Box<dyn PointFilter>>,
    hull_builder: Option<Box<dyn HullBuilder>>,
    postprocessors: Vec<Box<dyn PolygonPostProcessor>>,
}

impl HullPipelineBuilder {
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
            hull_builder: None,
            postprocessors: Vec::new(),
        }
    }

    pub fn add_filter<F>(mut self, filter: F) -> Self
    where
        F: PointFilter + 'static,
    {
        self.filters.push(Box::new(filter));
        self
    }

    /// Set the hull builder (replaces any existing one)
    pub fn set_hull_builder<H>(mut self, builder: H) -> Self
    where
        H: HullBuilder + 'static,
    {
        self.hull_builder = Some(Box::new(builder));
        self
    }

    pub fn add_postprocessor<P>(mut self, postprocessor: P) -> Self
    where
        P: PolygonPostProcessor + 'static,
    {
        self.postprocessors.push(Box::new(postprocessor));
        self
    }

    pub fn with_concavity(self, concavity: f64) -> Self {
        self.set_hull_builder(ConcaveHullBuilder { concavity })
    }

    pub fn with_convex_hull(self) -> Self {
        self.set_hull_builder(ConvexHullBuilder)
    }

    /// Merge input points closer than `length_threshold`; no-op for 0
    pub fn with_length_threshold(self, length_threshold: f64) -> Self {
        if length_threshold <= 0.0 {
            return self;
        }
        self.add_filter(ShortEdgeMerger { length_threshold })
    }

    /// Radially pad the hull; no-op for distances <= 0
    pub fn with_padding(self, distance: f64) -> Self {
        if distance <= 0.0 {
            return self;
        }
        self.add_postprocessor(RadialPadding { distance })
    }

    /// Build the pipeline, defaulting to a concave hull builder
    pub fn build(self) -> HullPipeline {
        let hull_builder = self
            .hull_builder
            .unwrap_or_else(|| Box::new(ConcaveHullBuilder::default()));

        HullPipeline::new(self.filters, hull_builder, self.postprocessors)
    }
}

impl Default for HullPipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
