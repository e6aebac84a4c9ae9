//! End-to-end run: parse the diagram, resolve every requested group, build
//! and pad its hull, then render and compose the overlay.

use std::path::PathBuf;

use hull::{DEFAULT_CONCAVITY, HullPipeline, NamedHull, Point, SplineConfig};
use overlay::{DEFAULT_ID_ATTRIBUTE, Diagram, LabelPlacer, RenderResult, RenderStyle, compose};
use tracing::info;

use crate::{HullKitError, Result, focus};

pub const DEFAULT_PADDING: f64 = 10.0;
pub const DEFAULT_COLOR: &str = "steelblue";

/// Everything one invocation needs
#[derive(Debug, Clone)]
pub struct Settings {
    pub input: PathBuf,
    /// Focus area file; without it every name is drawn as its own hull
    pub config: Option<PathBuf>,
    /// Group names or patterns, or focus area names when `config` is set
    pub names: Vec<String>,
    pub concavity: f64,
    pub length_threshold: f64,
    pub padding: f64,
    pub convex: bool,
    pub spline: SplineConfig,
    pub id_attribute: String,
    /// Hull color when no focus area supplies one
    pub color: String,
    /// Emit only the generated markup instead of the annotated document
    pub fragments_only: bool,
    pub avoid_label_collisions: bool,
    pub style: RenderStyle,
}

impl Settings {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            config: None,
            names: Vec::new(),
            concavity: DEFAULT_CONCAVITY,
            length_threshold: 0.0,
            padding: DEFAULT_PADDING,
            convex: false,
            spline: SplineConfig::default(),
            id_attribute: DEFAULT_ID_ATTRIBUTE.to_string(),
            color: DEFAULT_COLOR.to_string(),
            fragments_only: false,
            avoid_label_collisions: false,
            style: RenderStyle::default(),
        }
    }

    pub fn hull_pipeline(&self) -> HullPipeline {
        let builder = HullPipeline::builder().with_length_threshold(self.length_threshold);
        let builder = if self.convex {
            builder.with_convex_hull()
        } else {
            builder.with_concavity(self.concavity)
        };
        builder.with_padding(self.padding).build()
    }
}

/// A group selection before its hull is built
struct Target {
    name: String,
    label: String,
    color: String,
    url: Option<String>,
    points: Vec<Point>,
}

fn targets(settings: &Settings, diagram: &Diagram) -> Result<Vec<Target>> {
    let Some(config) = &settings.config else {
        return Ok(settings
            .names
            .iter()
            .map(|name| Target {
                name: name.clone(),
                label: name.clone(),
                color: settings.color.clone(),
                url: None,
                points: diagram.groups_by_names(std::slice::from_ref(name)),
            })
            .collect());
    };

    let areas = focus::load_focus_areas(config)?;
    let selected: Vec<String> = if settings.names.is_empty() {
        focus::list_names(&areas).into_iter().map(String::from).collect()
    } else {
        settings.names.clone()
    };

    selected
        .into_iter()
        .map(|name| {
            Ok(Target {
                points: focus::resolve(&areas, diagram, &name)?,
                label: focus::label_for(&areas, &name)?.to_string(),
                color: focus::color_for(&areas, &name)?.to_string(),
                url: focus::url_for(&areas, &name)?.map(String::from),
                name,
            })
        })
        .collect()
}

/// Result of a run
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Annotated SVG document, or bare fragments
    pub markup: String,
    pub hulls: Vec<NamedHull>,
}

pub fn run(settings: &Settings) -> Result<RunOutput> {
    let diagram = Diagram::load(&settings.input, &settings.id_attribute)?;
    let targets = targets(settings, &diagram)?;
    let pipeline = settings.hull_pipeline();
    info!("{}", pipeline.info());

    let mut results = Vec::with_capacity(targets.len());
    let mut hulls = Vec::with_capacity(targets.len());
    for target in targets {
        let hull = pipeline.process(&target.points).map_err(|source| HullKitError::HullFor {
            name: target.name.clone(),
            source,
        })?;
        info!(
            name = %target.name,
            vertices = hull.points.len(),
            area = hull.area,
            perimeter = hull.perimeter,
            "built hull"
        );

        results.push(
            RenderResult::new(target.name.as_str(), hull.points.clone(), target.color)
                .with_label(target.label)
                .with_url(target.url),
        );
        hulls.push(NamedHull::new(target.name, hull));
    }

    let placer = settings
        .avoid_label_collisions
        .then(|| LabelPlacer::default().with_obstacles(diagram.element_boxes()));
    let base = (!settings.fragments_only).then(|| diagram.document());
    let markup = compose(&results, &settings.spline, base, &settings.style, placer)?;

    Ok(RunOutput { markup, hulls })
}
