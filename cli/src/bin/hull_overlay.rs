use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
};

use clap::{ArgAction, Parser};
use cli::{Settings, focus_area_schema, run};
use color_eyre::eyre::{Result, WrapErr};
use hull::{CurveType, DEFAULT_CONCAVITY, SplineConfig, to_geojson_string};
use overlay::{DEFAULT_ID_ATTRIBUTE, RenderStyle};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Draw concave hulls around entity groups of an SVG diagram
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Entity group names (`prefix*` allowed), or focus area names with --config
    #[arg(required_unless_present_any = ["config", "print_schema"])]
    names: Vec<String>,

    /// Input SVG diagram
    #[arg(short, long, required_unless_present = "print_schema")]
    input: Option<PathBuf>,

    /// Focus area file (.yaml, .json or .toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Higher values give a hull closer to the convex hull
    #[arg(long, default_value_t = DEFAULT_CONCAVITY)]
    concavity: f64,

    /// Merge input points closer than this before building the hull
    #[arg(long, default_value_t = 0.0)]
    length_threshold: f64,

    /// Distance the hull is pushed away from its centroid
    #[arg(long, default_value_t = cli::pipeline::DEFAULT_PADDING)]
    padding: f64,

    /// Curve family: linear, catmull-rom, cardinal, basis, basis-closed
    #[arg(long, default_value = "catmull-rom", value_parser = CurveType::parse)]
    curve: CurveType,

    /// Cardinal tension
    #[arg(long, default_value_t = 0.5)]
    tension: f64,

    /// Catmull-Rom alpha
    #[arg(long, default_value_t = 0.5)]
    alpha: f64,

    /// Number of decorative layers per hull
    #[arg(long, default_value_t = 4)]
    layers: usize,

    /// Attribute that names entity groups
    #[arg(long, default_value = DEFAULT_ID_ATTRIBUTE)]
    id_attribute: String,

    /// Hull color when no focus area file is used
    #[arg(long, default_value = cli::pipeline::DEFAULT_COLOR)]
    color: String,

    /// Emit only the generated markup
    #[arg(long)]
    fragments_only: bool,

    /// Use the convex hull instead of the concave one
    #[arg(long)]
    convex: bool,

    /// Move labels away from each other and from diagram elements
    #[arg(long)]
    avoid_label_collisions: bool,

    /// Output file, stdout if omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write the hulls as GeoJSON
    #[arg(long)]
    geojson: Option<PathBuf>,

    /// Print the focus area JSON schema and exit
    #[arg(long)]
    print_schema: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn settings(&self, input: PathBuf) -> Settings {
        let mut settings = Settings::new(input);
        settings.config = self.config.clone();
        settings.names = self.names.clone();
        settings.concavity = self.concavity;
        settings.length_threshold = self.length_threshold;
        settings.padding = self.padding;
        settings.convex = self.convex;
        settings.spline = SplineConfig::new(self.curve)
            .with_tension(self.tension)
            .with_alpha(self.alpha);
        settings.id_attribute = self.id_attribute.clone();
        settings.color = self.color.clone();
        settings.fragments_only = self.fragments_only;
        settings.avoid_label_collisions = self.avoid_label_collisions;
        settings.style = RenderStyle {
            layer_count: self.layers,
            ..RenderStyle::default()
        };
        settings
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    if cli.print_schema {
        let schema = serde_json::to_string_pretty(&focus_area_schema())?;
        println!("{schema}");
        return Ok(());
    }

    let Some(input) = cli.input.clone() else {
        color_eyre::eyre::bail!("--input is required");
    };
    let settings = cli.settings(input);
    let output = run(&settings)?;

    // Written before the document so a failed write emits nothing
    if let Some(path) = &cli.geojson {
        let geojson = to_geojson_string(&output.hulls)?;
        fs::write(path, geojson).wrap_err_with(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), hulls = output.hulls.len(), "wrote geojson");
    }

    match &cli.output {
        Some(path) => {
            fs::write(path, &output.markup).wrap_err_with(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "wrote overlay");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(output.markup.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    Ok(())
}
