//! Focus areas: named, styled aggregations of entity groups loaded from
//! YAML, JSON or TOML configuration.

use std::{fs, path::Path};

use hull::Point;
use overlay::Diagram;
use schemars::{JsonSchema, schema::RootSchema};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{HullKitError, Result};

/// A set of entity groups drawn as a single hull
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct FocusArea {
    /// Unique key used to select the area on the command line
    pub name: String,
    /// Text of the label drawn over the hull
    pub label: String,
    /// Named, `#rgb`, `#rrggbb` or `rgb()` color
    pub color: String,
    /// Entity group names or `prefix*` patterns
    pub areas: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// TOML has no top-level arrays, so areas live under `[[area]]`
#[derive(Debug, Deserialize)]
struct TomlFocusAreas {
    #[serde(default)]
    area: Vec<FocusArea>,
}

fn parse_error(path: &Path, err: impl std::fmt::Display) -> HullKitError {
    HullKitError::ConfigParseError(format!("{}: {err}", path.display()))
}

/// Load focus areas, picking the format from the file extension.
///
/// `.json` and `.toml` are read as such; anything else is read as YAML.
pub fn load_focus_areas(path: impl AsRef<Path>) -> Result<Vec<FocusArea>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(HullKitError::NotFound(format!("focus area file {}", path.display())));
    }
    let content = String::from_utf8(fs::read(path)?).map_err(|e| parse_error(path, e))?;

    let areas: Vec<FocusArea> = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&content).map_err(|e| parse_error(path, e))?,
        Some("toml") => {
            toml::from_str::<TomlFocusAreas>(&content)
                .map_err(|e| parse_error(path, e))?
                .area
        }
        _ => serde_yaml::from_str(&content).map_err(|e| parse_error(path, e))?,
    };

    for (index, area) in areas.iter().enumerate() {
        if areas[..index].iter().any(|a| a.name == area.name) {
            return Err(parse_error(path, format!("duplicate focus area '{}'", area.name)));
        }
    }

    info!(path = %path.display(), areas = areas.len(), "loaded focus areas");
    Ok(areas)
}

fn find<'a>(areas: &'a [FocusArea], name: &str) -> Result<&'a FocusArea> {
    areas
        .iter()
        .find(|a| a.name == name)
        .ok_or_else(|| HullKitError::NotFound(format!("focus area '{name}'")))
}

pub fn entities_for<'a>(areas: &'a [FocusArea], name: &str) -> Result<&'a [String]> {
    Ok(&find(areas, name)?.areas)
}

pub fn color_for<'a>(areas: &'a [FocusArea], name: &str) -> Result<&'a str> {
    Ok(&find(areas, name)?.color)
}

pub fn url_for<'a>(areas: &'a [FocusArea], name: &str) -> Result<Option<&'a str>> {
    Ok(find(areas, name)?.url.as_deref())
}

pub fn label_for<'a>(areas: &'a [FocusArea], name: &str) -> Result<&'a str> {
    Ok(&find(areas, name)?.label)
}

/// Names of all areas in source order
pub fn list_names(areas: &[FocusArea]) -> Vec<&str> {
    areas.iter().map(|a| a.name.as_str()).collect()
}

/// Representative points of every entity group a focus area lists.
///
/// Unlike a plain name lookup, every listed group (or pattern) must be
/// present in the diagram.
pub fn resolve(areas: &[FocusArea], diagram: &Diagram, name: &str) -> Result<Vec<Point>> {
    let entities = entities_for(areas, name)?;
    if let Some(missing) = entities
        .iter()
        .find(|entity| diagram.groups_matching(entity).next().is_none())
    {
        return Err(HullKitError::NotFound(format!(
            "entity group '{missing}' listed by focus area '{name}'"
        )));
    }

    let points = diagram.groups_by_names(entities);
    debug!(area = name, groups = entities.len(), points = points.len(), "resolved focus area");
    Ok(points)
}

/// JSON schema of a focus area list
pub fn focus_area_schema() -> RootSchema {
    schemars::schema_for!(Vec<FocusArea>)
}
