use std::path::Path;

use geojson::{Feature, FeatureCollection, Geometry, Value};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{error::Result, types::HullResult};

/// Properties attached to every exported hull feature
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
#[schemars(description = "Properties for hull outline features")]
pub struct HullProperties {
    #[schemars(description = "Name of the group or focus area the hull encloses")]
    pub name: String,
    #[schemars(description = "Area of the hull in square document units")]
    pub area: f64,
    #[schemars(description = "Perimeter of the hull in document units")]
    pub perimeter: f64,
    #[schemars(description = "Number of hull vertices")]
    pub vertex_count: usize,
}

/// A hull tagged with the name it was computed for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NamedHull {
    pub name: String,
    pub hull: HullResult,
}

impl NamedHull {
    pub fn new(name: impl Into<String>, hull: HullResult) -> Self {
        Self {
            name: name.into(),
            hull,
        }
    }

    pub fn properties(&self) -> HullProperties {
        HullProperties {
            name: self.name.clone(),
            area: self.hull.area,
            perimeter: self.hull.perimeter,
            vertex_count: self.hull.points.len(),
        }
    }

    pub fn to_feature(&self) -> Result<Feature> {
        // GeoJSON rings repeat their first position
        let mut ring: Vec<Vec<f64>> = self.hull.points.iter().map(|p| vec![p.x, p.y]).collect();
        if let Some(first) = ring.first().cloned() {
            ring.push(first);
        }

        let properties = match serde_json::to_value(self.properties())? {
            serde_json::Value::Object(map) => Some(map),
            _ => None,
        };

        Ok(Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Polygon(vec![ring]))),
            id: Some(geojson::feature::Id::String(self.name.clone())),
            properties,
            foreign_members: None,
        })
    }
}

pub fn to_geojson(hulls: &[NamedHull]) -> Result<FeatureCollection> {
    let features = hulls
        .iter()
        .map(NamedHull::to_feature)
        .collect::<Result<Vec<_>>>()?;

    let mut foreign_members = serde_json::Map::new();
    foreign_members.insert(
        "hull_count".to_string(),
        serde_json::Value::Number(serde_json::Number::from(hulls.len())),
    );

    Ok(FeatureCollection {
        bbox: None,
        features,
        foreign_members: Some(foreign_members),
    })
}

/// Export to GeoJSON and serialize to JSON string
pub fn to_geojson_string(hulls: &[NamedHull]) -> Result<String> {
    let collection = to_geojson(hulls)?;
    Ok(serde_json::to_string_pretty(&collection)?)
}

/// Save GeoJSON to file
pub fn save_geojson(hulls: &[NamedHull], path: impl AsRef<Path>) -> Result<()> {
    std::fs::write(path, to_geojson_string(hulls)?)?;
    Ok(())
}
