pub mod focus;
pub mod pipeline;

use thiserror::Error;

pub use focus::{
    FocusArea, color_for, entities_for, focus_area_schema, label_for, list_names, load_focus_areas, resolve, url_for,
};
pub use pipeline::{RunOutput, Settings, run};

#[derive(Error, Debug)]
pub enum HullKitError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid focus area configuration: {0}")]
    ConfigParseError(String),
    #[error("Failed to build hull for '{name}'")]
    HullFor {
        name: String,
        #[source]
        source: hull::HullError,
    },
    #[error(transparent)]
    Overlay(#[from] overlay::OverlayError),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HullKitError>;
