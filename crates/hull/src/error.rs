use thiserror::Error;

#[derive(Error, Debug)]
pub enum HullError {
    #[error("Insufficient points: {found} usable point(s), at least {required} required ({reason})")]
    InsufficientPoints {
        found: usize,
        required: usize,
        reason: String,
    },

    #[error("Invalid curve type '{0}' (expected one of: linear, catmull-rom, cardinal, basis, basis-closed)")]
    InvalidCurveType(String),

    #[error("Invalid path data: {0}")]
    InvalidPath(String),

    #[error("Geometric computation error: {0}")]
    GeometricComputation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HullError {
    pub fn insufficient(found: usize, required: usize) -> Self {
        Self::InsufficientPoints {
            found,
            required,
            reason: "too few points".to_string(),
        }
    }

    pub fn degenerate(found: usize, reason: impl Into<String>) -> Self {
        Self::InsufficientPoints {
            found,
            required: 3,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HullError>;
