use thiserror::Error;

#[derive(Error, Debug)]
pub enum OverlayError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Invalid color '{0}'")]
    InvalidColor(String),

    #[error(transparent)]
    Hull(#[from] hull::HullError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<roxmltree::Error> for OverlayError {
    fn from(err: roxmltree::Error) -> Self {
        Self::MalformedDocument(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, OverlayError>;
