use std::io;

use thiserror::Error;

/// Failures that abort a normalization run.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("missing key `{path}`")]
    MissingKey { path: String },
    #[error("`{path}` is not {expected}")]
    WrongType { path: String, expected: &'static str },
    #[error("`{path}`: cannot parse {raw:?} as a number")]
    InvalidNumber { path: String, raw: String },
    #[error("no search index entity for slug '{slug}'")]
    LookupNotFound { slug: String },
    #[error("failed on school #{index} ({name})")]
    InSchool {
        index: usize,
        name: String,
        #[source]
        source: Box<ExtractError>,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ExtractError {
    /// Prefixes the key path of a lookup failure, e.g. with the block anchor.
    pub fn within(self, prefix: &str) -> Self {
        match self {
            ExtractError::MissingKey { path } => ExtractError::MissingKey {
                path: format!("{prefix}/{path}"),
            },
            ExtractError::WrongType { path, expected } => ExtractError::WrongType {
                path: format!("{prefix}/{path}"),
                expected,
            },
            ExtractError::InvalidNumber { path, raw } => ExtractError::InvalidNumber {
                path: format!("{prefix}/{path}"),
                raw,
            },
            other => other,
        }
    }

    /// Strips `InSchool` wrappers.
    pub fn root(&self) -> &ExtractError {
        match self {
            ExtractError::InSchool { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;
