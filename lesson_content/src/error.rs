//! Error types for lesson content.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("failed to decode lesson sections: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failed to encode lesson sections: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("invalid authoring catalog: {0}")]
    Catalog(#[from] toml::de::Error),

    #[error("invalid section at index {index}: {reason}")]
    InvalidSection { index: usize, reason: String },

    #[error("lesson references unknown building: {0}")]
    UnknownBuilding(String),
}
