use std::{io, path::PathBuf};

use sdp_schema::{SchemaError, ValueError};
use sdp_wire::DecodeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("failed to fetch {url}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to read {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid JSON input")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Value(#[from] ValueError),
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),
    #[error("schema has no struct named {0:?}")]
    UnknownStruct(String),
}
