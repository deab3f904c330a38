use thiserror::Error;

/// Failures surfaced by the persistence and export paths. Every variant is
/// terminal for the action that produced it; the in-memory diagram is only
/// mutated after the corresponding read or parse has succeeded.
#[derive(Debug, Error)]
pub enum Error {
    #[error("diagram payload has no `elements` array")]
    MissingElements,

    #[error("diagram has no elements to export")]
    EmptyDiagram,

    #[error("failed to parse diagram JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to build SVG render tree: {0}")]
    Svg(String),

    #[error("failed to encode image: {0}")]
    Encode(String),

    #[error("failed to persist settings: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, Error>;
