use thiserror::Error;

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    ConfigError(#[from] toml::de::Error),

    #[error("Lens catalog is empty; refusing to build a graph with zero nodes")]
    EmptyCatalog,

    #[error("{measure} did not converge within {iterations} iterations")]
    NotConverged {
        measure: &'static str,
        iterations: usize,
    },

    #[error("{measure} is undefined for this graph: {reason}")]
    Degenerate {
        measure: &'static str,
        reason: String,
    },

    #[error("Build error: {0}")]
    BuildError(String),
}
