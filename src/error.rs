use thiserror::Error;

/// Errors raised by the grid, the solver and their loaders.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("Position out of bounds: ({x}, {y}) on a {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },

    #[error("No legal action left to choose from")]
    EmptyLegalActionSet,

    #[error("Invalid grid dimensions: {message}")]
    InvalidDimensions { message: String },

    #[error("Environment reported no corners, grid size is unknown")]
    NoCorners,

    #[error("Layout error: {message}")]
    Layout { message: String },

    #[error("I/O error on '{path}'")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration error in '{path}'")]
    Config {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, SolverError>;
