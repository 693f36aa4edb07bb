//! Error types shared by the design engine crates.

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while generating or exporting a design.
///
/// Configuration problems are reported before any geometry is built; export
/// problems leave the in-memory design untouched so the caller can retry.
#[derive(Debug, Error)]
pub enum DesignError {
    /// The model configuration is malformed (bad range, bad texture count...).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A model name that does not map to a generator.
    #[error("unknown model '{0}' (expected 'rsym' or 'csym')")]
    UnknownModel(String),

    /// A required parameter is absent from the model's parameter map.
    #[error("model '{model}' is missing required parameter '{name}'")]
    MissingParameter { model: String, name: String },

    /// A texture selector outside the known waveforms.
    #[error("unknown texture type {0} (expected 0..=3)")]
    UnknownTextureType(u32),

    /// Too few grid samples to triangulate.
    #[error("degenerate grid: {num_points} points per axis, need at least 3")]
    DegenerateGrid { num_points: usize },

    /// Reading or writing a mesh file failed.
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A mesh file could not be decoded.
    #[error("failed to parse STL {path:?}: {details}")]
    StlParse { path: PathBuf, details: String },
}

/// Result alias used throughout the engine.
pub type DesignResult<T> = Result<T, DesignError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_problem() {
        let e = DesignError::MissingParameter {
            model: "csym".into(),
            name: "height".into(),
        };
        assert!(e.to_string().contains("height"));
        assert!(DesignError::DegenerateGrid { num_points: 2 }
            .to_string()
            .contains("at least 3"));
    }
}
