//! Error types for the random set core engine

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::PyErr;
use thiserror::Error;

/// Main error type for the random set core engine
///
/// A species that is missing from the catalog, or a role roll that lands past
/// the total role weight, is not an error: resolution returns `Ok(None)` for
/// those. Everything here points at malformed catalog data or misuse.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Weight table '{field}' is empty")]
    EmptyWeightTable { field: &'static str },

    #[error("No {field} selected: weights do not reach the roll")]
    NoSelection { field: &'static str },

    #[error("Move pool exhausted: {forced} forced + {available} weighted moves cannot fill 4 slots")]
    InsufficientMoves { forced: usize, available: usize },

    #[error("Move selection failed with {remaining} candidates left: weights do not reach the roll")]
    MoveSelectionFailed { remaining: usize },

    #[error("{species} ({role}): {source}")]
    Role {
        species: String,
        role: String,
        #[source]
        source: Box<BuildError>,
    },

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error("Catalog not initialized. Call init_catalog() first.")]
    CatalogNotInitialized,
}

impl BuildError {
    /// Attach species and role context to a data error raised inside a role
    pub fn in_role(self, species: &str, role: &str) -> Self {
        BuildError::Role {
            species: species.to_string(),
            role: role.to_string(),
            source: Box::new(self),
        }
    }
}

impl From<serde_json::Error> for BuildError {
    fn from(err: serde_json::Error) -> Self {
        BuildError::DeserializationError(err.to_string())
    }
}

impl From<BuildError> for PyErr {
    fn from(err: BuildError) -> PyErr {
        match err {
            BuildError::CatalogNotInitialized => PyRuntimeError::new_err(err.to_string()),
            other => PyValueError::new_err(other.to_string()),
        }
    }
}

/// Result type alias for the random set core engine
pub type Result<T> = std::result::Result<T, BuildError>;
