use std::path::PathBuf;
use thiserror::Error;

/// A role catalog that cannot be loaded. No partial catalog is ever returned.
#[derive(Error, Debug)]
pub enum DefinitionError {
    /// The file could not be read
    #[error("failed to read role catalog {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Not JSON at all
    #[error("role catalog is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// JSON with the wrong shape
    #[error("malformed role catalog: {0}")]
    Malformed(String),

    #[error("category '{category}', role #{index}: missing or empty '{field}'")]
    MissingField {
        category: String,
        index: usize,
        field: &'static str,
    },

    #[error("role '{role}' has no attribute weights (or they sum to zero)")]
    NoWeights { role: String },

    #[error("role '{role}': weight for '{attribute}' is not a number")]
    NonNumericWeight { role: String, attribute: String },

    #[error("role '{role}': weight for '{attribute}' must be a number between 0 and 1000, got {weight}")]
    InvalidWeight {
        role: String,
        attribute: String,
        weight: f64,
    },

    #[error("abbreviation '{abbreviation}' is used by both '{first}' and '{second}'")]
    DuplicateAbbreviation {
        abbreviation: String,
        first: String,
        second: String,
    },

    #[error("role catalog has more than {limit} roles")]
    TooLarge { limit: usize },
}

/// A player table that cannot be imported.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("failed to read player table {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed player table: {0}")]
    Csv(#[from] csv::Error),

    #[error("player table has no '{0}' column")]
    MissingColumn(&'static str),

    #[error("player table has more than {limit} rows")]
    TooLarge { limit: usize },
}

/// Failure while writing score files.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to encode CSV for {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
}

/// A role skipped at scoring time because its weights do not sum to a positive
/// number. Reported alongside the results, never fatal to a run.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("role '{role}' ({abbreviation}) cannot be scored: weights sum to zero")]
pub struct UnscoreableRole {
    pub role: String,
    pub abbreviation: String,
}
