use std::path::PathBuf;
use thiserror::Error;

/// Role catalog could not be loaded or failed validation
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read role catalog {path}: {source}")]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Role catalog {path} is not valid JSON: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Role catalog has an unexpected shape: {0}")]
    Shape(String),

    #[error("Duplicate role identifier in catalog: {0}")]
    DuplicateRole(String),

    #[error("Role {role_abbr} weights unknown attribute \"{attribute}\"")]
    UnknownAttribute { role_abbr: String, attribute: String },

    #[error("Role {role_abbr} has an invalid weight {weight} for \"{attribute}\"")]
    InvalidWeight {
        role_abbr: String,
        attribute: String,
        weight: f64,
    },
}

/// Player table could not be imported
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Failed to read table source {path}: {source}")]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("No table data found in {0}")]
    NoTable(String),

    #[error("Table in {source_name} has no \"{column}\" column")]
    MissingColumn { source_name: String, column: String },
}

/// A single role could not be scored; other roles in a batch are unaffected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoreError {
    #[error("Role {role_abbr} has no effective weights (total multiplier is 0)")]
    ZeroMultiplier { role_abbr: String },

    #[error("Role {role_abbr} weights attributes the table does not have: {}", .missing.join(", "))]
    MissingAttributes {
        role_abbr: String,
        missing: Vec<String>,
    },
}

/// Writing an export file failed
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write CSV record to {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
}

/// The caller selected something the catalog does not contain
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("Unknown role identifier: {0}")]
    UnknownRole(String),

    #[error("No roles selected")]
    Empty,
}

/// Context message for import failures
pub fn import_context(path: &std::path::Path) -> String {
    format!("Failed to import player table from {}", path.display())
}

/// Context message for export failures
pub fn export_context(what: &str) -> String {
    format!("Failed to export {}", what)
}
