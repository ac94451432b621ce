//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO / serialization
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: i64 },

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid timestamp: {0} (expected YYYY-MM-DD HH:MM)")]
    InvalidTimestamp(String),

    #[error("Invalid category: {0} (use labor, subcontractor, materials, equipment or other)")]
    InvalidCategory(String),

    #[error("Invalid role: {0} (use office or crew)")]
    InvalidRole(String),

    #[error("Invalid position: {0}")]
    InvalidPosition(String),

    // ---------------------------
    // Validation errors
    // ---------------------------
    #[error("End time {end} must be later than start time {start}")]
    InvalidTimeRange { start: String, end: String },

    #[error("Select at least one worker when specific workers are chosen")]
    EmptyCrewSelection,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid value for {field}: {value}")]
    InvalidNumber { field: &'static str, value: f64 },

    // ---------------------------
    // Session errors
    // ---------------------------
    #[error("Operation '{0}' requires the office role")]
    Forbidden(&'static str),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
