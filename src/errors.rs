//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Lookup failures
    // ---------------------------
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Sale not found: {0}")]
    SaleNotFound(i64),

    // ---------------------------
    // Input validation
    // ---------------------------
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    // ---------------------------
    // Business rules
    // ---------------------------
    #[error("Insufficient stock for '{name}': requested {requested}, available {available}")]
    InsufficientStock {
        name: String,
        requested: i64,
        available: i64,
    },

    #[error("Concurrent update lost on '{0}', retry the operation")]
    Conflict(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export format not supported: {0}")]
    InvalidExportFormat(String),

    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// Stable machine-readable kind, used by the JSON error output.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Io(_) => "io",
            AppError::Db(_) | AppError::Migration(_) => "storage_failure",
            AppError::ItemNotFound(_) | AppError::SaleNotFound(_) => "not_found",
            AppError::InvalidInput(_)
            | AppError::Validation { .. }
            | AppError::InvalidDate(_)
            | AppError::InvalidDateRange(_) => "invalid_input",
            AppError::InsufficientStock { .. } => "insufficient_stock",
            AppError::Conflict(_) => "conflict",
            AppError::Config(_) | AppError::ConfigLoad | AppError::ConfigSave => "config",
            AppError::InvalidExportFormat(_) | AppError::Export(_) => "export",
            AppError::Other(_) => "internal",
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
