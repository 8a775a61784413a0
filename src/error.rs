use polars::prelude::PolarsError;
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlotError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),

    #[error("Failed to read table {path}: {message}")]
    Table { path: String, message: String },

    #[error("Missing column '{column}' in {table}")]
    MissingColumn { table: String, column: String },

    #[error("No {side} columns found in {table}")]
    MissingColumns { table: String, side: String },

    #[error("Columns '{first}' and '{second}' in {table} resolve to the same tag")]
    AmbiguousColumn {
        table: String,
        first: String,
        second: String,
    },

    #[error("Series '{series}' has {found} rows, expected {expected}")]
    ShapeMismatch {
        series: String,
        expected: usize,
        found: usize,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Invalid parameter: {name} = {value}, {message}")]
    InvalidParameter {
        name: String,
        value: String,
        message: String,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Type alias for Result with PlotError
pub type Result<T> = std::result::Result<T, PlotError>;

impl PlotError {
    /// Create a new Table error for a file that could not be loaded
    pub fn table(path: &Path, message: impl ToString) -> Self {
        PlotError::Table {
            path: path.display().to_string(),
            message: message.to_string(),
        }
    }

    /// Create a new MissingColumn error
    pub fn missing_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        PlotError::MissingColumn {
            table: table.into(),
            column: column.into(),
        }
    }

    /// Create a new ShapeMismatch error
    pub fn shape_mismatch(series: impl Into<String>, expected: usize, found: usize) -> Self {
        PlotError::ShapeMismatch {
            series: series.into(),
            expected,
            found,
        }
    }

    /// Create a new InvalidParameter error
    pub fn invalid_parameter(
        name: impl Into<String>,
        value: impl ToString,
        message: impl Into<String>,
    ) -> Self {
        PlotError::InvalidParameter {
            name: name.into(),
            value: value.to_string(),
            message: message.into(),
        }
    }

    /// Wrap any drawing failure reported by plotters
    pub fn render(err: impl ToString) -> Self {
        PlotError::Render(err.to_string())
    }
}
