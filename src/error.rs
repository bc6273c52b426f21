// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MetadataError>;

/// Fatal failures of a normalization run. Unparseable dates are not errors;
/// they become `NaT` in the output.
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// A column the pipeline reads is not in the sheet's header row.
    #[error("Missing required column '{0}' in input header")]
    Schema(String),

    #[error("Workbook has no sheets: {}", .0.display())]
    EmptyWorkbook(PathBuf),

    #[error("Failed to read spreadsheet {}: {source}", path.display())]
    Spreadsheet {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("Invalid passage filter pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("TSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write output {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
