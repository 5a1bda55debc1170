use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrateError {
    #[error("Cannot access input file {path:?}: {source}")]
    FileAccess {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unrecognized spreadsheet format for {path:?}: {reason}")]
    SpreadsheetFormat { path: PathBuf, reason: String },

    #[error("Spreadsheet {0:?} contains no sheets")]
    EmptyWorkbook(PathBuf),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("API request error: {0}")]
    ApiRequestError(reqwest::Error),

    #[error("Failed to decode API JSON response: {0}")]
    ApiJsonDecodeError(reqwest::Error),

    #[error("Unexpected API response format: {0}")]
    MalformedResponse(String),

    #[error("Invalid progress bar template: {0}")]
    ProgressTemplate(#[from] indicatif::style::TemplateError),
}

pub type Result<T> = std::result::Result<T, CrateError>;
