use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("verb must not be empty")]
    EmptyVerb,

    #[error("failed to retrieve conjugation page: {0}")]
    Retrieval(String),

    #[error("section anchor '{0}' not found in page")]
    SectionNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid record: {0}")]
    InvalidRecord(String),

    #[error("invalid option: {0}")]
    InvalidOption(String),
}

impl ExtractError {
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyVerb => "empty_verb",
            Self::Retrieval(_) => "retrieval_error",
            Self::SectionNotFound(_) => "section_not_found",
            Self::Io(_) => "io_error",
            Self::Csv(_) => "csv_error",
            Self::Json(_) => "json_error",
            Self::InvalidRecord(_) => "invalid_record",
            Self::InvalidOption(_) => "invalid_option",
        }
    }
}
