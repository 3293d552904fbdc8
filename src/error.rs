use std::path::PathBuf;

use thiserror::Error;

use crate::models::SourceKind;

/// A single row that could not be turned into a record. The loader skips it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("missing required field '{column}'")]
    MissingField { column: &'static str },

    #[error("field '{column}' is not a valid integer: '{value}'")]
    InvalidNumber { column: &'static str, value: String },

    #[error("field '{column}' must be a positive id")]
    NonPositiveId { column: &'static str },

    #[error("unknown participation status code {0}")]
    UnknownStatus(i64),

    #[error("malformed row: {0}")]
    Malformed(String),
}

/// A source that could not be read at all. Fatal to startup.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to open {kind} source {}: {source}", .path.display())]
    Open {
        kind: SourceKind,
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to read header row of {kind} source: {source}")]
    Header {
        kind: SourceKind,
        #[source]
        source: csv::Error,
    },

    #[error("failed to read {kind} source near line {line}: {source}")]
    Read {
        kind: SourceKind,
        line: u64,
        #[source]
        source: csv::Error,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("member {member_id} has a participation in unknown survey {survey_id}")]
    UnknownSurvey { member_id: u64, survey_id: u64 },
}

pub type LoadResult<T> = Result<T, LoadError>;
pub type QueryResult<T> = Result<T, QueryError>;
