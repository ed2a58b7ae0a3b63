// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while turning a CSV file into a table.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("file contains no data rows")]
    Empty,

    #[error("no date column found")]
    MissingDateColumn,

    #[error("column '{column}' contains an unparseable date: '{value}'")]
    DateParse { column: String, value: String },
}

/// Errors raised by the statistical routines. These are recoverable: the
/// UI reports them as banners and keeps rendering the rest of the page.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("series has {len} points, need at least {min}")]
    SeriesTooShort { len: usize, min: usize },

    #[error("sample '{name}' has {len} usable values, need at least 2")]
    SampleTooSmall { name: String, len: usize },

    #[error("need at least two categorical columns")]
    InsufficientCategoricalColumns,

    #[error("contingency table needs at least two levels per variable")]
    DegenerateTable,

    #[error("series contains missing or non-finite values")]
    MissingValues,

    #[error("distribution parameters invalid: {0}")]
    Distribution(String),

    #[error("test statistic is not finite (degenerate input)")]
    NonFiniteStatistic,
}
