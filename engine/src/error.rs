use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// The snapshot had no usable content at all; rendered as a graceful
    /// "no data" condition, not a failure.
    #[error("no data found in the snapshot")]
    NoData,

    /// A fixed-offset column did not carry the expected header label.
    /// Failing fast here beats silently misaligning every column after it.
    #[error("schema mismatch at column {offset}: expected '{expected}', found '{found}'")]
    SchemaMismatch {
        offset: usize,
        expected: String,
        found: String,
    },

    #[error("invalid date '{raw}' at data row {row}: {source}")]
    InvalidDate {
        row: usize,
        raw: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("company '{0}' not present in the share totals table")]
    UnknownCompany(String),

    #[error("no usable total-shares figure for company '{0}'")]
    MissingTotalShares(String),

    #[error("total capital is zero, WACC is undefined")]
    ZeroCapital,

    #[error("CSV error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
