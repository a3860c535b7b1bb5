use thiserror::Error;

/// Errors that can occur while converting a statement
/// Every variant is fatal to the run: no retries, no partial output
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("unknown transaction category '{category}' on line {line}")]
    UnknownCategory { line: usize, category: String },

    #[error("malformed date '{value}' on line {line}, expected MM/DD/YYYY")]
    MalformedDate { line: usize, value: String },

    #[error("malformed amount '{value}' on line {line}")]
    MalformedAmount { line: usize, value: String },

    #[error("header row is missing the '{0}' column")]
    MissingColumn(&'static str),

    #[error("row on line {line} has no '{column}' field")]
    MissingField { line: usize, column: &'static str },

    #[error("cannot render a transaction of unknown kind")]
    UnsupportedTransactionKind,

    #[error("statement contains no transactions")]
    EmptyStatement,
}

pub type Result<T> = std::result::Result<T, ConvertError>;
