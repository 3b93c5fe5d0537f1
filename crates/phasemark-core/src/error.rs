//! Error types for the Phasemark system.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Subcarrier count mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("Subcarrier index {index} out of range for vector of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Measurement loading error: {0}")]
    MeasurementLoad(String),

    #[error("Malformed phase value at row {row}, column {column}: {value}")]
    MalformedValue {
        row: usize,
        column: usize,
        value: String,
    },

    #[error("Plot rendering error: {0}")]
    Plot(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}
