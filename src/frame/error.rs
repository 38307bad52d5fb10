use polars::prelude::PolarsError;
use thiserror::Error;

/// Failures while turning a raw payload into a [`crate::ForecastFrame`],
/// or while deriving views from one.
///
/// Any of these means no (partial) frame is produced: downstream smoothing
/// and metrics assume all required columns are present.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Hourly series 'data_1h' not found in payload")]
    MissingSeries,

    #[error("Required field '{column}' not found in hourly series")]
    MissingColumn { column: &'static str },

    #[error("Series '{column}' has {found} values but 'time' has {expected}")]
    LengthMismatch {
        column: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Failed to parse timestamp '{value}'")]
    TimestampParse {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Failed processing frame: {0}")]
    Frame(#[from] PolarsError),
}
