use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    /// The frame has no records (or the column no values) to summarize.
    /// A "no data" signal for the caller, not an end-user error.
    #[error("No data available in the frame")]
    EmptyFrame,

    #[error("No y columns supplied for the chart")]
    NoSeries,

    #[error("Column '{column}' is not usable for charting")]
    Column {
        column: String,
        #[source]
        source: PolarsError,
    },

    #[error("Failed preparing chart data: {0}")]
    Frame(#[from] PolarsError),
}
