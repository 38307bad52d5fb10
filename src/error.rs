use crate::chart::ChartError;
use crate::config::ConfigError;
use crate::forecast::FetchError;
use crate::frame::SchemaError;
use thiserror::Error;

/// Crate-level error, wrapping the per-stage failures plus the dashboard's
/// own selection errors.
#[derive(Debug, Error)]
pub enum PerucastError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Chart(#[from] ChartError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Unknown location label '{0}'")]
    UnknownLocation(String),

    #[error("No location is selected")]
    NoLocationSelected,

    #[error("No date is selected")]
    NoDateSelected,
}
