mod cache;
mod client;
mod error;
mod payload;

pub use client::{ForecastClient, ForecastSource, METEODATA_URL};
pub use error::FetchError;
pub use payload::{HourlySeries, RawForecastPayload};
