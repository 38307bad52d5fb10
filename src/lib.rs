pub mod catalog;
mod chart;
mod config;
mod dashboard;
mod error;
mod forecast;
mod frame;

pub use error::PerucastError;

pub use catalog::{City, LatLon, CITIES};
pub use chart::{render, summary, ChartError, ChartHandle, ChartKind, Summary};
pub use config::{Config, ConfigError};
pub use dashboard::{
    about, Dashboard, DashboardState, Section, Selection, View, ViewBody, DATE_FMT_DETAIL,
    DATE_FMT_OVERVIEW, MSG_NO_DATA, MSG_SELECT_DATE, MSG_SELECT_LOCATION,
};
pub use forecast::{
    FetchError, ForecastClient, ForecastSource, HourlySeries, RawForecastPayload, METEODATA_URL,
};
pub use frame::{
    build_frame, ForecastFrame, SchemaError, COL_CONVECTIVE_PRECIPITATION, COL_FELT_TEMPERATURE,
    COL_PRECIPITATION, COL_SMOOTH_FELT_TEMPERATURE, COL_SMOOTH_TEMPERATURE, COL_TEMPERATURE,
    COL_TIME,
};
