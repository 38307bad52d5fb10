//! Summary metrics and chart rendering over a [`ForecastFrame`].
//!
//! Both operations are stateless: [`summary`] reduces one column to its
//! max/min, and [`render`] turns frame columns into an opaque
//! [`ChartHandle`] given axis labels, a chart kind, and a time tick format.
//! The handle owns its figure; there is no shared canvas state.

mod error;

pub use error::ChartError;

use crate::frame::{ForecastFrame, COL_TIME};
use bon::builder;
use plotlars::{BarPlot, Plot, Rgb, TimeSeriesPlot};
use polars::prelude::*;

/// Chart family. Bar charts draw a single series: with several `y_columns`
/// only the first is used, the rest are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Bar,
}

/// Max/min of one frame column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub max: f64,
    pub min: f64,
}

/// Computes the max/min summary for `column`.
///
/// # Errors
///
/// [`ChartError::EmptyFrame`] when the frame has zero records or the column
/// holds no non-null values; [`ChartError::Column`] when the column is
/// missing or not numeric.
pub fn summary(frame: &ForecastFrame, column: &str) -> Result<Summary, ChartError> {
    if frame.is_empty() {
        return Err(ChartError::EmptyFrame);
    }
    let values = frame
        .dataframe()
        .column(column)
        .and_then(|c| c.f64())
        .map_err(|source| ChartError::Column {
            column: column.to_string(),
            source,
        })?;
    match (values.max(), values.min()) {
        (Some(max), Some(min)) => Ok(Summary { max, min }),
        _ => Err(ChartError::EmptyFrame),
    }
}

/// An opaque, fully-built chart.
///
/// Produced by [`render`]; can be shown (opens the default browser) or
/// written to a standalone HTML file.
pub struct ChartHandle {
    inner: ChartInner,
}

enum ChartInner {
    Line(TimeSeriesPlot),
    Bar(BarPlot),
}

impl ChartHandle {
    #[must_use]
    pub fn kind(&self) -> ChartKind {
        match self.inner {
            ChartInner::Line(_) => ChartKind::Line,
            ChartInner::Bar(_) => ChartKind::Bar,
        }
    }

    /// Opens the chart in the default browser.
    pub fn show(&self) {
        match &self.inner {
            ChartInner::Line(plot) => plot.plot(),
            ChartInner::Bar(plot) => plot.plot(),
        }
    }

    /// Writes the chart to a standalone HTML file.
    pub fn write_html(&self, path: &str) {
        match &self.inner {
            ChartInner::Line(plot) => plot.write_html(path),
            ChartInner::Bar(plot) => plot.write_html(path),
        }
    }
}

/// Renders frame columns as a chart.
///
/// The x column (default [`COL_TIME`]) is formatted through `time_format`
/// (a chrono format string, e.g. `%d-%m-%Y` for a weekly axis or `%H:%M`
/// for an hourly one), so the tick labels carry the view's granularity.
/// For [`ChartKind::Line`] every `y_column` becomes a separately labeled
/// series over the shared time axis; for [`ChartKind::Bar`] only the first
/// `y_column` is drawn.
///
/// # Errors
///
/// [`ChartError::NoSeries`] when `y_columns` is empty;
/// [`ChartError::Frame`] when a referenced column does not exist.
#[builder]
pub fn render(
    frame: &ForecastFrame,
    kind: ChartKind,
    y_columns: &[&str],
    #[builder(default = COL_TIME)] x_column: &str,
    x_label: &str,
    y_label: &str,
    time_format: &str,
) -> Result<ChartHandle, ChartError> {
    let Some((&first_y, rest)) = y_columns.split_first() else {
        return Err(ChartError::NoSeries);
    };

    // Pre-format the time axis: plotlars takes the x series as strings, so
    // the tick labels are exactly the requested format.
    let mut selection: Vec<Expr> = vec![col(x_column).dt().to_string(time_format).alias(x_column)];
    selection.extend(y_columns.iter().map(|c| col(*c)));
    let plot_df = frame.dataframe().clone().lazy().select(selection).collect()?;

    let inner = match kind {
        ChartKind::Line => ChartInner::Line(
            TimeSeriesPlot::builder()
                .data(&plot_df)
                .x(x_column)
                .y(first_y)
                .additional_series(rest.to_vec())
                .colors(palette(y_columns.len()))
                .x_title(x_label)
                .y_title(y_label)
                .build(),
        ),
        ChartKind::Bar => ChartInner::Bar(
            BarPlot::builder()
                .data(&plot_df)
                .labels(x_column)
                .values(first_y)
                .colors(palette(1))
                .x_title(x_label)
                .y_title(y_label)
                .build(),
        ),
    };

    Ok(ChartHandle { inner })
}

fn palette(n: usize) -> Vec<Rgb> {
    // Measured series in blue, felt/derived series in amber, then spares.
    let base = [(69, 157, 230), (235, 177, 0), (46, 167, 90), (176, 65, 62)];
    (0..n)
        .map(|i| {
            let (r, g, b) = base[i % base.len()];
            Rgb(r, g, b)
        })
        .collect()
}
