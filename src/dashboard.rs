//! The view orchestrator: an explicit state machine driven by selection
//! events.
//!
//! Fetch and frame building happen only when a location is selected, never
//! on re-render. A date selection filters the already-built frame; it does
//! not trigger a new fetch. Deselecting the location returns to the initial
//! state. There is no terminal state, the machine lives for the session.

use crate::catalog::{self, LatLon};
use crate::chart::{render, summary, ChartHandle, ChartKind, Summary};
use crate::error::PerucastError;
use crate::forecast::ForecastSource;
use crate::frame::{self, build_frame, ForecastFrame};
use chrono::NaiveDate;
use log::info;

/// X-axis tick format for the 7-day overview (day granularity).
pub const DATE_FMT_OVERVIEW: &str = "%d-%m-%Y";
/// X-axis tick format for the 1-day detail (hour:minute granularity).
pub const DATE_FMT_DETAIL: &str = "%H:%M";

const LABEL_TEMP: &str = "Temperature (°C)";
const LABEL_TOTAL_PRECIP: &str = "Total Precipitation (mm)";
const LABEL_CONV_PRECIP: &str = "Convective Precipitation - rains (mm)";
const LABEL_DATE: &str = "Date";
const LABEL_HOURS: &str = "Time (hours)";

pub const MSG_SELECT_LOCATION: &str = "Please select a location to view the forecast.";
pub const MSG_SELECT_DATE: &str = "Please select a date to get a detailed view.";
pub const MSG_NO_DATA: &str = "No data available.";

/// The location currently driving the dashboard, with its built frame.
pub struct Selection {
    pub label: String,
    pub coordinate: LatLon,
    pub frame: ForecastFrame,
}

/// Session state. Transitions are driven purely by user selection events.
pub enum DashboardState {
    /// Initial state: nothing selected, nothing fetched.
    NoLocation,
    /// A location is selected and its 7-day frame is built.
    LocationSelected(Selection),
    /// A location and a calendar date are selected.
    LocationAndDateSelected(Selection, NaiveDate),
}

/// One chart section of a view: a title, the max/min summary for its lead
/// column, and the rendered chart.
pub struct Section {
    pub title: String,
    pub unit: &'static str,
    pub summary: Summary,
    pub chart: ChartHandle,
}

pub enum ViewBody {
    Sections(Vec<Section>),
    /// The frame (or day slice) holds no records. Expected for a date with
    /// no matching hours; shown as a notice, not an error.
    NoData,
}

/// A rendered view: the weekly overview or the daily detail.
pub struct View {
    pub heading: String,
    pub body: ViewBody,
}

/// The dashboard session.
///
/// Owns the catalog labels, a forecast source (the memoizing client in
/// production), and the current [`DashboardState`].
pub struct Dashboard {
    labels: Vec<String>,
    source: Box<dyn ForecastSource>,
    state: DashboardState,
}

impl Dashboard {
    #[must_use]
    pub fn new(source: Box<dyn ForecastSource>) -> Self {
        Self {
            labels: catalog::labels(),
            source,
            state: DashboardState::NoLocation,
        }
    }

    /// Display labels for the location selector, in catalog order.
    #[must_use]
    pub fn location_labels(&self) -> &[String] {
        &self.labels
    }

    #[must_use]
    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Selects a location: resolves the label, fetches its payload through
    /// the source, builds the frame and enters `LocationSelected`.
    ///
    /// Any previous date selection is cleared; the new frame's date bounds
    /// may not contain it.
    ///
    /// # Errors
    ///
    /// [`PerucastError::UnknownLocation`] for a label outside the catalog;
    /// fetch and schema failures pass through, leaving the state unchanged.
    pub async fn select_location(&mut self, label: &str) -> Result<(), PerucastError> {
        let coordinate = catalog::lookup(label)
            .ok_or_else(|| PerucastError::UnknownLocation(label.to_string()))?;

        info!("Location selected: {label} at {coordinate:?}");
        let payload = self.source.fetch(coordinate).await?;
        let frame = build_frame(&payload)?;

        self.state = DashboardState::LocationSelected(Selection {
            label: label.to_string(),
            coordinate,
            frame,
        });
        Ok(())
    }

    /// Selects the calendar date for the detail view. No fetch occurs; the
    /// date filter operates on the already-built frame.
    ///
    /// # Errors
    ///
    /// [`PerucastError::NoLocationSelected`] when no location is active.
    pub fn select_date(&mut self, date: NaiveDate) -> Result<(), PerucastError> {
        let state = std::mem::replace(&mut self.state, DashboardState::NoLocation);
        match state {
            DashboardState::NoLocation => Err(PerucastError::NoLocationSelected),
            DashboardState::LocationSelected(selection)
            | DashboardState::LocationAndDateSelected(selection, _) => {
                self.state = DashboardState::LocationAndDateSelected(selection, date);
                Ok(())
            }
        }
    }

    /// Drops the date selection, returning to `LocationSelected`.
    pub fn clear_date(&mut self) {
        let state = std::mem::replace(&mut self.state, DashboardState::NoLocation);
        self.state = match state {
            DashboardState::LocationAndDateSelected(selection, _) => {
                DashboardState::LocationSelected(selection)
            }
            other => other,
        };
    }

    /// Drops the location (and any date), returning to the initial state.
    pub fn clear_location(&mut self) {
        self.state = DashboardState::NoLocation;
    }

    fn selection(&self) -> Option<&Selection> {
        match &self.state {
            DashboardState::NoLocation => None,
            DashboardState::LocationSelected(selection)
            | DashboardState::LocationAndDateSelected(selection, _) => Some(selection),
        }
    }

    /// `(first, last)` calendar dates of the current frame, used to bound
    /// the date selector. `None` when nothing is selected or the frame is
    /// empty.
    pub fn date_bounds(&self) -> Result<Option<(NaiveDate, NaiveDate)>, PerucastError> {
        match self.selection() {
            Some(selection) => Ok(selection.frame.date_span()?),
            None => Ok(None),
        }
    }

    /// Renders the 7-day overview from the full frame.
    ///
    /// # Errors
    ///
    /// [`PerucastError::NoLocationSelected`] before any location is chosen.
    pub fn overview(&self) -> Result<View, PerucastError> {
        let selection = self
            .selection()
            .ok_or(PerucastError::NoLocationSelected)?;
        let heading = format!("Location: {}", selection.label);
        if selection.frame.is_empty() {
            return Ok(View {
                heading,
                body: ViewBody::NoData,
            });
        }
        let sections = build_sections(&selection.frame, LABEL_DATE, DATE_FMT_OVERVIEW, "")?;
        Ok(View {
            heading,
            body: ViewBody::Sections(sections),
        })
    }

    /// Renders the 1-day detail from the frame filtered to the selected
    /// date. A date matching no records yields a [`ViewBody::NoData`] view.
    ///
    /// # Errors
    ///
    /// [`PerucastError::NoLocationSelected`] / [`PerucastError::NoDateSelected`]
    /// when the machine is not in `LocationAndDateSelected`.
    pub fn detail(&self) -> Result<View, PerucastError> {
        let (selection, date) = match &self.state {
            DashboardState::NoLocation => return Err(PerucastError::NoLocationSelected),
            DashboardState::LocationSelected(_) => return Err(PerucastError::NoDateSelected),
            DashboardState::LocationAndDateSelected(selection, date) => (selection, *date),
        };
        let heading = format!("Location: {} on {date}", selection.label);
        let day = selection.frame.filter_day(date)?;
        if day.is_empty() {
            return Ok(View {
                heading,
                body: ViewBody::NoData,
            });
        }
        let sections = build_sections(&day, LABEL_HOURS, DATE_FMT_DETAIL, " (24h)")?;
        Ok(View {
            heading,
            body: ViewBody::Sections(sections),
        })
    }
}

/// Static informational text for the third dashboard tab.
#[must_use]
pub fn about() -> &'static str {
    "Peru Regional Telemetry visualizes 7-day hourly weather forecasts for \
     strategic locations in Peru: pick a city, analyze weekly temperature \
     and precipitation trends, then drill into any single 24-hour period. \
     Forecast data provided by the Meteoblue API."
}

fn build_sections(
    frame: &ForecastFrame,
    x_label: &str,
    time_format: &str,
    title_suffix: &str,
) -> Result<Vec<Section>, PerucastError> {
    let specs: [(&str, &'static str, &'static [&'static str], &str, ChartKind); 3] = [
        (
            "Temperature",
            "°C",
            &[frame::COL_TEMPERATURE, frame::COL_FELT_TEMPERATURE],
            LABEL_TEMP,
            ChartKind::Line,
        ),
        (
            "All precipitations",
            "mm",
            &[frame::COL_PRECIPITATION],
            LABEL_TOTAL_PRECIP,
            ChartKind::Bar,
        ),
        (
            "Convective precipitations",
            "mm",
            &[frame::COL_CONVECTIVE_PRECIPITATION],
            LABEL_CONV_PRECIP,
            ChartKind::Bar,
        ),
    ];

    let mut sections = Vec::with_capacity(specs.len());
    for (title, unit, y_columns, y_label, kind) in specs {
        // The summary tracks the section's lead column.
        let section_summary = summary(frame, y_columns[0])?;
        let chart = render()
            .frame(frame)
            .kind(kind)
            .y_columns(y_columns)
            .x_label(x_label)
            .y_label(y_label)
            .time_format(time_format)
            .call()?;
        sections.push(Section {
            title: format!("{title}{title_suffix}"),
            unit,
            summary: section_summary,
            chart,
        });
    }
    Ok(sections)
}
