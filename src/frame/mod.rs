//! Builds the chart-ready hourly frame from a raw provider payload.
//!
//! The frame holds exactly the five source columns (timestamp plus four
//! numeric series) and two derived smoothed columns. Building is a pure
//! transformation: no I/O, deterministic for identical input, and an
//! all-or-nothing schema check: a payload missing any required field
//! produces a [`SchemaError`] and no frame.

mod error;

pub use error::SchemaError;

use crate::forecast::RawForecastPayload;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use polars::prelude::*;

/// Timestamp column, timezone-naive, millisecond precision.
pub const COL_TIME: &str = "time";
/// Air temperature in °C.
pub const COL_TEMPERATURE: &str = "temperature";
/// Apparent temperature in °C (provider field `felttemperature`).
pub const COL_FELT_TEMPERATURE: &str = "felt_temperature";
/// Total precipitation in mm.
pub const COL_PRECIPITATION: &str = "precipitation";
/// Convective precipitation in mm.
pub const COL_CONVECTIVE_PRECIPITATION: &str = "convective_precipitation";
/// Trailing mean of [`COL_TEMPERATURE`] (window 3, min window 1).
pub const COL_SMOOTH_TEMPERATURE: &str = "smooth_temperature";
/// Trailing mean of [`COL_FELT_TEMPERATURE`] (window 3, min window 1).
pub const COL_SMOOTH_FELT_TEMPERATURE: &str = "smooth_felt_temperature";

/// Timestamp layout used by the `basic-1h` package.
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

const SMOOTH_WINDOW: usize = 3;

/// An immutable hourly forecast frame.
///
/// Wraps a polars [`DataFrame`] with the fixed column set described at the
/// module level. Rows keep the provider's chronological order; the frame is
/// never re-sorted or mutated after creation. Day views are fresh frames
/// produced by [`ForecastFrame::filter_day`].
#[derive(Debug, Clone)]
pub struct ForecastFrame {
    df: DataFrame,
}

impl ForecastFrame {
    pub(crate) fn new(df: DataFrame) -> Self {
        Self { df }
    }

    /// The underlying polars frame, read-only.
    #[must_use]
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    /// Number of hourly records.
    #[must_use]
    pub fn height(&self) -> usize {
        self.df.height()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// Returns the subsequence of records whose calendar date equals `date`,
    /// preserving relative order.
    ///
    /// A date outside the forecast span yields an empty frame, which the
    /// caller treats as "no data" rather than an error.
    pub fn filter_day(&self, date: NaiveDate) -> Result<ForecastFrame, SchemaError> {
        let start = date.and_time(NaiveTime::MIN);
        let end = start + Duration::days(1);
        let df = self
            .df
            .clone()
            .lazy()
            .filter(col(COL_TIME).gt_eq(lit(start)).and(col(COL_TIME).lt(lit(end))))
            .collect()?;
        Ok(ForecastFrame::new(df))
    }

    /// `(first, last)` calendar dates present in the frame, or `None` when
    /// the frame is empty. Used to bound the date selector.
    pub fn date_span(&self) -> Result<Option<(NaiveDate, NaiveDate)>, SchemaError> {
        let ca = self.df.column(COL_TIME)?.as_materialized_series().datetime()?;
        let span = match (ca.min(), ca.max()) {
            (Some(min), Some(max)) => ms_to_date(min).zip(ms_to_date(max)),
            _ => None,
        };
        Ok(span)
    }

    /// The parsed timestamps, in row order. Entries are never null for a
    /// frame built by [`build_frame`].
    pub fn times(&self) -> Result<Vec<NaiveDateTime>, SchemaError> {
        let ca = self.df.column(COL_TIME)?.as_materialized_series().datetime()?;
        Ok(ca.as_datetime_iter().flatten().collect())
    }
}

fn ms_to_date(ms: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp_millis(ms).map(|dt| dt.naive_utc().date())
}

/// Builds a [`ForecastFrame`] from a raw payload.
///
/// Selects the five required fields (anything else in the payload is
/// dropped), parses timestamps as timezone-naive `%Y-%m-%d %H:%M`, and
/// derives the two smoothed columns. Null source values stay null; the
/// trailing mean averages whatever non-null values fall in its window.
///
/// # Errors
///
/// * [`SchemaError::MissingSeries`]: no `data_1h` in the payload.
/// * [`SchemaError::MissingColumn`]: a required field is absent.
/// * [`SchemaError::LengthMismatch`]: a value series disagrees with `time`.
/// * [`SchemaError::TimestampParse`]: a timestamp has an unexpected layout.
pub fn build_frame(payload: &RawForecastPayload) -> Result<ForecastFrame, SchemaError> {
    let series = payload.data_1h.as_ref().ok_or(SchemaError::MissingSeries)?;

    let time = series
        .time
        .as_ref()
        .ok_or(SchemaError::MissingColumn { column: COL_TIME })?;
    let temperature = required(&series.temperature, COL_TEMPERATURE, time.len())?;
    let felt = required(&series.felttemperature, COL_FELT_TEMPERATURE, time.len())?;
    let precipitation = required(&series.precipitation, COL_PRECIPITATION, time.len())?;
    let convective = required(
        &series.convective_precipitation,
        COL_CONVECTIVE_PRECIPITATION,
        time.len(),
    )?;

    let mut parsed: Vec<NaiveDateTime> = Vec::with_capacity(time.len());
    for value in time {
        let dt = NaiveDateTime::parse_from_str(value, TIME_FORMAT).map_err(|source| {
            SchemaError::TimestampParse {
                value: value.clone(),
                source,
            }
        })?;
        parsed.push(dt);
    }

    let columns: Vec<Column> = vec![
        DatetimeChunked::from_naive_datetime(COL_TIME.into(), parsed, TimeUnit::Milliseconds)
            .into_series()
            .into(),
        Series::new(COL_TEMPERATURE.into(), temperature).into(),
        Series::new(COL_FELT_TEMPERATURE.into(), felt).into(),
        Series::new(COL_PRECIPITATION.into(), precipitation).into(),
        Series::new(COL_CONVECTIVE_PRECIPITATION.into(), convective).into(),
    ];
    let df = DataFrame::new(columns)?;

    let options = RollingOptionsFixedWindow {
        window_size: SMOOTH_WINDOW,
        min_periods: 1,
        ..Default::default()
    };
    let df = df
        .lazy()
        .with_columns([
            col(COL_TEMPERATURE)
                .rolling_mean(options.clone())
                .alias(COL_SMOOTH_TEMPERATURE),
            col(COL_FELT_TEMPERATURE)
                .rolling_mean(options)
                .alias(COL_SMOOTH_FELT_TEMPERATURE),
        ])
        .collect()?;

    Ok(ForecastFrame::new(df))
}

fn required<'a>(
    field: &'a Option<Vec<Option<f64>>>,
    column: &'static str,
    expected: usize,
) -> Result<&'a [Option<f64>], SchemaError> {
    let values = field.as_ref().ok_or(SchemaError::MissingColumn { column })?;
    if values.len() != expected {
        return Err(SchemaError::LengthMismatch {
            column,
            expected,
            found: values.len(),
        });
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::HourlySeries;
    use chrono::NaiveDate;

    fn hourly_payload(hours: usize) -> RawForecastPayload {
        let start = NaiveDate::from_ymd_opt(2026, 8, 3)
            .unwrap()
            .and_time(NaiveTime::MIN);
        let time: Vec<String> = (0..hours)
            .map(|h| (start + Duration::hours(h as i64)).format(TIME_FORMAT).to_string())
            .collect();
        let values: Vec<Option<f64>> = (0..hours).map(|h| Some(10.0 + h as f64)).collect();
        RawForecastPayload {
            error_message: None,
            data_1h: Some(HourlySeries {
                time: Some(time),
                temperature: Some(values.clone()),
                felttemperature: Some(values.clone()),
                precipitation: Some(vec![Some(0.0); hours]),
                convective_precipitation: Some(vec![Some(0.0); hours]),
            }),
        }
    }

    fn column_values(frame: &ForecastFrame, name: &str) -> Vec<Option<f64>> {
        frame
            .dataframe()
            .column(name)
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .collect()
    }

    #[test]
    fn selects_exactly_the_frame_columns() {
        let frame = build_frame(&hourly_payload(4)).unwrap();
        let names: Vec<&str> = frame
            .dataframe()
            .get_column_names()
            .iter()
            .map(|n| n.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                COL_TIME,
                COL_TEMPERATURE,
                COL_FELT_TEMPERATURE,
                COL_PRECIPITATION,
                COL_CONVECTIVE_PRECIPITATION,
                COL_SMOOTH_TEMPERATURE,
                COL_SMOOTH_FELT_TEMPERATURE,
            ]
        );
        assert_eq!(frame.height(), 4);
    }

    #[test]
    fn smoothing_uses_trailing_window_with_min_one() {
        let mut payload = hourly_payload(4);
        let series = payload.data_1h.as_mut().unwrap();
        series.temperature = Some(vec![Some(10.0), Some(20.0), Some(30.0), Some(40.0)]);

        let frame = build_frame(&payload).unwrap();
        let smooth = column_values(&frame, COL_SMOOTH_TEMPERATURE);
        assert_eq!(
            smooth,
            vec![Some(10.0), Some(15.0), Some(20.0), Some(30.0)]
        );
    }

    #[test]
    fn smoothing_averages_over_non_null_window_values() {
        let mut payload = hourly_payload(3);
        let series = payload.data_1h.as_mut().unwrap();
        series.temperature = Some(vec![Some(10.0), None, Some(30.0)]);

        let frame = build_frame(&payload).unwrap();
        let raw = column_values(&frame, COL_TEMPERATURE);
        let smooth = column_values(&frame, COL_SMOOTH_TEMPERATURE);
        assert_eq!(raw[1], None);
        assert_eq!(smooth[0], Some(10.0));
        assert_eq!(smooth[1], Some(10.0));
        assert_eq!(smooth[2], Some(20.0));
    }

    #[test]
    fn missing_series_is_a_schema_error() {
        let payload = RawForecastPayload {
            error_message: None,
            data_1h: None,
        };
        assert!(matches!(
            build_frame(&payload),
            Err(SchemaError::MissingSeries)
        ));
    }

    #[test]
    fn missing_precipitation_is_a_schema_error() {
        let mut payload = hourly_payload(3);
        payload.data_1h.as_mut().unwrap().precipitation = None;
        assert!(matches!(
            build_frame(&payload),
            Err(SchemaError::MissingColumn {
                column: COL_PRECIPITATION
            })
        ));
    }

    #[test]
    fn length_mismatch_is_a_schema_error() {
        let mut payload = hourly_payload(3);
        payload.data_1h.as_mut().unwrap().felttemperature = Some(vec![Some(1.0)]);
        assert!(matches!(
            build_frame(&payload),
            Err(SchemaError::LengthMismatch {
                column: COL_FELT_TEMPERATURE,
                expected: 3,
                found: 1,
            })
        ));
    }

    #[test]
    fn malformed_timestamp_is_a_schema_error() {
        let mut payload = hourly_payload(2);
        payload.data_1h.as_mut().unwrap().time =
            Some(vec!["2026-08-03 00:00".to_string(), "not a time".to_string()]);
        assert!(matches!(
            build_frame(&payload),
            Err(SchemaError::TimestampParse { .. })
        ));
    }

    #[test]
    fn times_are_non_decreasing_and_order_preserved() {
        let frame = build_frame(&hourly_payload(48)).unwrap();
        let times = frame.times().unwrap();
        assert_eq!(times.len(), 48);
        assert!(times.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn filter_day_selects_exactly_the_matching_date() {
        let frame = build_frame(&hourly_payload(72)).unwrap();
        let second_day = NaiveDate::from_ymd_opt(2026, 8, 4).unwrap();

        let day = frame.filter_day(second_day).unwrap();
        assert_eq!(day.height(), 24);
        let times = day.times().unwrap();
        assert!(times.iter().all(|t| t.date() == second_day));
        assert!(times.windows(2).all(|w| w[0] <= w[1]));

        // Raw values carried over unchanged for the slice.
        let temps = column_values(&day, COL_TEMPERATURE);
        assert_eq!(temps[0], Some(34.0)); // 10.0 + hour 24
    }

    #[test]
    fn filter_day_outside_span_is_empty_not_an_error() {
        let frame = build_frame(&hourly_payload(24)).unwrap();
        let outside = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
        let day = frame.filter_day(outside).unwrap();
        assert!(day.is_empty());
    }

    #[test]
    fn date_span_covers_first_and_last_record() {
        let frame = build_frame(&hourly_payload(72)).unwrap();
        let span = frame.date_span().unwrap().expect("non-empty frame");
        assert_eq!(
            span,
            (
                NaiveDate::from_ymd_opt(2026, 8, 3).unwrap(),
                NaiveDate::from_ymd_opt(2026, 8, 5).unwrap()
            )
        );

        let empty = frame
            .filter_day(NaiveDate::from_ymd_opt(2027, 1, 1).unwrap())
            .unwrap();
        assert!(empty.date_span().unwrap().is_none());
    }
}
