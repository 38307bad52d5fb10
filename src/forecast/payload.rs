//! Serde model of the Meteoblue `basic-1h` response.
//!
//! Only the hourly series and the embedded error indicator are modeled;
//! everything else in the response is ignored. Every series field is
//! optional so that a missing field surfaces as a schema failure at frame
//! build time rather than a decode failure here.

use serde::{Deserialize, Serialize};

/// Raw provider response for one `(lat, lon)` fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawForecastPayload {
    /// Business-level error embedded in an otherwise well-formed body.
    #[serde(default)]
    pub error_message: Option<String>,

    /// The hourly time series, struct-of-arrays as the provider sends it.
    #[serde(default)]
    pub data_1h: Option<HourlySeries>,
}

/// Per-hour series arrays. Individual entries may be `null`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HourlySeries {
    #[serde(default)]
    pub time: Option<Vec<String>>,

    #[serde(default)]
    pub temperature: Option<Vec<Option<f64>>>,

    /// Apparent temperature; the provider spells it without an underscore.
    #[serde(default)]
    pub felttemperature: Option<Vec<Option<f64>>>,

    #[serde(default)]
    pub precipitation: Option<Vec<Option<f64>>>,

    #[serde(default)]
    pub convective_precipitation: Option<Vec<Option<f64>>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_hourly_series() {
        let body = r#"{
            "metadata": {"latitude": -16.4, "longitude": -71.54},
            "data_1h": {
                "time": ["2026-08-03 00:00", "2026-08-03 01:00"],
                "temperature": [12.1, null],
                "felttemperature": [11.0, 10.5],
                "precipitation": [0.0, 0.2],
                "convective_precipitation": [0.0, 0.0],
                "windspeed": [3.0, 2.5]
            }
        }"#;

        let payload: RawForecastPayload = serde_json::from_str(body).expect("valid payload");
        assert!(payload.error_message.is_none());
        let series = payload.data_1h.expect("hourly series present");
        assert_eq!(series.time.as_deref().map(<[String]>::len), Some(2));
        assert_eq!(series.temperature, Some(vec![Some(12.1), None]));
    }

    #[test]
    fn missing_field_decodes_as_none() {
        // `precipitation` absent: still a valid payload, rejected later by
        // the frame builder.
        let body = r#"{
            "data_1h": {
                "time": ["2026-08-03 00:00"],
                "temperature": [12.1],
                "felttemperature": [11.0],
                "convective_precipitation": [0.0]
            }
        }"#;

        let payload: RawForecastPayload = serde_json::from_str(body).expect("valid payload");
        let series = payload.data_1h.expect("hourly series present");
        assert!(series.precipitation.is_none());
    }

    #[test]
    fn embedded_error_is_captured() {
        let body = r#"{"error_message": "API key is invalid"}"#;
        let payload: RawForecastPayload = serde_json::from_str(body).expect("valid payload");
        assert_eq!(payload.error_message.as_deref(), Some("API key is invalid"));
        assert!(payload.data_1h.is_none());
    }
}
