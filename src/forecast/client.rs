//! HTTP client for the Meteoblue `basic-1h` forecast package.
//!
//! One authenticated GET per coordinate pair, with fixed metric units and a
//! 7-day horizon. Successful payloads are memoized per coordinate for 24
//! hours; failures are classified into [`FetchError`] and logged with their
//! operator-facing message.

use crate::catalog::LatLon;
use crate::config::Config;
use crate::forecast::cache::PayloadCache;
use crate::forecast::error::FetchError;
use crate::forecast::payload::RawForecastPayload;
use async_trait::async_trait;
use bon::bon;
use log::{debug, info, warn};
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Default endpoint of the Meteoblue `basic-1h` package.
pub const METEODATA_URL: &str = "https://my.meteoblue.com/packages/basic-1h";

const FORECAST_DAYS: u32 = 7;
const PAYLOAD_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Anything that can produce a raw forecast payload for a coordinate.
///
/// [`ForecastClient`] is the production implementation; the dashboard only
/// depends on this trait, so tests can substitute a canned source.
#[async_trait]
pub trait ForecastSource: Send + Sync {
    /// Fetches the hourly forecast payload for `coordinate`.
    async fn fetch(&self, coordinate: LatLon) -> Result<RawForecastPayload, FetchError>;
}

/// The Meteoblue forecast client.
///
/// Construct via [`ForecastClient::builder`] or [`ForecastClient::from_config`];
/// both fail with [`FetchError::Configuration`] when no usable API key is
/// available, before any network call.
///
/// # Examples
///
/// ```no_run
/// use perucast::{ForecastClient, ForecastSource, LatLon};
///
/// # async fn run() -> Result<(), perucast::FetchError> {
/// let client = ForecastClient::builder()
///     .api_key("my-key".to_string())
///     .build()?;
/// let payload = client.fetch(LatLon(-16.40, -71.54)).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ForecastClient {
    http: Client,
    api_key: String,
    base_url: String,
    cache: PayloadCache,
}

#[bon]
impl ForecastClient {
    /// Creates a client.
    ///
    /// Optional builder fields:
    /// * `.base_url(..)`: override the provider endpoint (tests, proxies).
    /// * `.payload_ttl(..)`: override the 24-hour memoization window.
    ///
    /// # Errors
    ///
    /// [`FetchError::Configuration`] when the API key is blank.
    #[builder]
    pub fn new(
        api_key: String,
        #[builder(default = METEODATA_URL.to_string())] base_url: String,
        #[builder(default = PAYLOAD_TTL)] payload_ttl: Duration,
    ) -> Result<Self, FetchError> {
        if api_key.trim().is_empty() {
            return Err(FetchError::Configuration {
                message: "API key is empty".to_string(),
            });
        }
        Ok(Self {
            http: Client::new(),
            api_key,
            base_url,
            cache: PayloadCache::new(payload_ttl),
        })
    }
}

impl ForecastClient {
    /// Creates a client from loaded [`Config`].
    ///
    /// # Errors
    ///
    /// [`FetchError::Configuration`] when the config carries no API key.
    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        let api_key = config.api_key.clone().ok_or_else(|| FetchError::Configuration {
            message: "no API key configured; set METEOBLUE_API_KEY or add api_key to config.toml"
                .to_string(),
        })?;
        Self::builder().api_key(api_key).build()
    }

    async fn fetch_remote(&self, coordinate: LatLon) -> Result<RawForecastPayload, FetchError> {
        let LatLon(lat, lon) = coordinate;
        let params = [
            ("apikey", self.api_key.clone()),
            ("lat", lat.to_string()),
            ("lon", lon.to_string()),
            ("format", "json".to_string()),
            ("forecast_days", FORECAST_DAYS.to_string()),
            ("temperature", "C".to_string()),
            ("windspeed", "ms-1".to_string()),
            ("precipitationamount", "mm".to_string()),
        ];

        let response = self
            .http
            .get(&self.base_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| classify_transport(&self.base_url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(classify_status(&self.base_url, status));
        }

        let payload: RawForecastPayload = response.json().await.map_err(|e| {
            if e.is_decode() {
                FetchError::Decode(e)
            } else {
                classify_transport(&self.base_url, e)
            }
        })?;

        if let Some(message) = payload.error_message.clone().filter(|m| !m.is_empty()) {
            return Err(FetchError::ProviderBusiness { message });
        }

        Ok(payload)
    }
}

#[async_trait]
impl ForecastSource for ForecastClient {
    async fn fetch(&self, coordinate: LatLon) -> Result<RawForecastPayload, FetchError> {
        if let Some(payload) = self.cache.get(coordinate).await {
            info!("Payload cache hit for {coordinate:?}");
            return Ok(payload);
        }

        debug!("Payload cache miss for {coordinate:?}; requesting forecast");
        match self.fetch_remote(coordinate).await {
            Ok(payload) => {
                self.cache.put(coordinate, payload.clone()).await;
                Ok(payload)
            }
            Err(e) => {
                warn!("{}", e.user_message());
                Err(e)
            }
        }
    }
}

fn classify_status(url: &str, status: StatusCode) -> FetchError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => FetchError::Authorization { status },
        StatusCode::TOO_MANY_REQUESTS => FetchError::QuotaExceeded,
        s if s.is_server_error() => FetchError::ProviderUnavailable { status },
        _ => FetchError::Status {
            url: url.to_string(),
            status,
        },
    }
}

fn classify_transport(url: &str, source: reqwest::Error) -> FetchError {
    if source.is_connect() || source.is_timeout() {
        FetchError::Connectivity(source)
    } else {
        FetchError::Transport {
            url: url.to_string(),
            source,
        }
    }
}
