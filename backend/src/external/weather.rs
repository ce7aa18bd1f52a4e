//! Weather API client for fetching climate data
//!
//! Integrates with Open-Meteo: the forecast API for current conditions and the
//! archive API for daily precipitation over the reference climatology window.

use std::future::Future;
use std::time::Duration;

use chrono::{Datelike, NaiveDate};
use reqwest::Client;
use serde::Deserialize;
use shared::GpsCoordinates;
use thiserror::Error;

/// Failure talking to a climate data source
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("Weather API request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Weather API error: {status} - {body}")]
    Status { status: u16, body: String },

    #[error("Malformed weather payload: {0}")]
    Malformed(String),

    #[error("Precipitation series is empty")]
    EmptySeries,
}

/// Instantaneous conditions at a location
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrentConditions {
    pub temperature_celsius: f64,
    pub humidity_percent: f64,
}

/// Inclusive date range used for the rainfall climatology
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl ReferenceWindow {
    /// Returns `None` when `end` precedes `start`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of calendar years the window touches
    pub fn years(&self) -> u32 {
        (self.end.year() - self.start.year() + 1) as u32
    }
}

impl Default for ReferenceWindow {
    /// The 1991-2020 climate normal period
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(1991, 1, 1).unwrap_or(NaiveDate::MIN),
            end: NaiveDate::from_ymd_opt(2020, 12, 31).unwrap_or(NaiveDate::MAX),
        }
    }
}

/// A source of current conditions and historical precipitation
pub trait ClimateSource: Send + Sync {
    /// Current temperature and relative humidity
    fn current_conditions(
        &self,
        coords: GpsCoordinates,
    ) -> impl Future<Output = Result<CurrentConditions, UpstreamError>> + Send;

    /// Daily precipitation totals (mm) across `window`; gaps are `None`
    fn daily_precipitation(
        &self,
        coords: GpsCoordinates,
        window: ReferenceWindow,
    ) -> impl Future<Output = Result<Vec<Option<f64>>, UpstreamError>> + Send;
}

/// Open-Meteo API client
#[derive(Clone)]
pub struct OpenMeteoClient {
    client: Client,
    forecast_url: String,
    archive_url: String,
    api_key: Option<String>,
}

/// Open-Meteo forecast response (current block only)
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: Option<CurrentBlock>,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    temperature_2m: Option<f64>,
    relative_humidity_2m: Option<f64>,
}

/// Open-Meteo archive response (daily block only)
#[derive(Debug, Deserialize)]
struct ArchiveResponse {
    daily: Option<DailyBlock>,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    #[serde(default)]
    precipitation_sum: Vec<Option<f64>>,
}

impl OpenMeteoClient {
    /// Create a client whose requests time out after `timeout`
    pub fn new(
        forecast_url: String,
        archive_url: String,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, UpstreamError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            forecast_url,
            archive_url,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T, UpstreamError> {
        let mut request = self.client.get(url).query(params);
        if let Some(key) = &self.api_key {
            request = request.query(&[("apikey", key)]);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status { status, body });
        }

        Ok(response.json().await?)
    }
}

impl ClimateSource for OpenMeteoClient {
    async fn current_conditions(
        &self,
        coords: GpsCoordinates,
    ) -> Result<CurrentConditions, UpstreamError> {
        let params = [
            ("latitude", coords.latitude.to_string()),
            ("longitude", coords.longitude.to_string()),
            ("current", "temperature_2m,relative_humidity_2m".to_string()),
        ];
        let data: ForecastResponse = self.get_json(&self.forecast_url, &params).await?;
        convert_current(data)
    }

    async fn daily_precipitation(
        &self,
        coords: GpsCoordinates,
        window: ReferenceWindow,
    ) -> Result<Vec<Option<f64>>, UpstreamError> {
        let params = [
            ("latitude", coords.latitude.to_string()),
            ("longitude", coords.longitude.to_string()),
            ("start_date", window.start().format("%Y-%m-%d").to_string()),
            ("end_date", window.end().format("%Y-%m-%d").to_string()),
            ("daily", "precipitation_sum".to_string()),
            ("timezone", "UTC".to_string()),
        ];
        let data: ArchiveResponse = self.get_json(&self.archive_url, &params).await?;
        convert_archive(data)
    }
}

/// Convert the forecast response, rejecting missing or non-finite readings
fn convert_current(data: ForecastResponse) -> Result<CurrentConditions, UpstreamError> {
    let current = data
        .current
        .ok_or_else(|| UpstreamError::Malformed("missing current block".to_string()))?;

    let temperature_celsius = current
        .temperature_2m
        .filter(|t| t.is_finite())
        .ok_or_else(|| UpstreamError::Malformed("missing temperature_2m".to_string()))?;
    let humidity_percent = current
        .relative_humidity_2m
        .filter(|h| h.is_finite())
        .ok_or_else(|| UpstreamError::Malformed("missing relative_humidity_2m".to_string()))?;

    Ok(CurrentConditions {
        temperature_celsius,
        humidity_percent,
    })
}

fn convert_archive(data: ArchiveResponse) -> Result<Vec<Option<f64>>, UpstreamError> {
    let daily = data
        .daily
        .ok_or_else(|| UpstreamError::Malformed("missing daily block".to_string()))?;
    if daily.precipitation_sum.is_empty() {
        return Err(UpstreamError::EmptySeries);
    }
    Ok(daily.precipitation_sum)
}

/// Average annual rainfall: the sum of all present daily totals divided by
/// the number of calendar years in the window
pub fn annual_rainfall(daily: &[Option<f64>], years: u32) -> Result<f64, UpstreamError> {
    if years == 0 {
        return Err(UpstreamError::Malformed("reference window spans no years".to_string()));
    }
    let present: Vec<f64> = daily.iter().flatten().copied().filter(|v| v.is_finite()).collect();
    if present.is_empty() {
        return Err(UpstreamError::EmptySeries);
    }
    Ok(present.iter().sum::<f64>() / f64::from(years))
}
