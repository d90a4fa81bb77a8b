//! ThingSpeak API client for fetching sensor feed data
//!
//! Issues one GET per invocation against the channel feeds endpoint and
//! converts the newest entry into a validated [`SensorReading`]. Retry
//! policy, if any, belongs to the caller.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use shared::models::SensorReading;
use shared::validation::{validate_humidity, validate_soil_moisture, validate_temperature};

use crate::config::ThingSpeakConfig;

/// Defaults applied when the channel omits the optional fields
const DEFAULT_TEMPERATURE: f64 = 25.0;
const DEFAULT_HUMIDITY: f64 = 60.0;

/// Typed failure for one fetch attempt
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("ThingSpeak request timed out")]
    Timeout,

    #[error("connection error while fetching ThingSpeak data: {0}")]
    Connection(String),

    #[error("ThingSpeak returned HTTP status {status}")]
    Http { status: u16 },

    #[error("channel is reachable but has no feed entries")]
    NoData,

    #[error("invalid sensor data: {0}")]
    Validation(String),
}

impl FetchError {
    /// Stable machine-readable code for this failure kind
    pub fn code(&self) -> &'static str {
        match self {
            FetchError::Timeout => "SENSOR_TIMEOUT",
            FetchError::Connection(_) => "SENSOR_CONNECTION_ERROR",
            FetchError::Http { .. } => "SENSOR_HTTP_ERROR",
            FetchError::NoData => "SENSOR_NO_DATA",
            FetchError::Validation(_) => "SENSOR_VALIDATION_ERROR",
        }
    }
}

/// ThingSpeak API client
#[derive(Clone)]
pub struct ThingSpeakClient {
    client: Client,
    channel_id: String,
    read_key: String,
    base_url: String,
    timeout: Duration,
}

/// ThingSpeak feeds endpoint response
#[derive(Debug, Deserialize)]
struct FeedsResponse {
    feeds: Vec<FeedEntry>,
}

/// One timestamped feed entry. ThingSpeak reports field values as strings.
#[derive(Debug, Deserialize)]
struct FeedEntry {
    created_at: Option<String>,
    field1: Option<String>,
    field2: Option<String>,
    field3: Option<String>,
}

impl ThingSpeakClient {
    /// Create a new ThingSpeakClient from explicit configuration
    pub fn new(config: &ThingSpeakConfig) -> Self {
        Self {
            client: Client::new(),
            channel_id: config.channel_id.clone(),
            read_key: config.read_key.clone(),
            base_url: config.base_url.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Create a new ThingSpeakClient with custom base URL (for testing)
    pub fn with_base_url(config: &ThingSpeakConfig, base_url: String) -> Self {
        Self {
            base_url,
            ..Self::new(config)
        }
    }

    /// The configured channel id
    pub fn channel_id(&self) -> &str {
        &self.channel_id
    }

    /// Fetch the newest sensor reading from the channel.
    ///
    /// One attempt, one log record per outcome.
    pub async fn fetch_latest(&self) -> Result<SensorReading, FetchError> {
        let url = format!("{}/channels/{}/feeds.json", self.base_url, self.channel_id);

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.read_key.as_str()), ("results", "1")])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    tracing::warn!(channel_id = %self.channel_id, "ThingSpeak request timed out");
                    FetchError::Timeout
                } else {
                    tracing::warn!(channel_id = %self.channel_id, error = %e, "ThingSpeak connection failed");
                    FetchError::Connection(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(channel_id = %self.channel_id, status = status.as_u16(), "ThingSpeak returned error status");
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }

        let data: FeedsResponse = response.json().await.map_err(|e| {
            tracing::warn!(channel_id = %self.channel_id, error = %e, "failed to decode ThingSpeak response");
            FetchError::Validation(format!("failed to decode feeds response: {}", e))
        })?;

        let latest = data.feeds.first().ok_or_else(|| {
            tracing::warn!(channel_id = %self.channel_id, "channel has no feed entries");
            FetchError::NoData
        })?;

        let reading = parse_feed(latest).map_err(|e| {
            tracing::warn!(channel_id = %self.channel_id, error = %e, "feed entry failed validation");
            e
        })?;

        tracing::info!(
            channel_id = %self.channel_id,
            soil_moisture = reading.soil_moisture,
            temperature = reading.temperature,
            humidity = reading.humidity,
            "fetched latest sensor reading"
        );
        Ok(reading)
    }
}

/// Convert a raw feed entry into a validated sensor reading
fn parse_feed(feed: &FeedEntry) -> Result<SensorReading, FetchError> {
    let soil_moisture = parse_required_field(feed.field1.as_deref(), "field1 (soil_moisture)")?;
    let temperature = parse_optional_field(
        feed.field2.as_deref(),
        "field2 (temperature)",
        DEFAULT_TEMPERATURE,
    )?;
    let humidity = parse_optional_field(
        feed.field3.as_deref(),
        "field3 (humidity)",
        DEFAULT_HUMIDITY,
    )?;

    validate_soil_moisture(soil_moisture).map_err(FetchError::Validation)?;
    validate_temperature(temperature).map_err(FetchError::Validation)?;
    validate_humidity(humidity).map_err(FetchError::Validation)?;

    Ok(SensorReading {
        soil_moisture,
        temperature,
        humidity,
        timestamp: feed.created_at.clone().unwrap_or_default(),
        is_demo: false,
    })
}

fn parse_required_field(value: Option<&str>, name: &str) -> Result<f64, FetchError> {
    match value {
        Some(raw) if !raw.trim().is_empty() => parse_numeric(raw, name),
        _ => Err(FetchError::Validation(format!(
            "missing required sensor field {}",
            name
        ))),
    }
}

fn parse_optional_field(value: Option<&str>, name: &str, default: f64) -> Result<f64, FetchError> {
    match value {
        Some(raw) if !raw.trim().is_empty() => parse_numeric(raw, name),
        _ => Ok(default),
    }
}

fn parse_numeric(raw: &str, name: &str) -> Result<f64, FetchError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| FetchError::Validation(format!("{} is not numeric: {:?}", name, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(field1: Option<&str>, field2: Option<&str>, field3: Option<&str>) -> FeedEntry {
        FeedEntry {
            created_at: Some("2025-06-01T08:30:00Z".to_string()),
            field1: field1.map(str::to_string),
            field2: field2.map(str::to_string),
            field3: field3.map(str::to_string),
        }
    }

    #[test]
    fn test_parse_complete_feed() {
        let reading = parse_feed(&feed(Some("18.2"), Some("24.0"), Some("55.0"))).unwrap();
        assert_eq!(reading.soil_moisture, 18.2);
        assert_eq!(reading.temperature, 24.0);
        assert_eq!(reading.humidity, 55.0);
        assert_eq!(reading.timestamp, "2025-06-01T08:30:00Z");
        assert!(!reading.is_demo);
    }

    #[test]
    fn test_parse_applies_optional_defaults() {
        let reading = parse_feed(&feed(Some("42.0"), None, Some(""))).unwrap();
        assert_eq!(reading.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(reading.humidity, DEFAULT_HUMIDITY);
    }

    #[test]
    fn test_parse_missing_moisture_fails() {
        let err = parse_feed(&feed(None, Some("24.0"), Some("55.0"))).unwrap_err();
        assert!(matches!(err, FetchError::Validation(_)));

        let err = parse_feed(&feed(Some(""), None, None)).unwrap_err();
        assert!(matches!(err, FetchError::Validation(_)));
    }

    #[test]
    fn test_parse_non_numeric_fails() {
        let err = parse_feed(&feed(Some("wet"), None, None)).unwrap_err();
        assert!(matches!(err, FetchError::Validation(_)));
    }

    #[test]
    fn test_parse_out_of_range_moisture_fails() {
        // 150% moisture is a broken sensor, not a valid reading
        let err = parse_feed(&feed(Some("150"), None, None)).unwrap_err();
        assert!(matches!(err, FetchError::Validation(_)));
    }

    #[test]
    fn test_parse_out_of_range_temperature_fails() {
        let err = parse_feed(&feed(Some("45.0"), Some("75.0"), None)).unwrap_err();
        assert!(matches!(err, FetchError::Validation(_)));
    }

    #[test]
    fn test_empty_feeds_is_no_data() {
        let data: FeedsResponse = serde_json::from_value(serde_json::json!({
            "channel": {"id": 123, "name": "greenhouse"},
            "feeds": []
        }))
        .unwrap();
        assert!(data.feeds.is_empty());

        let err = data.feeds.first().ok_or(FetchError::NoData).unwrap_err();
        assert!(matches!(err, FetchError::NoData));
    }

    #[test]
    fn test_feeds_response_decoding() {
        let data: FeedsResponse = serde_json::from_value(serde_json::json!({
            "channel": {"id": 123},
            "feeds": [
                {"created_at": "2025-06-01T08:30:00Z", "entry_id": 7,
                 "field1": "45.0", "field2": "25.5", "field3": "65.0"}
            ]
        }))
        .unwrap();
        let reading = parse_feed(&data.feeds[0]).unwrap();
        assert_eq!(reading.soil_moisture, 45.0);
    }

    #[test]
    fn test_error_codes_are_distinct() {
        let errors = [
            FetchError::Timeout,
            FetchError::Connection("refused".into()),
            FetchError::Http { status: 404 },
            FetchError::NoData,
            FetchError::Validation("bad".into()),
        ];
        let codes: std::collections::HashSet<_> = errors.iter().map(|e| e.code()).collect();
        assert_eq!(codes.len(), errors.len());
    }
}
