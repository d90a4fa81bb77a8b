//! Dashboard orchestration
//!
//! Runs the per-request pipeline: fetch the latest reading, fall back to the
//! constant demo reading on any fetch failure, classify the moisture value,
//! and merge everything into one render context. The fallback decision lives
//! in [`build_context`] so it is testable without a network.

use chrono::{DateTime, Utc};
use serde::Serialize;

use shared::models::{analyze_soil, SensorReading, SoilClassification, Urgency};

use crate::external::thingspeak::{FetchError, ThingSpeakClient};

/// Dashboard service wrapping the sensor client
#[derive(Clone)]
pub struct DashboardService {
    thingspeak: ThingSpeakClient,
}

/// Merged sensor reading and soil analysis for one request
#[derive(Debug, Clone, Serialize)]
pub struct DashboardContext {
    pub soil_moisture: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub timestamp: String,
    pub is_demo: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<SoilClassification>,
    pub recommendation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency: Option<Urgency>,
    pub status: bool,
    /// User-facing banner text, set only on the demo fallback path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

impl DashboardService {
    /// Create a new DashboardService instance
    pub fn new(thingspeak: ThingSpeakClient) -> Self {
        Self { thingspeak }
    }

    /// Run the full pipeline for one request.
    ///
    /// Never fails: every anticipated fetch error degrades to demo data.
    pub async fn load(&self) -> DashboardContext {
        let result = self.thingspeak.fetch_latest().await;
        if let Err(err) = &result {
            tracing::warn!(error = %err, "sensor fetch failed, serving demo data");
        }
        build_context(result)
    }
}

/// The single visible fallback decision: a failed fetch becomes the demo
/// reading plus a warning banner, and the classifier always runs.
pub fn build_context(result: Result<SensorReading, FetchError>) -> DashboardContext {
    let (reading, warning) = match result {
        Ok(reading) => (reading, None),
        Err(err) => (SensorReading::demo(), Some(fallback_warning(&err))),
    };

    let analysis = analyze_soil(reading.soil_moisture);

    DashboardContext {
        soil_moisture: reading.soil_moisture,
        temperature: reading.temperature,
        humidity: reading.humidity,
        timestamp: reading.timestamp,
        is_demo: reading.is_demo,
        classification: analysis.classification,
        recommendation: analysis.recommendation,
        urgency: analysis.urgency,
        status: analysis.status,
        warning,
        fetched_at: Utc::now(),
    }
}

/// Banner text explaining why demo data is shown
fn fallback_warning(err: &FetchError) -> String {
    let reason = match err {
        FetchError::Timeout => "the sensor channel timed out".to_string(),
        FetchError::Connection(_) => "the sensor channel could not be reached".to_string(),
        FetchError::Http { status } => {
            format!("the sensor channel returned HTTP {}", status)
        }
        FetchError::NoData => "the sensor channel has no data yet".to_string(),
        FetchError::Validation(_) => "the latest sensor reading was invalid".to_string(),
    };
    format!("Demo mode: showing sample data because {}.", reason)
}
