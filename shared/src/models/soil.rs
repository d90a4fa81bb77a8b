//! Soil condition classification
//!
//! The classifier is a pure function: same moisture in, same analysis out.
//! All thresholds are fixed percentages.

use serde::{Deserialize, Serialize};

use crate::validation::is_valid_soil_moisture;

/// Below this moisture the soil is classified as dry
pub const DRY_THRESHOLD: f64 = 30.0;
/// Upper bound of the optimal band (inclusive)
pub const OPTIMAL_MAX: f64 = 60.0;
/// Strictly below this moisture a dry reading is high urgency
pub const SEVERE_DRY_THRESHOLD: f64 = 15.0;
/// Strictly above this moisture an overwatered reading is high urgency
pub const SEVERE_WET_THRESHOLD: f64 = 80.0;

/// Three-way soil condition classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SoilClassification {
    /// Below 30% moisture
    Dry,
    /// 30-60% moisture
    Optimal,
    /// Above 60% moisture
    Overwatered,
}

impl std::fmt::Display for SoilClassification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SoilClassification::Dry => write!(f, "Dry"),
            SoilClassification::Optimal => write!(f, "Optimal"),
            SoilClassification::Overwatered => write!(f, "Overwatered"),
        }
    }
}

/// How soon the farmer should act
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Urgency::Low => write!(f, "Low"),
            Urgency::Medium => write!(f, "Medium"),
            Urgency::High => write!(f, "High"),
        }
    }
}

/// Result of analyzing one soil moisture value.
///
/// `classification` and `urgency` are `None` exactly when `status` is false,
/// i.e. the input was outside the measurable 0-100% range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoilAnalysis {
    pub soil_moisture: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<SoilClassification>,
    pub recommendation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency: Option<Urgency>,
    pub status: bool,
}

/// Classify soil condition from a moisture percentage.
///
/// Caller is responsible for range-checking the input first.
pub fn classify_soil(soil_moisture: f64) -> SoilClassification {
    if soil_moisture < DRY_THRESHOLD {
        SoilClassification::Dry
    } else if soil_moisture <= OPTIMAL_MAX {
        SoilClassification::Optimal
    } else {
        SoilClassification::Overwatered
    }
}

/// Determine urgency for an already classified reading.
///
/// The severe bands are strict: exactly 15% and exactly 80% stay Medium.
pub fn urgency_for(classification: SoilClassification, soil_moisture: f64) -> Urgency {
    match classification {
        SoilClassification::Optimal => Urgency::Low,
        SoilClassification::Dry if soil_moisture < SEVERE_DRY_THRESHOLD => Urgency::High,
        SoilClassification::Overwatered if soil_moisture > SEVERE_WET_THRESHOLD => Urgency::High,
        _ => Urgency::Medium,
    }
}

/// Fixed advisory text for a classification
pub fn recommendation_for(classification: SoilClassification) -> &'static str {
    match classification {
        SoilClassification::Dry => {
            "Irrigation needed: water your crops soon and increase irrigation \
             frequency to prevent crop stress."
        }
        SoilClassification::Optimal => {
            "Conditions are ideal. Maintain the current irrigation schedule."
        }
        SoilClassification::Overwatered => {
            "Reduce watering: pause irrigation to prevent waterlogging and root \
             rot, and improve drainage if possible."
        }
    }
}

/// Analyze a soil moisture percentage.
///
/// Out-of-range input (including NaN) yields `status = false` with an error
/// advisory instead of panicking; everything else gets a classification,
/// urgency tier, and recommendation.
pub fn analyze_soil(soil_moisture: f64) -> SoilAnalysis {
    if !is_valid_soil_moisture(soil_moisture) {
        return SoilAnalysis {
            soil_moisture,
            classification: None,
            recommendation: "Soil moisture reading is outside the measurable \
                             range (0-100%). Check the sensor."
                .to_string(),
            urgency: None,
            status: false,
        };
    }

    let classification = classify_soil(soil_moisture);
    SoilAnalysis {
        soil_moisture,
        classification: Some(classification),
        recommendation: recommendation_for(classification).to_string(),
        urgency: Some(urgency_for(classification, soil_moisture)),
        status: true,
    }
}
